pub mod interaction;
pub mod plan;
pub mod task;
pub mod timeline;

pub use interaction::{DragEdge, Interaction};
pub use plan::{MaintenancePlan, Resource};
pub use task::MaintenanceTask;
pub use timeline::TimeRange;
