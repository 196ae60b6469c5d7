use std::path::Path;

use crate::model::{MaintenanceTask, Resource};

/// Export tasks to a semicolon-delimited CSV file matching the import format.
///
/// Columns: Title ; Assignee ; Start Date ; End Date ; Status ; Priority
/// Dates are written in the ISO exchange format.
/// Returns the number of tasks written.
pub fn export_csv(
    tasks: &[MaintenanceTask],
    resources: &[Resource],
    path: &Path,
) -> Result<usize, String> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_path(path)
        .map_err(|e| format!("Failed to create CSV file: {}", e))?;

    wtr.write_record(["Title", "Assignee", "Start Date", "End Date", "Status", "Priority"])
        .map_err(|e| format!("Failed to write header: {}", e))?;

    for task in tasks {
        let assignee = resources
            .iter()
            .find(|r| Some(r.id) == task.assignee)
            .map(|r| r.name.as_str())
            .unwrap_or("");
        wtr.write_record([
            task.title.as_str(),
            assignee,
            task.start_date.as_str(),
            task.end_date.as_str(),
            task.status.label(),
            task.priority.label(),
        ])
        .map_err(|e| format!("Failed to write task '{}': {}", task.title, e))?;
    }

    wtr.flush().map_err(|e| format!("Failed to flush CSV: {}", e))?;
    Ok(tasks.len())
}
