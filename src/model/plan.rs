use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::task::MaintenanceTask;

/// A person or crew that work can be assigned to. The timeline only ever
/// resolves ids to display labels; resources carry no scheduling weight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    pub id: Uuid,
    pub name: String,
}

impl Resource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// A maintenance plan: the task list plus the resource lookup and metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenancePlan {
    pub name: String,
    pub tasks: Vec<MaintenanceTask>,
    #[serde(default)]
    pub resources: Vec<Resource>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Default for MaintenancePlan {
    fn default() -> Self {
        Self {
            name: "Untitled Plan".to_string(),
            tasks: Vec::new(),
            resources: Vec::new(),
            created: Utc::now(),
            modified: Utc::now(),
        }
    }
}

impl MaintenancePlan {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Touch the modified timestamp.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }

    /// Display label for an assignee id; empty when unassigned or unknown.
    pub fn resource_name(&self, id: Option<Uuid>) -> &str {
        id.and_then(|id| self.resources.iter().find(|r| r.id == id))
            .map(|r| r.name.as_str())
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_lookup_resolves_known_ids_only() {
        let mut plan = MaintenancePlan::new("Plant A");
        let crew = Resource::new("Night crew");
        let crew_id = crew.id;
        plan.resources.push(crew);

        assert_eq!(plan.resource_name(Some(crew_id)), "Night crew");
        assert_eq!(plan.resource_name(Some(Uuid::new_v4())), "");
        assert_eq!(plan.resource_name(None), "");
    }
}
