use std::path::Path;

use crate::model::MaintenancePlan;

/// Save a plan to a JSON file.
pub fn save_plan(plan: &MaintenancePlan, path: &Path) -> Result<(), String> {
    let json = serde_json::to_string_pretty(plan).map_err(|e| e.to_string())?;
    std::fs::write(path, json).map_err(|e| e.to_string())?;
    log::info!("saved plan '{}' to {}", plan.name, path.display());
    Ok(())
}

/// Load a plan from a JSON file.
pub fn load_plan(path: &Path) -> Result<MaintenancePlan, String> {
    let json = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    let plan: MaintenancePlan = serde_json::from_str(&json).map_err(|e| e.to_string())?;
    log::info!(
        "loaded plan '{}' ({} tasks) from {}",
        plan.name,
        plan.tasks.len(),
        path.display()
    );
    Ok(plan)
}
