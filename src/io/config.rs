use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Small on-disk app state, kept under the platform config dir. Failures here
/// are logged and ignored; losing it only costs the last-file convenience.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub last_plan: Option<PathBuf>,
}

fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "maintenance-planner")
        .map(|dirs| dirs.config_dir().join("config.json"))
}

impl AppConfig {
    pub fn load() -> Self {
        let Some(path) = config_path() else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                log::warn!("ignoring unreadable config {}: {}", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) {
        let Some(path) = config_path() else {
            return;
        };
        if let Some(dir) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(dir) {
                log::warn!("could not create config dir {}: {}", dir.display(), e);
                return;
            }
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    log::warn!("could not write config {}: {}", path.display(), e);
                }
            }
            Err(e) => log::warn!("could not serialize config: {}", e),
        }
    }
}
