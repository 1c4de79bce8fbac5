mod config;
mod memory;
pub mod migrations;
mod repository;
pub mod schedule_db;

pub use config::{Config, LayoutConfig, OwnerConfig, WeekConfig};
pub use memory::MemoryRepository;
pub use repository::{ScheduleRepository, TodoRepository};
pub use schedule_db::ScheduleDb;

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the data directory, creating it if needed.
///
/// `WEEKPLAN_HOME` overrides the location outright. Otherwise this is
/// `~/.config/weekplan[-dev]/`, with `WEEKPLAN_ENV=dev` selecting the
/// development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("WEEKPLAN_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("WEEKPLAN_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("weekplan-dev")
            } else {
                base_dir.join("weekplan")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
