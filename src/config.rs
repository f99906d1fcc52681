//! Application settings.
//!
//! Read from `<config dir>/spaced-cards/config.toml` when the file exists,
//! then overridden by `SPACED_CARDS_DB` and `SPACED_CARDS_LOG`.

use crate::error::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "spaced-cards";
const CONFIG_FILE: &str = "config.toml";
const DATABASE_FILE: &str = "cards.sqlite3";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub log_level: String,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            log_level: "info".to_string(),
            window_width: 520.0,
            window_height: 720.0,
        }
    }
}

impl AppConfig {
    /// Loads the config file if present and applies environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = match config_file_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_overrides(
            std::env::var("SPACED_CARDS_DB").ok(),
            std::env::var("SPACED_CARDS_LOG").ok(),
        );
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    fn apply_overrides(&mut self, database: Option<String>, log_level: Option<String>) {
        if let Some(database) = database.filter(|v| !v.is_empty()) {
            self.database_path = PathBuf::from(database);
        }
        if let Some(log_level) = log_level.filter(|v| !v.is_empty()) {
            self.log_level = log_level;
        }
    }
}

fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_DIR).join(DATABASE_FILE))
        .unwrap_or_else(|| PathBuf::from(DATABASE_FILE))
}
