// SPDX-License-Identifier: MPL-2.0

use crate::config::{self, APP_ID};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Persistent application settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Database file; the platform data directory when unset
    #[serde(default)]
    pub database_path: Option<PathBuf>,
    /// `tracing` filter directive used when `RUST_LOG` is unset
    #[serde(default)]
    pub log_filter: Option<String>,
}

impl Settings {
    /// Get the settings file path (~/.config/photogram/settings.json)
    pub fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push(APP_ID);
            p.push("settings.json");
            p
        })
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load from an explicit file. Missing or malformed files yield defaults.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), "ignoring malformed settings: {}", e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Database location: explicit override, then settings, then the
    /// platform default
    pub fn resolve_database_path(&self, explicit: Option<PathBuf>) -> Option<PathBuf> {
        explicit
            .or_else(|| std::env::var_os(config::DATABASE_ENV).map(PathBuf::from))
            .or_else(|| self.database_path.clone())
            .or_else(config::default_database_path)
    }

    pub fn log_filter(&self) -> &str {
        self.log_filter
            .as_deref()
            .unwrap_or(config::DEFAULT_LOG_FILTER)
    }
}
