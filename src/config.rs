// SPDX-License-Identifier: MPL-2.0

use std::path::PathBuf;

pub const APP_ID: &str = "photogram";

/// Overrides the database location from settings
pub const DATABASE_ENV: &str = "PHOTOGRAM_DB";

pub const DEFAULT_LOG_FILTER: &str = "photogram=info";

/// ~/.local/share/photogram/photogram.db
pub fn default_database_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_ID).join("photogram.db"))
}
