//! Database location

use std::path::PathBuf;

/// Default database path under the platform data directory.
///
/// Shared with the CLI, so inspections captured in either client land in the
/// same queue.
#[must_use]
pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gearlog")
        .join("gearlog.db")
}
