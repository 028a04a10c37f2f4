use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub(crate) const DEFAULT_LOG_FILTER: &str = "spendlog=warn";

/// Runtime settings resolved from flags and environment.
#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) db_path: PathBuf,
    pub(crate) log_filter: String,
}

impl Config {
    /// Resolve the store location, creating its parent directory if needed.
    ///
    /// An explicit path (`--db` / `SPENDLOG_DB`) wins over the per-user data
    /// directory.
    pub(crate) fn resolve(db_override: Option<PathBuf>, log_filter: Option<String>) -> Result<Self> {
        let db_path = match db_override {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    ensure_dir(parent)?;
                }
                path
            }
            None => default_db_path()?,
        };

        let log_filter = log_filter
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            db_path,
            log_filter,
        })
    }
}

fn default_db_path() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "spendlog", "spendlog")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    ensure_dir(data_dir)?;
    Ok(data_dir.join("spendlog.db"))
}

fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create data directory: {}", dir.display()))
}
