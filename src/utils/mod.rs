use std::path::{Path, PathBuf};
use std::sync::Once;
use std::{env, fs};

use crate::errors::TrackerError;

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("expense_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
    });
}

pub fn ensure_dir(path: &Path) -> Result<(), TrackerError> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Resolves application directories. `EXPENSE_CORE_HOME` overrides the
/// platform data directory, which keeps tests and scripted runs isolated.
pub struct PathResolver;

impl PathResolver {
    pub fn base_dir() -> PathBuf {
        if let Some(home) = env::var_os("EXPENSE_CORE_HOME") {
            return PathBuf::from(home);
        }
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("expense_core")
    }

    pub fn resolve_base(base: Option<PathBuf>) -> PathBuf {
        base.unwrap_or_else(Self::base_dir)
    }

    pub fn books_dir_in(base: &Path) -> PathBuf {
        base.join("books")
    }

    pub fn backups_dir_in(base: &Path) -> PathBuf {
        base.join("backups")
    }

    pub fn config_dir_in(base: &Path) -> PathBuf {
        base.join("config")
    }

    pub fn config_backup_dir_in(base: &Path) -> PathBuf {
        Self::config_dir_in(base).join("backups")
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        Self::config_dir_in(base).join("config.json")
    }

    pub fn state_file_in(base: &Path) -> PathBuf {
        base.join("state.json")
    }
}
