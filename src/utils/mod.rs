pub mod build_info;
pub mod persistence;

use dirs::home_dir;
use std::{
    env,
    path::{Path, PathBuf},
};

use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global tracing subscriber; call through [`crate::init`].
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("subtrack_core=info"));

    // Another subscriber may already be installed by an embedding host.
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

const DEFAULT_DIR_NAME: &str = ".subtrack";
const HOME_ENV: &str = "SUBTRACK_HOME";
const STORAGE_FILE: &str = "storage.json";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";

/// Resolves the on-disk layout of the application home directory.
pub struct PathResolver;

impl PathResolver {
    /// Returns the application data directory, defaulting to `~/.subtrack`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn resolve_base(root: Option<PathBuf>) -> PathBuf {
        root.unwrap_or_else(Self::base_dir)
    }

    /// Durable key-value file.
    pub fn storage_file_in(base: &Path) -> PathBuf {
        base.join(STORAGE_FILE)
    }

    pub fn config_dir_in(base: &Path) -> PathBuf {
        base.join(CONFIG_DIR)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        Self::config_dir_in(base).join(CONFIG_FILE)
    }
}
