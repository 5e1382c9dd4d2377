//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use torq_cache::Cache;
use torq_commerce::cart::CartStore;
use torq_commerce::checkout::WhatsAppConfig;
use tracing::error;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            CliConfig::load(path)?
        } else {
            // Try to find config in current directory or parent directories
            find_config(&cwd).unwrap_or_default()
        };

        Ok(Self { config, output, cwd })
    }

    /// Directory holding the cart snapshot.
    pub fn storage_dir(&self) -> PathBuf {
        match self.config.storage.dir {
            Some(ref dir) => self.resolve_path(dir),
            None => data_dir().join("torq").join("store"),
        }
    }

    /// Open the persisted cart.
    ///
    /// If the snapshot directory cannot be opened the session continues with
    /// an in-memory cart; nothing will be saved.
    pub fn open_store(&self) -> CartStore {
        let dir = self.storage_dir();
        let cache = match Cache::open_dir(&dir) {
            Ok(cache) => {
                self.output.debug(&format!("Cart storage: {}", dir.display()));
                cache
            }
            Err(e) => {
                error!(error = %e, dir = %dir.display(), "cart storage unavailable");
                self.output
                    .warn("Cart storage unavailable; changes in this run will not be saved.");
                Cache::in_memory()
            }
        };
        CartStore::restore(cache)
    }

    /// Destination of order messages.
    pub fn whatsapp(&self) -> WhatsAppConfig {
        WhatsAppConfig::new(self.config.phone_number().as_deref())
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}

/// Find config file in directory tree.
pub fn find_config(start: &Path) -> Option<CliConfig> {
    find_config_path(start).and_then(|path| CliConfig::load(path.to_str()?).ok())
}

/// Path of the nearest config file, searching upwards from `start`.
pub fn find_config_path(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_FILE_NAMES {
            let config_path = current.join(name);
            if config_path.is_file() {
                return Some(config_path);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Get the platform-specific data directory.
fn data_dir() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        std::env::temp_dir()
    }
}
