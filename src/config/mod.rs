//! Persisted application settings (`config.toml` in the app root).

mod errors;
mod io;

pub use errors::ConfigError;
pub use io::{CONFIG_FILE_NAME, config_path, load_from_path, load_or_default, save, save_to_path};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::app_dirs;
use crate::drumkit::KitRoots;
use crate::export::ArchiveBackend;

/// Settings stored in the TOML config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Overrides the read-only system drumkit root.
    #[serde(default)]
    pub system_kits_dir: Option<PathBuf>,
    /// Overrides the user drumkit root (defaults to `<app root>/drumkits`).
    #[serde(default)]
    pub user_kits_dir: Option<PathBuf>,
    /// How `.h2drumkit` archives are produced.
    #[serde(default)]
    pub archive_backend: ArchiveBackend,
    /// Folder last picked in the export dialog.
    #[serde(default)]
    pub last_export_dir: Option<PathBuf>,
}

impl Settings {
    /// Resolve both drumkit roots, creating the user root if needed.
    ///
    /// The `KITSHELF_SYSTEM_KITS` environment variable wins over the config
    /// file for the system root.
    pub fn kit_roots(&self) -> Result<KitRoots, ConfigError> {
        let system = std::env::var(app_dirs::SYSTEM_KITS_ENV)
            .ok()
            .map(PathBuf::from)
            .or_else(|| self.system_kits_dir.clone())
            .or_else(app_dirs::default_system_kits_dir)
            .unwrap_or_default();
        let user = match &self.user_kits_dir {
            Some(path) => {
                std::fs::create_dir_all(path).map_err(|source| ConfigError::CreateDir {
                    path: path.clone(),
                    source,
                })?;
                path.clone()
            }
            None => app_dirs::user_kits_dir()?,
        };
        Ok(KitRoots::new(system, user))
    }

    /// Initial destination shown by the export dialog.
    pub fn export_dir_or_home(&self) -> PathBuf {
        self.last_export_dir
            .clone()
            .unwrap_or_else(app_dirs::home_dir)
    }
}
