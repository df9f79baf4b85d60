//! Application directory helpers anchored to a single `.kitshelf` folder.
//!
//! The helpers centralize where config, logs and user drumkits live across
//! platforms, defaulting to the OS config directory (e.g., `%APPDATA%` on
//! Windows) and allowing a `KITSHELF_CONFIG_HOME` override for tests or
//! portable setups. The read-only system kit root can be redirected with
//! `KITSHELF_SYSTEM_KITS`.

use std::{
    path::PathBuf,
    sync::{LazyLock, Mutex},
};

use directories::{BaseDirs, ProjectDirs, UserDirs};
use thiserror::Error;

/// Name of the application directory that lives under the OS config root.
pub const APP_DIR_NAME: &str = ".kitshelf";
/// Folder holding user-writable drumkits inside the application directory.
pub const USER_KITS_DIR_NAME: &str = "drumkits";
/// Environment variable overriding the application base directory.
pub const CONFIG_HOME_ENV: &str = "KITSHELF_CONFIG_HOME";
/// Environment variable overriding the system drumkit root.
pub const SYSTEM_KITS_ENV: &str = "KITSHELF_SYSTEM_KITS";

static CONFIG_BASE_OVERRIDE: LazyLock<Mutex<Option<PathBuf>>> = LazyLock::new(|| Mutex::new(None));

/// Errors that can occur while resolving or preparing application directories.
#[derive(Debug, Error)]
pub enum AppDirError {
    /// No suitable base config directory could be resolved.
    #[error("No suitable base config directory available for application files")]
    NoBaseDir,
    /// Failed to create the application directory.
    #[error("Failed to create application directory at {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Return the root `.kitshelf` directory, creating it if needed.
pub fn app_root_dir() -> Result<PathBuf, AppDirError> {
    let base = config_base_dir().ok_or(AppDirError::NoBaseDir)?;
    ensure_dir(base.join(APP_DIR_NAME))
}

/// Return the logs directory inside the `.kitshelf` root, creating it if needed.
pub fn logs_dir() -> Result<PathBuf, AppDirError> {
    ensure_dir(app_root_dir()?.join("logs"))
}

/// Return the default user drumkit root, creating it if needed.
pub fn user_kits_dir() -> Result<PathBuf, AppDirError> {
    ensure_dir(app_root_dir()?.join(USER_KITS_DIR_NAME))
}

/// Platform location of the read-only system drumkits, used when neither
/// `KITSHELF_SYSTEM_KITS` nor the config names one.
///
/// Not created: a missing system root simply lists as empty.
pub fn default_system_kits_dir() -> Option<PathBuf> {
    if cfg!(unix) && !cfg!(target_os = "macos") {
        return Some(PathBuf::from("/usr/share/kitshelf").join(USER_KITS_DIR_NAME));
    }
    ProjectDirs::from("", "", "kitshelf").map(|dirs| dirs.data_dir().join(USER_KITS_DIR_NAME))
}

/// The user's home directory, used as the fallback export destination.
pub fn home_dir() -> PathBuf {
    UserDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

fn ensure_dir(path: PathBuf) -> Result<PathBuf, AppDirError> {
    std::fs::create_dir_all(&path).map_err(|source| AppDirError::CreateDir {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

fn config_base_dir() -> Option<PathBuf> {
    if let Some(path) = CONFIG_BASE_OVERRIDE
        .lock()
        .ok()
        .and_then(|guard| guard.clone())
    {
        return Some(path);
    }
    if let Ok(path) = std::env::var(CONFIG_HOME_ENV) {
        return Some(PathBuf::from(path));
    }
    BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf())
}

#[cfg(test)]
static TEST_BASE_LOCK: Mutex<()> = Mutex::new(());

/// Redirects the application base directory for the lifetime of the guard.
///
/// Holds a process-wide lock so tests touching app directories serialize.
#[cfg(test)]
pub(crate) struct ConfigBaseGuard {
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[cfg(test)]
impl ConfigBaseGuard {
    pub(crate) fn set(path: PathBuf) -> Self {
        let lock = TEST_BASE_LOCK
            .lock()
            .unwrap_or_else(|err| err.into_inner());
        let mut guard = CONFIG_BASE_OVERRIDE
            .lock()
            .expect("config base override mutex poisoned");
        *guard = Some(path);
        Self { _lock: lock }
    }
}

#[cfg(test)]
impl Drop for ConfigBaseGuard {
    fn drop(&mut self) {
        if let Ok(mut guard) = CONFIG_BASE_OVERRIDE.lock() {
            *guard = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn uses_override_for_root_dir() {
        let base = tempdir().unwrap();
        let _guard = ConfigBaseGuard::set(base.path().to_path_buf());
        let root = app_root_dir().unwrap();
        assert_eq!(root, base.path().join(APP_DIR_NAME));
        assert!(root.is_dir());
    }

    #[test]
    fn user_kits_live_under_app_root() {
        let base = tempdir().unwrap();
        let _guard = ConfigBaseGuard::set(base.path().to_path_buf());
        let kits = user_kits_dir().unwrap();
        assert_eq!(kits, base.path().join(APP_DIR_NAME).join(USER_KITS_DIR_NAME));
        assert!(kits.is_dir());
    }
}
