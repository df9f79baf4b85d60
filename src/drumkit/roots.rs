use std::path::{Path, PathBuf};

use tracing::debug;

use crate::fs_util::is_hidden;

/// Which root a kit was found under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KitOrigin {
    /// Read-only kits shipped with the installation.
    System,
    /// Kits created or imported by the user.
    User,
}

impl KitOrigin {
    pub fn label(self) -> &'static str {
        match self {
            KitOrigin::System => "System kits",
            KitOrigin::User => "User kits",
        }
    }
}

/// The two directories drumkits are enumerated from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KitRoots {
    system: PathBuf,
    user: PathBuf,
}

impl KitRoots {
    pub fn new(system: impl Into<PathBuf>, user: impl Into<PathBuf>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }

    pub fn system(&self) -> &Path {
        &self.system
    }

    pub fn user(&self) -> &Path {
        &self.user
    }

    pub fn root(&self, origin: KitOrigin) -> &Path {
        match origin {
            KitOrigin::System => &self.system,
            KitOrigin::User => &self.user,
        }
    }

    /// Entry names directly under the system root.
    pub fn list_system(&self) -> Vec<String> {
        list_kit_dirs(&self.system)
    }

    /// Entry names directly under the user root.
    pub fn list_user(&self) -> Vec<String> {
        list_kit_dirs(&self.user)
    }

    /// Find the directory of a kit by directory name, user root first.
    pub fn locate(&self, name: &str) -> Option<PathBuf> {
        [&self.user, &self.system]
            .into_iter()
            .map(|root| root.join(name))
            .find(|candidate| candidate.is_dir())
    }
}

/// Immediate, non-hidden subdirectories of `root`, sorted by name.
///
/// A missing or unreadable root lists as empty.
fn list_kit_dirs(root: &Path) -> Vec<String> {
    let entries = match std::fs::read_dir(root) {
        Ok(entries) => entries,
        Err(err) => {
            debug!("Skipping drumkit root {}: {err}", root.display());
            return Vec::new();
        }
    };
    let mut names = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| !is_hidden(&entry.file_name()))
        .filter(|entry| entry.path().is_dir())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect::<Vec<_>>();
    names.sort();
    names
}
