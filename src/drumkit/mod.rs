//! Drumkit descriptors and their on-disk persistence.
//!
//! A drumkit is a directory holding a `drumkit.toml` manifest next to the
//! sample files its instruments reference. Kits come from two roots: a
//! read-only system root and a writable user root.

use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod catalog;
mod manifest;
pub mod roots;
pub mod store;

pub use catalog::{CatalogEntry, KitCatalog};
pub use manifest::MANIFEST_FILE_NAME;
pub use roots::{KitOrigin, KitRoots};
pub use store::{DrumkitStore, FsDrumkitStore, SaveRequest};

/// File extension of exported drumkit archives.
pub const ARCHIVE_EXTENSION: &str = "h2drumkit";

/// In-memory metadata record for one drumkit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Drumkit {
    /// Unique human-readable name.
    pub name: String,
    pub author: String,
    /// Free-text description.
    pub info: String,
    pub license: String,
    /// Directory the kit was loaded from.
    pub path: PathBuf,
    pub instruments: Vec<Instrument>,
    pub components: Vec<Component>,
}

impl Drumkit {
    /// Copy the editable metadata fields from `fields`.
    pub fn apply_fields(&mut self, fields: &KitFields) {
        self.name = fields.name.clone();
        self.author = fields.author.clone();
        self.info = fields.info.clone();
        self.license = fields.license.clone();
    }

    /// Snapshot the editable metadata fields.
    pub fn fields(&self) -> KitFields {
        KitFields {
            name: self.name.clone(),
            author: self.author.clone(),
            info: self.info.clone(),
            license: self.license.clone(),
        }
    }
}

/// The user-editable metadata of a kit, as staged by the dialogs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KitFields {
    pub name: String,
    pub author: String,
    pub info: String,
    pub license: String,
}

/// One playable instrument of a kit.
#[derive(Debug, Clone, PartialEq)]
pub struct Instrument {
    pub id: u32,
    pub name: String,
    /// Absolute paths of the sample files layered on this instrument.
    pub samples: Vec<PathBuf>,
}

/// A drumkit component (a named layer group shared by instruments).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub id: u32,
    pub name: String,
}

/// Errors raised while loading or saving drumkits.
#[derive(Debug, Error)]
pub enum DrumkitError {
    /// The directory holds no manifest, so it is not a drumkit.
    #[error("No drumkit.toml in {path}")]
    MissingManifest { path: PathBuf },
    /// Failed to read a manifest.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The manifest is not valid TOML or misses required fields.
    #[error("Invalid drumkit manifest at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// Failed to serialize a manifest.
    #[error("Failed to serialize drumkit manifest for {path}: {source}")]
    Serialize {
        path: PathBuf,
        source: toml::ser::Error,
    },
    /// The kit name cannot be used as a directory name.
    #[error("Invalid drumkit name {name:?}")]
    InvalidName { name: String },
    /// A kit with this name exists and overwriting was not requested.
    #[error("A drumkit named {name:?} already exists at {path}")]
    AlreadyExists { name: String, path: PathBuf },
    /// Failed to create the kit directory.
    #[error("Failed to create drumkit directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to copy a sample into the kit directory.
    #[error("Failed to copy sample {from} to {to}: {source}")]
    CopySample {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
    /// A sample path has no file name component.
    #[error("Sample path {path} has no file name")]
    SampleName { path: PathBuf },
    /// Two different samples would be stored under the same file name.
    #[error("Samples {first} and {second} would both be saved as {name:?}")]
    SampleCollision {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },
    /// Failed to write the manifest.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Check that `name` is usable as a single directory component.
pub fn validate_kit_name(name: &str) -> Result<(), DrumkitError> {
    let trimmed = name.trim();
    let invalid = trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || trimmed.contains(['/', '\\'])
        || trimmed.chars().any(char::is_control)
        || Path::new(trimmed).components().count() != 1;
    if invalid {
        return Err(DrumkitError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}
