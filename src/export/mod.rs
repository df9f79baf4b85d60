//! Packaging a drumkit directory into a `.h2drumkit` archive.
//!
//! An archive is a gzip-compressed tar whose only top-level directory is the
//! kit name, holding every regular file directly inside the kit directory.
//! Subdirectories are not packaged.

use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{info, warn};

use crate::drumkit::ARCHIVE_EXTENSION;

mod external;
mod native;

/// How archives are produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchiveBackend {
    /// Build the archive in-process with `tar` + `flate2`.
    #[default]
    Native,
    /// Run the system `tar` tool.
    ExternalTar,
    /// Exporting is disabled; every export reports failure.
    Unsupported,
}

impl ArchiveBackend {
    pub fn label(self) -> &'static str {
        match self {
            ArchiveBackend::Native => "native",
            ArchiveBackend::ExternalTar => "tar",
            ArchiveBackend::Unsupported => "unsupported",
        }
    }

    /// Parse the CLI spelling of a backend.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "native" => Some(ArchiveBackend::Native),
            "tar" | "external_tar" => Some(ArchiveBackend::ExternalTar),
            "unsupported" => Some(ArchiveBackend::Unsupported),
            _ => None,
        }
    }
}

/// Errors raised while exporting a kit.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Kit name must not be empty")]
    EmptyName,
    #[error("No drumkit selected.")]
    NoSelection,
    #[error("Drumkit not exported. Operation not supported.")]
    Unsupported,
    #[error("Failed to read drumkit folder {path}: {source}")]
    ReadSource {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to read sample {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to create archive {path}: {source}")]
    CreateArchive {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write archive {path}: {source}")]
    WriteArchive {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to stage {path} for tar: {source}")]
    StageFiles {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to start tar: {source}")]
    SpawnTool { source: std::io::Error },
    #[error("tar exited with {status}: {stderr}")]
    ToolFailed { status: String, stderr: String },
}

/// One export request: which folder, under what name, to where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportJob {
    pub source_dir: PathBuf,
    pub kit_name: String,
    pub destination_dir: PathBuf,
}

/// Result of a completed export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub archive_path: PathBuf,
    pub entries: usize,
}

impl ExportJob {
    pub fn new(
        source_dir: impl Into<PathBuf>,
        kit_name: impl Into<String>,
        destination_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source_dir: source_dir.into(),
            kit_name: kit_name.into(),
            destination_dir: destination_dir.into(),
        }
    }

    /// `<destination>/<kit name>.h2drumkit`
    pub fn archive_path(&self) -> PathBuf {
        self.destination_dir
            .join(format!("{}.{ARCHIVE_EXTENSION}", self.kit_name))
    }

    /// Package the kit, blocking until the archive is complete.
    ///
    /// The archive is written to a hidden file next to its destination and
    /// renamed into place on success. A failed run leaves any existing archive
    /// at the destination untouched.
    pub fn run(&self, backend: ArchiveBackend) -> Result<ExportReport, ExportError> {
        if backend == ArchiveBackend::Unsupported {
            return Err(ExportError::Unsupported);
        }
        if self.kit_name.trim().is_empty() {
            return Err(ExportError::EmptyName);
        }
        let started = Instant::now();
        let archive_path = self.archive_path();
        let files = regular_files(&self.source_dir)?;
        let result = self.write_staged(&archive_path, |staged| match backend {
            ArchiveBackend::Native => {
                native::write_archive(self, &files, staged.as_file(), &archive_path)
            }
            ArchiveBackend::ExternalTar => {
                external::write_archive(self, &files, staged.path(), &archive_path)
            }
            ArchiveBackend::Unsupported => Err(ExportError::Unsupported),
        });
        match result {
            Ok(()) => {
                info!(
                    "Exported {:?} ({} files, {} backend) to {} in {:?}",
                    self.kit_name,
                    files.len(),
                    backend.label(),
                    archive_path.display(),
                    started.elapsed()
                );
                Ok(ExportReport {
                    archive_path,
                    entries: files.len(),
                })
            }
            Err(err) => {
                warn!("Export of {:?} failed: {err}", self.kit_name);
                Err(err)
            }
        }
    }

    /// Run `write` against a temp file in the destination directory, then
    /// move it over `archive_path`. The temp file is deleted when `write` or
    /// the rename fails.
    fn write_staged(
        &self,
        archive_path: &Path,
        write: impl FnOnce(&NamedTempFile) -> Result<(), ExportError>,
    ) -> Result<(), ExportError> {
        let staged = staging_builder()
            .tempfile_in(&self.destination_dir)
            .map_err(|source| ExportError::CreateArchive {
                path: archive_path.to_path_buf(),
                source,
            })?;
        write(&staged)?;
        staged
            .persist(archive_path)
            .map_err(|err| ExportError::WriteArchive {
                path: archive_path.to_path_buf(),
                source: err.error,
            })?;
        Ok(())
    }
}

fn staging_builder() -> tempfile::Builder<'static, 'static> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(".kitshelf-export-").suffix(".part");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o644));
    }
    builder
}

/// Regular files directly inside `dir`, sorted by file name.
fn regular_files(dir: &Path) -> Result<Vec<PathBuf>, ExportError> {
    let read_err = |source| ExportError::ReadSource {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let file_type = entry.file_type().map_err(read_err)?;
        if file_type.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}
