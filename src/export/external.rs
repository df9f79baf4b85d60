use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use super::{ExportError, ExportJob};

/// Build the archive with the system `tar`, writing into `out`.
///
/// `tar` names entries after the directory it is given, so the files are
/// first linked (or copied) into `<scratch>/<kit name>/` and archived from
/// there. Only the listed regular files are passed, so subdirectories stay
/// out.
pub(super) fn write_archive(
    job: &ExportJob,
    files: &[PathBuf],
    out: &Path,
    archive_path: &Path,
) -> Result<(), ExportError> {
    let scratch = tempfile::Builder::new()
        .prefix(".kitshelf-tar-")
        .tempdir()
        .map_err(|source| ExportError::StageFiles {
            path: std::env::temp_dir(),
            source,
        })?;
    let kit_root = Path::new(&job.kit_name);
    let staged_dir = scratch.path().join(kit_root);
    fs::create_dir_all(&staged_dir).map_err(|source| ExportError::StageFiles {
        path: staged_dir.clone(),
        source,
    })?;

    let mut entries = Vec::with_capacity(files.len());
    for file in files {
        let Some(name) = file.file_name() else {
            continue;
        };
        let staged = staged_dir.join(name);
        link_or_copy(file, &staged)?;
        entries.push(kit_root.join(name));
    }

    let out = std::path::absolute(out).map_err(|source| ExportError::CreateArchive {
        path: archive_path.to_path_buf(),
        source,
    })?;
    let mut command = Command::new("tar");
    command
        .arg("-czf")
        .arg(&out)
        .arg("-C")
        .arg(scratch.path())
        .arg("--")
        .args(&entries);
    debug!("Running {command:?}");

    let output = command
        .stdin(Stdio::null())
        .output()
        .map_err(|source| ExportError::SpawnTool { source })?;
    if !output.status.success() {
        return Err(ExportError::ToolFailed {
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(())
}

fn link_or_copy(from: &Path, to: &Path) -> Result<(), ExportError> {
    if fs::hard_link(from, to).is_ok() {
        return Ok(());
    }
    fs::copy(from, to)
        .map(drop)
        .map_err(|source| ExportError::ReadFile {
            path: from.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn link_or_copy_keeps_contents() {
        let temp = tempdir().unwrap();
        let from = temp.path().join("kick.wav");
        std::fs::write(&from, b"kick").unwrap();
        let to = temp.path().join("staged.wav");
        link_or_copy(&from, &to).unwrap();
        assert_eq!(std::fs::read(&to).unwrap(), b"kick");
    }

    #[test]
    fn missing_file_is_read_error() {
        let temp = tempdir().unwrap();
        let from = temp.path().join("gone.wav");
        let err = link_or_copy(&from, &temp.path().join("staged.wav")).unwrap_err();
        assert!(matches!(err, ExportError::ReadFile { path, .. } if path == from));
    }
}
