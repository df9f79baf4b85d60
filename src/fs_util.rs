//! Small file-system helpers shared by config and drumkit persistence.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

/// Write `data` to `path` through a sibling temp file and a rename, so readers
/// never observe a half-written file.
pub(crate) fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let dir = path.parent().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("{} has no parent directory", path.display()),
        )
    })?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|err| err.error)?;
    Ok(())
}

/// True when the name starts with a dot (hidden on Unix, skipped in listings).
pub(crate) fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}
