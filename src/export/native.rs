use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use flate2::Compression;
use flate2::write::GzEncoder;
use tar::{Builder, EntryType, Header};

use super::{ExportError, ExportJob};

/// Permission bits stored on every entry.
const ENTRY_MODE: u32 = 0o644;

/// Write `files` as a gzip tar into `out`, each entry re-rooted under the kit
/// name. Contents are streamed, never buffered whole. `archive_path` only
/// labels errors.
pub(super) fn write_archive(
    job: &ExportJob,
    files: &[PathBuf],
    out: &File,
    archive_path: &Path,
) -> Result<(), ExportError> {
    let write_err = |source| ExportError::WriteArchive {
        path: archive_path.to_path_buf(),
        source,
    };
    let encoder = GzEncoder::new(BufWriter::new(out), Compression::default());
    let mut builder = Builder::new(encoder);

    for path in files {
        let mut source = File::open(path).map_err(|source| ExportError::ReadFile {
            path: path.clone(),
            source,
        })?;
        let metadata = source.metadata().map_err(|source| ExportError::ReadFile {
            path: path.clone(),
            source,
        })?;
        let Some(file_name) = path.file_name() else {
            continue;
        };
        let mut header = Header::new_ustar();
        header.set_size(metadata.len());
        header.set_entry_type(EntryType::Regular);
        header.set_mode(ENTRY_MODE);
        header.set_mtime(
            metadata
                .modified()
                .ok()
                .and_then(|time| time.duration_since(UNIX_EPOCH).ok())
                .map(|elapsed| elapsed.as_secs())
                .unwrap_or(0),
        );
        let entry_path = Path::new(&job.kit_name).join(file_name);
        builder
            .append_data(&mut header, &entry_path, &mut source)
            .map_err(write_err)?;
    }

    let encoder = builder.into_inner().map_err(write_err)?;
    let mut writer = encoder.finish().map_err(write_err)?;
    writer.flush().map_err(write_err)?;
    writer
        .into_inner()
        .map_err(|err| write_err(err.into_error()))?
        .sync_all()
        .map_err(write_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;
    use tar::Archive;
    use tempfile::tempdir;

    #[test]
    fn entries_carry_size_mode_and_contents() {
        let temp = tempdir().unwrap();
        let source = temp.path().join("src");
        std::fs::create_dir_all(&source).unwrap();
        std::fs::write(source.join("kick.wav"), vec![7u8; 20_000]).unwrap();
        let job = ExportJob::new(&source, "Boom", temp.path());
        let archive_path = job.archive_path();
        let out = File::create(&archive_path).unwrap();

        write_archive(&job, &[source.join("kick.wav")], &out, &archive_path).unwrap();

        let mut archive = Archive::new(GzDecoder::new(File::open(&archive_path).unwrap()));
        let mut entries = archive.entries().unwrap();
        let mut entry = entries.next().unwrap().unwrap();
        assert_eq!(entry.path().unwrap().to_str(), Some("Boom/kick.wav"));
        assert_eq!(entry.header().size().unwrap(), 20_000);
        assert_eq!(entry.header().mode().unwrap(), ENTRY_MODE);
        assert_eq!(entry.header().entry_type(), EntryType::Regular);
        let mut contents = Vec::new();
        entry.read_to_end(&mut contents).unwrap();
        assert_eq!(contents, vec![7u8; 20_000]);
        drop(entry);
        assert!(entries.next().is_none());
    }

    #[test]
    fn unreadable_sample_is_read_error() {
        let temp = tempdir().unwrap();
        let job = ExportJob::new(temp.path(), "Boom", temp.path());
        let archive_path = job.archive_path();
        let out = File::create(&archive_path).unwrap();
        let missing = temp.path().join("gone.wav");
        let err = write_archive(&job, &[missing.clone()], &out, &archive_path).unwrap_err();
        assert!(matches!(err, ExportError::ReadFile { path, .. } if path == missing));
    }
}
