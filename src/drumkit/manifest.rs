//! `drumkit.toml` reading and writing.
//!
//! Sample paths are stored relative to the kit directory and resolved to
//! absolute paths on load.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{Component, Drumkit, DrumkitError, Instrument};

/// Name of the manifest file inside every kit directory.
pub const MANIFEST_FILE_NAME: &str = "drumkit.toml";

#[derive(Debug, Serialize, Deserialize)]
struct ManifestFile {
    name: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    info: String,
    #[serde(default)]
    license: String,
    #[serde(default, rename = "instrument", skip_serializing_if = "Vec::is_empty")]
    instruments: Vec<InstrumentEntry>,
    #[serde(default, rename = "component", skip_serializing_if = "Vec::is_empty")]
    components: Vec<ComponentEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct InstrumentEntry {
    id: u32,
    name: String,
    #[serde(default)]
    samples: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ComponentEntry {
    id: u32,
    name: String,
}

pub(super) fn manifest_path(kit_dir: &Path) -> PathBuf {
    kit_dir.join(MANIFEST_FILE_NAME)
}

pub(super) fn read(kit_dir: &Path) -> Result<Drumkit, DrumkitError> {
    let path = manifest_path(kit_dir);
    if !path.is_file() {
        return Err(DrumkitError::MissingManifest {
            path: kit_dir.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(&path).map_err(|source| DrumkitError::Read {
        path: path.clone(),
        source,
    })?;
    let file: ManifestFile =
        toml::from_str(&text).map_err(|source| DrumkitError::Parse { path, source })?;
    if file.name.trim().is_empty() {
        return Err(DrumkitError::InvalidName { name: file.name });
    }
    Ok(Drumkit {
        name: file.name,
        author: file.author,
        info: file.info,
        license: file.license,
        path: kit_dir.to_path_buf(),
        instruments: file
            .instruments
            .into_iter()
            .map(|entry| Instrument {
                id: entry.id,
                name: entry.name,
                samples: entry
                    .samples
                    .iter()
                    .map(|sample| kit_dir.join(sample))
                    .collect(),
            })
            .collect(),
        components: file
            .components
            .into_iter()
            .map(|entry| Component {
                id: entry.id,
                name: entry.name,
            })
            .collect(),
    })
}

/// Render the manifest text; sample paths are reduced to their file names.
pub(super) fn render(
    kit_dir: &Path,
    fields: &super::KitFields,
    instruments: &[Instrument],
    components: &[Component],
) -> Result<String, DrumkitError> {
    let instruments = instruments
        .iter()
        .map(|instrument| {
            let samples = instrument
                .samples
                .iter()
                .map(|sample| sample_file_name(sample))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(InstrumentEntry {
                id: instrument.id,
                name: instrument.name.clone(),
                samples,
            })
        })
        .collect::<Result<Vec<_>, DrumkitError>>()?;
    let file = ManifestFile {
        name: fields.name.clone(),
        author: fields.author.clone(),
        info: fields.info.clone(),
        license: fields.license.clone(),
        instruments,
        components: components
            .iter()
            .map(|component| ComponentEntry {
                id: component.id,
                name: component.name.clone(),
            })
            .collect(),
    };
    toml::to_string_pretty(&file).map_err(|source| DrumkitError::Serialize {
        path: manifest_path(kit_dir),
        source,
    })
}

pub(super) fn sample_file_name(sample: &Path) -> Result<String, DrumkitError> {
    sample
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| DrumkitError::SampleName {
            path: sample.to_path_buf(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drumkit::KitFields;
    use tempfile::tempdir;

    #[test]
    fn read_resolves_samples_against_kit_dir() {
        let dir = tempdir().unwrap();
        std::fs::write(
            manifest_path(dir.path()),
            r#"
name = "Boom"
author = "Someone"

[[instrument]]
id = 0
name = "Kick"
samples = ["kick.wav", "kick_soft.wav"]

[[component]]
id = 0
name = "Main"
"#,
        )
        .unwrap();

        let kit = read(dir.path()).unwrap();
        assert_eq!(kit.name, "Boom");
        assert_eq!(kit.author, "Someone");
        assert_eq!(kit.license, "");
        assert_eq!(kit.path, dir.path());
        assert_eq!(
            kit.instruments[0].samples,
            vec![dir.path().join("kick.wav"), dir.path().join("kick_soft.wav")]
        );
        assert_eq!(kit.components[0].name, "Main");
    }

    #[test]
    fn directories_without_manifest_are_not_kits() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            read(dir.path()),
            Err(DrumkitError::MissingManifest { .. })
        ));
    }

    #[test]
    fn blank_names_are_rejected() {
        let dir = tempdir().unwrap();
        std::fs::write(manifest_path(dir.path()), "name = \"  \"\n").unwrap();
        assert!(matches!(
            read(dir.path()),
            Err(DrumkitError::InvalidName { .. })
        ));
    }

    #[test]
    fn render_stores_sample_file_names_only() {
        let dir = tempdir().unwrap();
        let fields = KitFields {
            name: "Boom".into(),
            ..KitFields::default()
        };
        let instruments = vec![Instrument {
            id: 3,
            name: "Snare".into(),
            samples: vec![PathBuf::from("/elsewhere/snare.wav")],
        }];
        let text = render(dir.path(), &fields, &instruments, &[]).unwrap();
        assert!(text.contains("\"snare.wav\""));
        assert!(!text.contains("elsewhere"));
        assert!(!text.contains("[[component]]"));
    }
}
