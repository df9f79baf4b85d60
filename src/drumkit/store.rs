use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::{Component, Drumkit, DrumkitError, Instrument, KitFields, manifest, validate_kit_name};
use crate::fs_util::atomic_write;

/// Everything the persistence layer needs to write a kit.
#[derive(Debug, Clone, Copy)]
pub struct SaveRequest<'a> {
    pub fields: &'a KitFields,
    pub instruments: &'a [Instrument],
    pub components: &'a [Component],
}

/// Loads and saves drumkits.
pub trait DrumkitStore {
    /// Load the kit stored in `dir`.
    fn load(&self, dir: &Path) -> Result<Drumkit, DrumkitError>;

    /// Save a kit under `request.fields.name`, returning its directory.
    ///
    /// Without `overwrite` an existing kit of the same name is an error.
    fn save(&self, request: &SaveRequest<'_>, overwrite: bool) -> Result<PathBuf, DrumkitError>;
}

/// Stores kits as directories under the user drumkit root.
#[derive(Debug, Clone)]
pub struct FsDrumkitStore {
    user_root: PathBuf,
}

impl FsDrumkitStore {
    pub fn new(user_root: impl Into<PathBuf>) -> Self {
        Self {
            user_root: user_root.into(),
        }
    }

    /// Directory a kit with this name is saved to.
    pub fn kit_dir(&self, name: &str) -> PathBuf {
        self.user_root.join(name)
    }
}

impl DrumkitStore for FsDrumkitStore {
    fn load(&self, dir: &Path) -> Result<Drumkit, DrumkitError> {
        manifest::read(dir)
    }

    fn save(&self, request: &SaveRequest<'_>, overwrite: bool) -> Result<PathBuf, DrumkitError> {
        let name = request.fields.name.as_str();
        validate_kit_name(name)?;
        let dir = self.kit_dir(name);
        if dir.exists() && !overwrite {
            return Err(DrumkitError::AlreadyExists {
                name: name.to_string(),
                path: dir,
            });
        }
        let samples = sample_targets(request.instruments)?;
        std::fs::create_dir_all(&dir).map_err(|source| DrumkitError::CreateDir {
            path: dir.clone(),
            source,
        })?;
        for (file_name, sample) in &samples {
            copy_sample_into(&dir.join(file_name), sample)?;
        }
        let text = manifest::render(&dir, request.fields, request.instruments, request.components)?;
        let manifest_path = manifest::manifest_path(&dir);
        atomic_write(&manifest_path, text.as_bytes()).map_err(|source| DrumkitError::Write {
            path: manifest_path,
            source,
        })?;
        info!(
            "Saved drumkit {name:?} with {} instruments to {}",
            request.instruments.len(),
            dir.display()
        );
        Ok(dir)
    }
}

/// Kit file name -> source sample. Samples are stored flat in the kit
/// directory, so two distinct files sharing a name cannot both be kept.
fn sample_targets(instruments: &[Instrument]) -> Result<BTreeMap<String, &Path>, DrumkitError> {
    let mut targets: BTreeMap<String, &Path> = BTreeMap::new();
    for sample in instruments.iter().flat_map(|instrument| &instrument.samples) {
        let name = manifest::sample_file_name(sample)?;
        match targets.get(&name).copied() {
            Some(first) if first == sample.as_path() || same_file(first, sample) => {}
            Some(first) => {
                return Err(DrumkitError::SampleCollision {
                    name,
                    first: first.to_path_buf(),
                    second: sample.clone(),
                });
            }
            None => {
                targets.insert(name, sample.as_path());
            }
        }
    }
    Ok(targets)
}

fn copy_sample_into(target: &Path, sample: &Path) -> Result<(), DrumkitError> {
    if same_file(sample, target) {
        return Ok(());
    }
    debug!("Copying sample {} to {}", sample.display(), target.display());
    std::fs::copy(sample, &target).map_err(|source| DrumkitError::CopySample {
        from: sample.to_path_buf(),
        to: target.to_path_buf(),
        source,
    })?;
    Ok(())
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
