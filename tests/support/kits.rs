use std::path::{Path, PathBuf};

use kitshelf::drumkit::{DrumkitStore, FsDrumkitStore, Instrument, KitFields, SaveRequest};

use super::wav::write_test_wav;

/// Save a kit named `name` under `root` with one instrument per sample name.
pub fn write_kit(root: &Path, name: &str, samples: &[&str]) -> PathBuf {
    let staging = root.join(format!(".staging-{name}"));
    let instruments: Vec<Instrument> = samples
        .iter()
        .enumerate()
        .map(|(id, sample)| {
            let path = staging.join(sample);
            write_test_wav(&path, &[0.0, 0.25, -0.25, 0.5]);
            Instrument {
                id: id as u32,
                name: sample.trim_end_matches(".wav").to_string(),
                samples: vec![path],
            }
        })
        .collect();
    let fields = KitFields {
        name: name.to_string(),
        author: "Test".into(),
        info: String::new(),
        license: "CC0".into(),
    };
    let dir = FsDrumkitStore::new(root)
        .save(
            &SaveRequest {
                fields: &fields,
                instruments: &instruments,
                components: &[],
            },
            false,
        )
        .expect("save kit");
    std::fs::remove_dir_all(&staging).expect("remove staging");
    dir
}
