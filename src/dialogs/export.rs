//! Export dialog: pick a kit and a folder, write `<kit>.h2drumkit` there.

use std::path::PathBuf;

use super::Notice;
use crate::drumkit::{CatalogEntry, DrumkitStore, KitCatalog, KitRoots};
use crate::export::{ArchiveBackend, ExportError, ExportJob, ExportReport};

pub const EXPORTED: &str = "Drumkit exported.";

#[derive(Debug)]
pub struct ExportDialog {
    catalog: KitCatalog,
    preselected: Option<String>,
    /// Destination folder as typed or picked.
    pub destination: String,
    home: PathBuf,
    last_used_dir: PathBuf,
    backend: ArchiveBackend,
    notice: Option<Notice>,
}

impl ExportDialog {
    /// Open the dialog with the kit list loaded and `preselected` active when
    /// it exists.
    pub fn open(
        store: &dyn DrumkitStore,
        roots: &KitRoots,
        preselected: Option<&str>,
        start_dir: PathBuf,
        home: PathBuf,
        backend: ArchiveBackend,
    ) -> Self {
        let mut dialog = Self {
            catalog: KitCatalog::new(),
            preselected: preselected.map(str::to_string),
            destination: start_dir.display().to_string(),
            home,
            last_used_dir: start_dir,
            backend,
            notice: None,
        };
        dialog.update_kit_list(store, roots);
        dialog
    }

    /// Reload the kit list, re-applying the preselected kit.
    pub fn update_kit_list(&mut self, store: &dyn DrumkitStore, roots: &KitRoots) {
        self.catalog
            .rebuild(store, roots, self.preselected.as_deref());
    }

    pub fn kits(&self) -> &[CatalogEntry] {
        self.catalog.entries()
    }

    pub fn selected(&self) -> Option<&CatalogEntry> {
        self.catalog.active()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.catalog.active_index()
    }

    pub fn select(&mut self, index: usize) -> bool {
        self.catalog.select(index)
    }

    /// The export button only works with a destination.
    pub fn can_export(&self) -> bool {
        !self.destination.is_empty()
    }

    /// Where the folder picker should start.
    pub fn last_used_dir(&self) -> &PathBuf {
        &self.last_used_dir
    }

    /// Apply the folder picker result. Cancelling resets to the home folder.
    pub fn apply_browse_result(&mut self, picked: Option<PathBuf>) {
        match picked {
            Some(dir) => {
                self.destination = dir.display().to_string();
                self.last_used_dir = dir;
            }
            None => self.destination = self.home.display().to_string(),
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Package the selected kit into the destination folder.
    pub fn export(&mut self) -> Result<ExportReport, ExportError> {
        let result = match self.job() {
            Some(job) => job.run(self.backend),
            None => {
                self.notice = Some(Notice::error(ExportError::NoSelection.to_string()));
                return Err(ExportError::NoSelection);
            }
        };
        self.notice = Some(match &result {
            Ok(report) => Notice::info(format!("{EXPORTED}\n{}", report.archive_path.display())),
            Err(ExportError::Unsupported) => Notice::info(ExportError::Unsupported.to_string()),
            Err(err) => Notice::error(format!("Drumkit not exported.\n{err}")),
        });
        result
    }

    fn job(&self) -> Option<ExportJob> {
        let entry = self.catalog.active()?;
        Some(ExportJob::new(
            &entry.kit.path,
            &entry.kit.name,
            PathBuf::from(&self.destination),
        ))
    }
}
