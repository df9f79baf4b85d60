//! Application controller bridging the drumkit model to the egui renderer.

use std::path::PathBuf;

use rfd::FileDialog;
use tracing::{info, warn};

use crate::app_dirs;
use crate::browser::KitBrowser;
use crate::config::{self, ConfigError, Settings};
use crate::dialogs::properties::KitHost;
use crate::dialogs::{ExportDialog, PropertiesDialog, PropertiesOutcome, SaveDialog, SaveOutcome};
use crate::drumkit::{FsDrumkitStore, KitRoots};
use crate::session::Session;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Idle,
    Busy,
    Info,
    Warning,
    Error,
}

/// Footer text and its badge tone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub tone: StatusTone,
}

impl StatusLine {
    fn idle() -> Self {
        Self {
            text: "Select a drumkit to get started".into(),
            tone: StatusTone::Idle,
        }
    }
}

const RENAME_PENDING: &str = "Answer the rename prompt first";

/// Where a requested export is in the frame cycle. The busy status gets one
/// full painted frame before the blocking export starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ExportPhase {
    Requested,
    Painting,
    Due,
}

/// Maintains app state and bridges core logic to the egui UI.
pub struct KitshelfController {
    settings: Settings,
    config_path: PathBuf,
    roots: KitRoots,
    store: FsDrumkitStore,
    pub session: Session,
    pub browser: KitBrowser,
    pub export_dialog: Option<ExportDialog>,
    pub properties_dialog: Option<PropertiesDialog>,
    pub save_dialog: Option<SaveDialog>,
    pub status: StatusLine,
    export_phase: Option<ExportPhase>,
}

impl KitshelfController {
    /// Load persisted config from the app root and scan both kit roots.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config::config_path()?;
        let settings = config::load_from_path(&path)?;
        Self::with_settings(settings, path)
    }

    /// Build a controller from explicit settings; `config_path` is where
    /// changed settings are written back.
    pub fn with_settings(settings: Settings, config_path: PathBuf) -> Result<Self, ConfigError> {
        let roots = settings.kit_roots()?;
        info!(
            "Drumkit roots: system {}, user {}",
            roots.system().display(),
            roots.user().display()
        );
        let store = FsDrumkitStore::new(roots.user());
        let mut controller = Self {
            settings,
            config_path,
            roots,
            store,
            session: Session::new(),
            browser: KitBrowser::new(),
            export_dialog: None,
            properties_dialog: None,
            save_dialog: None,
            status: StatusLine::idle(),
            export_phase: None,
        };
        controller.refresh_browser();
        Ok(controller)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn roots(&self) -> &KitRoots {
        &self.roots
    }

    pub fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.status = StatusLine {
            text: text.into(),
            tone,
        };
    }

    /// True while a properties save waits for the rename prompt. Anything
    /// that would replace the dialog or the loaded kit is refused meanwhile.
    pub fn rename_pending(&self) -> bool {
        self.properties_dialog
            .as_ref()
            .is_some_and(PropertiesDialog::awaiting_rename_confirmation)
    }

    fn refuse_while_renaming(&mut self) -> bool {
        if self.rename_pending() {
            self.set_status(RENAME_PENDING, StatusTone::Warning);
            return true;
        }
        false
    }

    pub fn refresh_browser(&mut self) {
        if self.refuse_while_renaming() {
            return;
        }
        self.browser.refresh(&self.store, &self.roots);
        let count = self.browser.entries().len();
        self.set_status(format!("{count} drumkits found"), StatusTone::Info);
    }

    /// Make the browser selection the loaded kit.
    pub fn load_selected_kit(&mut self) {
        if self.refuse_while_renaming() {
            return;
        }
        let Some(entry) = self.browser.selected() else {
            self.set_status("No drumkit selected", StatusTone::Warning);
            return;
        };
        let name = entry.kit.name.clone();
        self.session.activate(&entry.kit);
        self.set_status(format!("Loaded drumkit {name}"), StatusTone::Info);
    }

    pub fn open_export_dialog(&mut self) {
        if self.refuse_while_renaming() || self.export_pending() {
            return;
        }
        let preselected = self.browser.selected().map(|entry| entry.kit.name.clone());
        self.export_dialog = Some(ExportDialog::open(
            &self.store,
            &self.roots,
            preselected.as_deref(),
            self.settings.export_dir_or_home(),
            app_dirs::home_dir(),
            self.settings.archive_backend,
        ));
    }

    /// Show the native folder picker for the export destination.
    pub fn browse_export_destination(&mut self) {
        let Some(dialog) = self.export_dialog.as_ref() else {
            return;
        };
        let picked = FileDialog::new()
            .set_directory(dialog.last_used_dir())
            .pick_folder();
        self.apply_export_destination(picked);
    }

    /// Apply a folder picker result and remember a picked folder.
    pub fn apply_export_destination(&mut self, picked: Option<PathBuf>) {
        let Some(dialog) = self.export_dialog.as_mut() else {
            return;
        };
        dialog.apply_browse_result(picked.clone());
        if let Some(dir) = picked {
            self.settings.last_export_dir = Some(dir);
            self.persist_settings();
        }
    }

    /// Mark the export as busy; it runs once that status has been painted.
    /// See [`Self::end_frame`] and [`Self::run_due_export`].
    pub fn request_export(&mut self) {
        if self.export_pending() {
            return;
        }
        if !self.export_dialog.as_ref().is_some_and(ExportDialog::can_export) {
            return;
        }
        self.set_status("Exporting drumkit", StatusTone::Busy);
        self.export_phase = Some(ExportPhase::Requested);
    }

    pub fn export_pending(&self) -> bool {
        self.export_phase.is_some()
    }

    /// Advance a requested export by one rendered frame.
    pub fn end_frame(&mut self) {
        self.export_phase = match self.export_phase {
            Some(ExportPhase::Requested) => Some(ExportPhase::Painting),
            Some(ExportPhase::Painting | ExportPhase::Due) => Some(ExportPhase::Due),
            None => None,
        };
    }

    /// Run a requested export whose busy status has been on screen.
    pub fn run_due_export(&mut self) {
        if self.export_phase != Some(ExportPhase::Due) {
            return;
        }
        self.export_phase = None;
        self.run_export();
    }

    /// Export the dialog selection right away.
    pub fn run_export(&mut self) {
        let Some(dialog) = self.export_dialog.as_mut() else {
            return;
        };
        if !dialog.can_export() {
            return;
        }
        match dialog.export() {
            Ok(report) => self.set_status(
                format!("Exported {}", report.archive_path.display()),
                StatusTone::Info,
            ),
            Err(err) => self.set_status(err.to_string(), StatusTone::Error),
        }
    }

    pub fn close_export_dialog(&mut self) {
        if self.export_phase.take().is_some() {
            self.set_status("Export cancelled", StatusTone::Idle);
        }
        self.export_dialog = None;
    }

    /// Open the properties dialog for the browser selection. The loaded kit
    /// is restored after saving.
    pub fn open_properties_dialog(&mut self) {
        if self.refuse_while_renaming() {
            return;
        }
        let Some(entry) = self.browser.selected() else {
            self.set_status("No drumkit selected", StatusTone::Warning);
            return;
        };
        let previous = self.session.active_kit().cloned();
        self.properties_dialog = Some(PropertiesDialog::open(entry.kit.clone(), previous));
    }

    pub fn save_properties(&mut self) {
        let Some(mut dialog) = self.properties_dialog.take() else {
            return;
        };
        let outcome = dialog.save(&mut self.kit_host());
        self.finish_properties(dialog, outcome);
    }

    /// Answer the rename confirmation prompt.
    pub fn confirm_rename(&mut self, accepted: bool) {
        let Some(mut dialog) = self.properties_dialog.take() else {
            return;
        };
        let outcome = dialog.confirm_rename(&mut self.kit_host(), accepted);
        self.finish_properties(dialog, outcome);
    }

    fn finish_properties(&mut self, dialog: PropertiesDialog, outcome: PropertiesOutcome) {
        match outcome {
            PropertiesOutcome::Saved { .. } => {
                self.set_status(
                    format!("Saved drumkit {}", dialog.kit().name),
                    StatusTone::Info,
                );
                return;
            }
            PropertiesOutcome::Failed { .. } => {
                self.set_status("Saving of this drumkit failed", StatusTone::Error);
            }
            PropertiesOutcome::Cancelled => {
                self.set_status("Rename cancelled", StatusTone::Idle);
            }
            PropertiesOutcome::Refused | PropertiesOutcome::AwaitingRenameConfirmation => {}
        }
        self.properties_dialog = Some(dialog);
    }

    /// Close the properties dialog. An unanswered rename prompt counts as
    /// declined, so the loaded kit is rolled back first.
    pub fn close_properties_dialog(&mut self) {
        if self.rename_pending() {
            self.confirm_rename(false);
        }
        self.properties_dialog = None;
    }

    pub fn open_save_dialog(&mut self) {
        if self.refuse_while_renaming() {
            return;
        }
        self.save_dialog = Some(SaveDialog::new());
    }

    pub fn save_as(&mut self) {
        if self.refuse_while_renaming() {
            return;
        }
        let Some(dialog) = self.save_dialog.as_mut() else {
            return;
        };
        match dialog.save(&self.store, &self.session) {
            SaveOutcome::Saved(dir) => {
                self.save_dialog = None;
                self.browser.refresh(&self.store, &self.roots);
                self.set_status(format!("Saved drumkit to {}", dir.display()), StatusTone::Info);
            }
            SaveOutcome::Failed => {
                self.set_status("Saving of this drumkit failed", StatusTone::Error);
            }
            SaveOutcome::Rejected => {}
        }
    }

    pub fn close_save_dialog(&mut self) {
        self.save_dialog = None;
    }

    fn kit_host(&mut self) -> KitHost<'_> {
        KitHost {
            store: &self.store,
            roots: &self.roots,
            session: &mut self.session,
            browser: &mut self.browser,
        }
    }

    fn persist_settings(&mut self) {
        if let Err(err) = config::save_to_path(&self.settings, &self.config_path) {
            warn!("Failed to save settings: {err}");
            self.set_status(format!("Failed to save settings: {err}"), StatusTone::Warning);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drumkit::{DrumkitStore, Instrument, KitFields, SaveRequest};
    use crate::export::ArchiveBackend;
    use tempfile::{TempDir, tempdir};

    fn controller(kits: &[&str]) -> (TempDir, KitshelfController) {
        let temp = tempdir().unwrap();
        let settings = Settings {
            system_kits_dir: Some(temp.path().join("sys")),
            user_kits_dir: Some(temp.path().join("usr")),
            archive_backend: ArchiveBackend::Native,
            last_export_dir: Some(temp.path().join("out")),
        };
        std::fs::create_dir_all(temp.path().join("out")).unwrap();
        let store = FsDrumkitStore::new(temp.path().join("usr"));
        for name in kits {
            let sample = temp.path().join(format!("{name}.wav"));
            std::fs::write(&sample, name.as_bytes()).unwrap();
            let fields = KitFields {
                name: name.to_string(),
                ..KitFields::default()
            };
            let instruments = vec![Instrument {
                id: 0,
                name: "Kick".into(),
                samples: vec![sample],
            }];
            store
                .save(
                    &SaveRequest {
                        fields: &fields,
                        instruments: &instruments,
                        components: &[],
                    },
                    false,
                )
                .unwrap();
        }
        let controller =
            KitshelfController::with_settings(settings, temp.path().join("config.toml")).unwrap();
        (temp, controller)
    }

    #[test]
    fn startup_lists_kits_and_selects_first() {
        let (_temp, controller) = controller(&["Alpha", "Beta"]);
        assert_eq!(controller.browser.entries().len(), 2);
        assert_eq!(controller.browser.selected().unwrap().kit.name, "Alpha");
        assert_eq!(controller.status.text, "2 drumkits found");
    }

    #[test]
    fn export_dialog_preselects_browser_selection() {
        let (temp, mut controller) = controller(&["Alpha", "Beta"]);
        controller.browser.select_name("Beta");
        controller.open_export_dialog();
        controller.run_export();

        assert!(temp.path().join("out").join("Beta.h2drumkit").is_file());
        assert_eq!(controller.status.tone, StatusTone::Info);
        assert!(controller.export_dialog.is_some());
    }

    #[test]
    fn requested_export_stays_busy_until_painted() {
        let (temp, mut controller) = controller(&["Alpha"]);
        let archive = temp.path().join("out").join("Alpha.h2drumkit");
        controller.open_export_dialog();

        controller.request_export();
        assert_eq!(controller.status.tone, StatusTone::Busy);
        controller.run_due_export();
        assert!(!archive.exists());

        controller.end_frame();
        controller.run_due_export();
        assert_eq!(controller.status.tone, StatusTone::Busy);
        assert!(!archive.exists());

        controller.end_frame();
        controller.run_due_export();
        assert!(archive.is_file());
        assert!(!controller.export_pending());
        assert_eq!(controller.status.tone, StatusTone::Info);
    }

    #[test]
    fn closing_export_dialog_drops_requested_export() {
        let (temp, mut controller) = controller(&["Alpha"]);
        controller.open_export_dialog();
        controller.request_export();
        controller.close_export_dialog();
        controller.end_frame();
        controller.end_frame();
        controller.run_due_export();

        assert!(!temp.path().join("out").join("Alpha.h2drumkit").exists());
        assert_eq!(controller.status.tone, StatusTone::Idle);
    }

    #[test]
    fn picked_destination_is_persisted() {
        let (temp, mut controller) = controller(&["Alpha"]);
        controller.open_export_dialog();
        let picked = temp.path().join("picked");
        controller.apply_export_destination(Some(picked.clone()));

        let saved = config::load_from_path(&temp.path().join("config.toml")).unwrap();
        assert_eq!(saved.last_export_dir, Some(picked));
    }

    #[test]
    fn renaming_other_kit_keeps_loaded_kit() {
        let (_temp, mut controller) = controller(&["Alpha", "Beta"]);
        controller.browser.select_name("Alpha");
        controller.load_selected_kit();
        controller.browser.select_name("Beta");
        controller.open_properties_dialog();
        controller.properties_dialog.as_mut().unwrap().fields.name = "Gamma".into();

        controller.save_properties();
        assert!(
            controller
                .properties_dialog
                .as_ref()
                .unwrap()
                .awaiting_rename_confirmation()
        );
        controller.confirm_rename(true);

        assert!(controller.properties_dialog.is_none());
        assert_eq!(controller.session.active_kit_name(), Some("Alpha"));
        assert!(controller.browser.find("Gamma").is_some());
        assert!(controller.browser.find("Beta").is_some());
    }

    /// Alpha loaded, Beta renamed to Gamma and waiting on the prompt.
    fn pending_rename(kits: &[&str]) -> (TempDir, KitshelfController) {
        let (temp, mut controller) = controller(kits);
        controller.browser.select_name("Alpha");
        controller.load_selected_kit();
        controller.browser.select_name("Beta");
        controller.open_properties_dialog();
        controller.properties_dialog.as_mut().unwrap().fields.name = "Gamma".into();
        controller.save_properties();
        assert!(controller.rename_pending());
        (temp, controller)
    }

    #[test]
    fn pending_rename_blocks_replacing_the_dialog() {
        let (_temp, mut controller) = pending_rename(&["Alpha", "Beta"]);

        controller.open_properties_dialog();
        controller.open_export_dialog();
        controller.open_save_dialog();

        assert!(controller.rename_pending());
        assert!(controller.export_dialog.is_none());
        assert!(controller.save_dialog.is_none());
        assert_eq!(controller.status.tone, StatusTone::Warning);

        controller.confirm_rename(false);
        assert_eq!(controller.session.active_kit_name(), Some("Alpha"));
        assert!(!controller.session.is_modified());
    }

    #[test]
    fn pending_rename_blocks_loading_another_kit() {
        let (_temp, mut controller) = pending_rename(&["Alpha", "Beta", "Delta"]);
        controller.browser.select_name("Delta");

        controller.load_selected_kit();
        assert_eq!(controller.status.text, RENAME_PENDING);

        controller.confirm_rename(false);
        assert_eq!(controller.session.active_kit_name(), Some("Alpha"));
    }

    #[test]
    fn closing_during_rename_prompt_rolls_back() {
        let (_temp, mut controller) = pending_rename(&["Alpha", "Beta"]);

        controller.close_properties_dialog();

        assert!(controller.properties_dialog.is_none());
        assert_eq!(controller.session.active_kit_name(), Some("Alpha"));
        assert!(controller.browser.find("Gamma").is_none());
    }

    #[test]
    fn save_as_refreshes_browser_and_closes() {
        let (_temp, mut controller) = controller(&["Alpha"]);
        controller.load_selected_kit();
        controller.open_save_dialog();
        controller.save_dialog.as_mut().unwrap().fields.name = "Copy".into();

        controller.save_as();

        assert!(controller.save_dialog.is_none());
        assert!(controller.browser.find("Copy").is_some());
        assert_eq!(controller.browser.selected().unwrap().kit.name, "Alpha");
    }

    #[test]
    fn save_as_without_name_keeps_dialog_open() {
        let (_temp, mut controller) = controller(&["Alpha"]);
        controller.open_save_dialog();
        controller.save_as();
        assert!(controller.save_dialog.as_ref().unwrap().notice().is_some());
    }
}
