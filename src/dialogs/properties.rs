//! Drumkit properties dialog: edit metadata and save it back.

use tracing::{info, warn};

use super::Notice;
use crate::browser::KitBrowser;
use crate::drumkit::{Drumkit, DrumkitStore, KitFields, KitRoots, SaveRequest};
use crate::session::Session;

pub const SAVE_INTO_ACTIVE_REFUSED: &str = "This is not possible, you can only save changes \
inside instruments to the current loaded sound library";
pub const RENAME_WARNING: &str = "Warning! Changing the drumkit name will result in creating a \
new drumkit with this name.\nAre you sure?";

/// Services a properties save touches.
pub struct KitHost<'a> {
    pub store: &'a dyn DrumkitStore,
    pub roots: &'a KitRoots,
    pub session: &'a mut Session,
    pub browser: &'a mut KitBrowser,
}

/// What a save attempt ended in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertiesOutcome {
    /// "Save into active kit" was requested for a kit that is not loaded.
    Refused,
    /// The name changed; waiting on [`PropertiesDialog::confirm_rename`].
    AwaitingRenameConfirmation,
    /// The user declined the rename, or there was nothing to confirm.
    Cancelled,
    /// Persisted. `reloaded` tells whether the browser was refreshed.
    Saved { reloaded: bool },
    /// Persistence failed; the notice holds the reason and the dialog stays
    /// open for a retry.
    Failed { reloaded: bool },
}

#[derive(Debug)]
struct PendingRename {
    /// Session state from before the kit was activated for saving.
    before_activation: Option<Session>,
}

/// Controller for the properties dialog of one kit.
#[derive(Debug)]
pub struct PropertiesDialog {
    kit: Drumkit,
    previous: Option<Drumkit>,
    original_name: String,
    pub fields: KitFields,
    /// Persist the live instrument edits of the loaded kit.
    pub save_into_active: bool,
    pending: Option<PendingRename>,
    notice: Option<Notice>,
}

impl PropertiesDialog {
    /// Open the dialog for `kit`. `previous` is the kit to bring back after
    /// saving, normally whatever was loaded when the dialog opened.
    pub fn open(kit: Drumkit, previous: Option<Drumkit>) -> Self {
        Self {
            original_name: kit.name.clone(),
            fields: kit.fields(),
            kit,
            previous,
            save_into_active: false,
            pending: None,
            notice: None,
        }
    }

    /// The descriptor being edited, with any committed edits applied.
    pub fn kit(&self) -> &Drumkit {
        &self.kit
    }

    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn awaiting_rename_confirmation(&self) -> bool {
        self.pending.is_some()
    }

    /// Start a save.
    ///
    /// A kit that is not loaded is activated first so the save reflects its
    /// own instruments. A changed name pauses for confirmation.
    pub fn save(&mut self, host: &mut KitHost<'_>) -> PropertiesOutcome {
        self.pending = None;
        let mut reload = false;
        let mut before_activation = None;
        if self.save_into_active {
            if !host.session.is_active(&self.kit.name) {
                self.save_into_active = false;
                self.notice = Some(Notice::info(SAVE_INTO_ACTIVE_REFUSED));
                return PropertiesOutcome::Refused;
            }
            reload = true;
        } else if !host.session.is_active(&self.kit.name) {
            before_activation = Some(host.session.clone());
            host.session.activate(&self.kit);
            host.session.mark_modified();
        }

        if self.fields.name != self.original_name {
            self.pending = Some(PendingRename { before_activation });
            return PropertiesOutcome::AwaitingRenameConfirmation;
        }
        self.commit(host, reload)
    }

    /// Answer the rename prompt. Declining restores the session as it was
    /// before the save started.
    pub fn confirm_rename(&mut self, host: &mut KitHost<'_>, accepted: bool) -> PropertiesOutcome {
        let Some(pending) = self.pending.take() else {
            return PropertiesOutcome::Cancelled;
        };
        if !accepted {
            if let Some(snapshot) = pending.before_activation {
                *host.session = snapshot;
            }
            return PropertiesOutcome::Cancelled;
        }
        self.commit(host, true)
    }

    fn commit(&mut self, host: &mut KitHost<'_>, reload: bool) -> PropertiesOutcome {
        let saved = {
            let request = SaveRequest {
                fields: &self.fields,
                instruments: host.session.instruments(),
                components: host.session.components(),
            };
            host.store.save(&request, true)
        };
        let failed = match &saved {
            Ok(dir) => {
                info!("Saved properties of {:?} to {}", self.fields.name, dir.display());
                false
            }
            Err(err) => {
                warn!("Saving drumkit {:?} failed: {err}", self.fields.name);
                self.notice = Some(Notice::error(format!(
                    "Saving of this drumkit failed.\n{err}"
                )));
                true
            }
        };

        // The descriptor follows the edit even when persistence failed.
        if !self.fields.name.is_empty() {
            host.session.update_active_fields(&self.kit.name, &self.fields);
            if let Some(previous) = self.previous.as_mut() {
                if previous.name == self.kit.name {
                    previous.apply_fields(&self.fields);
                }
            }
            self.kit.apply_fields(&self.fields);
            if let Ok(dir) = saved {
                self.kit.path = dir;
            }
        }

        if let Some(previous) = &self.previous {
            if !host.session.is_active(&previous.name) {
                host.session.activate(previous);
                host.session.mark_modified();
            }
        }

        if reload {
            host.browser.refresh(host.store, host.roots);
        }

        if failed {
            PropertiesOutcome::Failed { reloaded: reload }
        } else {
            self.original_name = self.fields.name.clone();
            PropertiesOutcome::Saved { reloaded: reload }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drumkit::{DrumkitError, FsDrumkitStore, Instrument};
    use std::path::{Path, PathBuf};
    use tempfile::{TempDir, tempdir};

    struct Fixture {
        _temp: TempDir,
        roots: KitRoots,
        store: FsDrumkitStore,
        session: Session,
        browser: KitBrowser,
    }

    impl Fixture {
        fn new(kits: &[&str]) -> Self {
            let temp = tempdir().unwrap();
            let roots = KitRoots::new(temp.path().join("sys"), temp.path().join("usr"));
            let store = FsDrumkitStore::new(roots.user());
            let samples = temp.path().join("samples");
            std::fs::create_dir_all(&samples).unwrap();
            for name in kits {
                let sample = samples.join(format!("{name}-kick.wav"));
                std::fs::write(&sample, name.as_bytes()).unwrap();
                let fields = KitFields {
                    name: name.to_string(),
                    author: "Original".into(),
                    ..KitFields::default()
                };
                let instruments = vec![Instrument {
                    id: 0,
                    name: format!("{name} kick"),
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
            Self {
                _temp: temp,
                roots,
                store,
                session: Session::new(),
                browser: KitBrowser::new(),
            }
        }

        fn kit(&self, name: &str) -> Drumkit {
            self.store.load(&self.roots.user().join(name)).unwrap()
        }

        fn activate(&mut self, name: &str) {
            let kit = self.kit(name);
            self.session.activate(&kit);
        }

        fn host(&mut self) -> KitHost<'_> {
            KitHost {
                store: &self.store,
                roots: &self.roots,
                session: &mut self.session,
                browser: &mut self.browser,
            }
        }
    }

    #[test]
    fn save_into_active_is_refused_for_unloaded_kit() {
        let mut fx = Fixture::new(&["Rock", "Jazz"]);
        fx.activate("Jazz");
        let before = fx.session.clone();
        let mut dialog = PropertiesDialog::open(fx.kit("Rock"), fx.session.active_kit().cloned());
        dialog.save_into_active = true;
        dialog.fields.author = "Someone else".into();

        let outcome = dialog.save(&mut fx.host());

        assert_eq!(outcome, PropertiesOutcome::Refused);
        assert!(!dialog.save_into_active);
        assert_eq!(dialog.notice(), Some(&Notice::info(SAVE_INTO_ACTIVE_REFUSED)));
        assert_eq!(fx.kit("Rock").author, "Original");
        assert_eq!(fx.session, before);
    }

    #[test]
    fn save_into_active_persists_live_instruments_and_refreshes_browser() {
        let mut fx = Fixture::new(&["Rock"]);
        fx.activate("Rock");
        fx.session.instruments_mut()[0].name = "Tuned kick".into();
        let mut dialog = PropertiesDialog::open(fx.kit("Rock"), fx.session.active_kit().cloned());
        dialog.save_into_active = true;

        let outcome = dialog.save(&mut fx.host());

        assert_eq!(outcome, PropertiesOutcome::Saved { reloaded: true });
        assert_eq!(fx.kit("Rock").instruments[0].name, "Tuned kick");
        assert_eq!(fx.browser.refresh_count(), 1);
    }

    #[test]
    fn editing_loaded_kit_updates_disk_and_session() {
        let mut fx = Fixture::new(&["Rock"]);
        fx.activate("Rock");
        let mut dialog = PropertiesDialog::open(fx.kit("Rock"), fx.session.active_kit().cloned());
        dialog.fields.author = "New author".into();
        dialog.fields.license = "CC-BY".into();

        let outcome = dialog.save(&mut fx.host());

        assert_eq!(outcome, PropertiesOutcome::Saved { reloaded: false });
        assert_eq!(fx.kit("Rock").author, "New author");
        assert_eq!(fx.kit("Rock").license, "CC-BY");
        assert_eq!(fx.session.active_kit().unwrap().author, "New author");
        assert_eq!(dialog.kit().author, "New author");
        assert!(!fx.session.is_modified());
        assert_eq!(fx.browser.refresh_count(), 0);
    }

    #[test]
    fn editing_other_kit_saves_its_instruments_then_restores_previous() {
        let mut fx = Fixture::new(&["Rock", "Jazz"]);
        fx.activate("Jazz");
        let mut dialog = PropertiesDialog::open(fx.kit("Rock"), fx.session.active_kit().cloned());
        dialog.fields.info = "Loud".into();

        let outcome = dialog.save(&mut fx.host());

        assert_eq!(outcome, PropertiesOutcome::Saved { reloaded: false });
        let rock = fx.kit("Rock");
        assert_eq!(rock.info, "Loud");
        assert_eq!(rock.instruments[0].name, "Rock kick");
        assert!(fx.session.is_active("Jazz"));
        assert!(fx.session.is_modified());
    }

    #[test]
    fn declined_rename_leaves_files_and_session_untouched() {
        let mut fx = Fixture::new(&["Rock", "Jazz"]);
        fx.activate("Jazz");
        let before = fx.session.clone();
        let manifest = fx.roots.user().join("Rock").join(crate::drumkit::MANIFEST_FILE_NAME);
        let manifest_before = std::fs::read(&manifest).unwrap();
        let mut dialog = PropertiesDialog::open(fx.kit("Rock"), fx.session.active_kit().cloned());
        dialog.fields.name = "Rock II".into();

        assert_eq!(
            dialog.save(&mut fx.host()),
            PropertiesOutcome::AwaitingRenameConfirmation
        );
        assert!(dialog.awaiting_rename_confirmation());
        assert!(fx.session.is_active("Rock"));

        let outcome = dialog.confirm_rename(&mut fx.host(), false);

        assert_eq!(outcome, PropertiesOutcome::Cancelled);
        assert!(!fx.roots.user().join("Rock II").exists());
        assert_eq!(std::fs::read(&manifest).unwrap(), manifest_before);
        assert_eq!(fx.session, before);
        assert_eq!(dialog.kit().name, "Rock");
    }

    #[test]
    fn accepted_rename_creates_new_kit_and_reloads_browser() {
        let mut fx = Fixture::new(&["Rock"]);
        fx.activate("Rock");
        let mut dialog = PropertiesDialog::open(fx.kit("Rock"), fx.session.active_kit().cloned());
        dialog.fields.name = "Rock II".into();

        assert_eq!(
            dialog.save(&mut fx.host()),
            PropertiesOutcome::AwaitingRenameConfirmation
        );
        let outcome = dialog.confirm_rename(&mut fx.host(), true);

        assert_eq!(outcome, PropertiesOutcome::Saved { reloaded: true });
        assert!(fx.roots.user().join("Rock").is_dir());
        let renamed = fx.kit("Rock II");
        assert_eq!(renamed.instruments[0].samples[0].file_name().unwrap(), "Rock-kick.wav");
        assert!(fx.browser.find("Rock II").is_some());
        assert!(fx.session.is_active("Rock II"));
        assert_eq!(dialog.original_name(), "Rock II");
        assert_eq!(dialog.kit().path, fx.roots.user().join("Rock II"));
    }

    #[test]
    fn confirm_without_pending_rename_is_a_no_op() {
        let mut fx = Fixture::new(&["Rock"]);
        let mut dialog = PropertiesDialog::open(fx.kit("Rock"), None);
        assert_eq!(
            dialog.confirm_rename(&mut fx.host(), true),
            PropertiesOutcome::Cancelled
        );
    }

    struct FailingStore;

    impl DrumkitStore for FailingStore {
        fn load(&self, dir: &Path) -> Result<Drumkit, DrumkitError> {
            Err(DrumkitError::MissingManifest {
                path: dir.to_path_buf(),
            })
        }

        fn save(&self, request: &SaveRequest<'_>, _overwrite: bool) -> Result<PathBuf, DrumkitError> {
            Err(DrumkitError::Write {
                path: PathBuf::from(&request.fields.name),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            })
        }
    }

    #[test]
    fn failed_save_reports_but_still_updates_descriptor() {
        let mut fx = Fixture::new(&["Rock"]);
        fx.activate("Rock");
        let mut dialog = PropertiesDialog::open(fx.kit("Rock"), fx.session.active_kit().cloned());
        dialog.fields.author = "Unsaved".into();
        let mut host = KitHost {
            store: &FailingStore,
            roots: &fx.roots,
            session: &mut fx.session,
            browser: &mut fx.browser,
        };

        let outcome = dialog.save(&mut host);

        assert_eq!(outcome, PropertiesOutcome::Failed { reloaded: false });
        let notice = dialog.notice().unwrap();
        assert_eq!(notice.tone, crate::dialogs::NoticeTone::Error);
        assert!(notice.message.starts_with("Saving of this drumkit failed."));
        assert_eq!(dialog.kit().author, "Unsaved");
        assert_eq!(fx.kit("Rock").author, "Original");
        assert_eq!(dialog.original_name(), "Rock");
    }
}
