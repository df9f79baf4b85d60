//! "Save drumkit as" dialog: store the live instruments as a new kit.

use std::path::PathBuf;

use tracing::{info, warn};

use super::Notice;
use crate::drumkit::{DrumkitStore, KitFields, SaveRequest};
use crate::session::Session;

pub const NAME_REQUIRED: &str = "Please supply at least a valid name";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The form was incomplete; nothing was written.
    Rejected,
    /// Persistence failed; the notice holds the reason.
    Failed,
    /// The kit was written to this directory.
    Saved(PathBuf),
}

#[derive(Debug, Default)]
pub struct SaveDialog {
    pub fields: KitFields,
    notice: Option<Notice>,
}

impl SaveDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Save the session's instruments under the entered name. Never
    /// overwrites an existing kit.
    pub fn save(&mut self, store: &dyn DrumkitStore, session: &Session) -> SaveOutcome {
        if self.fields.name.is_empty() {
            self.notice = Some(Notice::info(NAME_REQUIRED));
            return SaveOutcome::Rejected;
        }
        let request = SaveRequest {
            fields: &self.fields,
            instruments: session.instruments(),
            components: session.components(),
        };
        match store.save(&request, false) {
            Ok(dir) => {
                info!("Saved session as drumkit {:?}", self.fields.name);
                SaveOutcome::Saved(dir)
            }
            Err(err) => {
                warn!("Save as {:?} failed: {err}", self.fields.name);
                self.notice = Some(Notice::error(format!(
                    "Saving of this drumkit failed.\n{err}"
                )));
                SaveOutcome::Failed
            }
        }
    }
}
