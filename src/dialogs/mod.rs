//! Headless controllers behind the three drumkit dialogs.
//!
//! Each dialog owns its form fields and a pending [`Notice`]; the egui layer
//! renders both and forwards button presses to the controller methods.

pub mod export;
pub mod properties;
pub mod save;

pub use export::ExportDialog;
pub use properties::{PropertiesDialog, PropertiesOutcome};
pub use save::{SaveDialog, SaveOutcome};

/// Severity of a dialog notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeTone {
    Info,
    Error,
}

/// Modal message shown after a dialog action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub tone: NoticeTone,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            tone: NoticeTone::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            tone: NoticeTone::Error,
            message: message.into(),
        }
    }
}
