//! The live session: which kit is loaded and its instrument state.

use tracing::info;

use crate::drumkit::{Component, Drumkit, Instrument, KitFields};

/// Host session state shared by the browser and the dialogs.
///
/// `Clone` doubles as a snapshot for undoing a temporary activation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    active: Option<Drumkit>,
    instruments: Vec<Instrument>,
    components: Vec<Component>,
    modified: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_kit(&self) -> Option<&Drumkit> {
        self.active.as_ref()
    }

    pub fn active_kit_name(&self) -> Option<&str> {
        self.active.as_ref().map(|kit| kit.name.as_str())
    }

    /// True when `name` is the loaded kit.
    pub fn is_active(&self, name: &str) -> bool {
        self.active_kit_name() == Some(name)
    }

    /// Load `kit` into the live state, replacing the instruments.
    pub fn activate(&mut self, kit: &Drumkit) {
        info!("Loading drumkit {:?}", kit.name);
        self.instruments = kit.instruments.clone();
        self.components = kit.components.clone();
        self.active = Some(kit.clone());
    }

    /// Rewrite the metadata of the active kit if it is the one named `name`.
    pub fn update_active_fields(&mut self, name: &str, fields: &KitFields) -> bool {
        match self.active.as_mut() {
            Some(kit) if kit.name == name => {
                kit.apply_fields(fields);
                true
            }
            _ => false,
        }
    }

    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    /// Live instruments; edits here are what "save into active kit" persists.
    pub fn instruments_mut(&mut self) -> &mut Vec<Instrument> {
        &mut self.instruments
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn mark_modified(&mut self) {
        self.modified = true;
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn clear_modified(&mut self) {
        self.modified = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn kit(name: &str, instrument: &str) -> Drumkit {
        Drumkit {
            name: name.into(),
            instruments: vec![Instrument {
                id: 0,
                name: instrument.into(),
                samples: vec![PathBuf::from(format!("/kits/{name}/{instrument}.wav"))],
            }],
            ..Drumkit::default()
        }
    }

    #[test]
    fn activate_replaces_instrument_state() {
        let mut session = Session::new();
        session.activate(&kit("Rock", "Kick"));
        session.activate(&kit("Jazz", "Brush"));
        assert!(session.is_active("Jazz"));
        assert_eq!(session.instruments()[0].name, "Brush");
        assert!(!session.is_modified());
    }

    #[test]
    fn update_active_fields_only_touches_named_kit() {
        let mut session = Session::new();
        session.activate(&kit("Rock", "Kick"));
        let fields = KitFields {
            name: "Rock II".into(),
            ..KitFields::default()
        };
        assert!(!session.update_active_fields("Jazz", &fields));
        assert!(session.update_active_fields("Rock", &fields));
        assert_eq!(session.active_kit_name(), Some("Rock II"));
    }
}
