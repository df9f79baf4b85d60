//! The ordered list of loadable kits shown by dialogs and the browser.

use tracing::debug;

use super::{Drumkit, DrumkitStore, KitOrigin, KitRoots};

/// A loaded kit together with the root it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub kit: Drumkit,
    pub origin: KitOrigin,
}

/// System kits followed by user kits, in scan order, with one active entry.
///
/// Duplicate names across the two roots are kept.
#[derive(Debug, Clone, Default)]
pub struct KitCatalog {
    entries: Vec<CatalogEntry>,
    active: Option<usize>,
}

impl KitCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog in one step.
    pub fn load(store: &dyn DrumkitStore, roots: &KitRoots, preselect: Option<&str>) -> Self {
        let mut catalog = Self::new();
        catalog.rebuild(store, roots, preselect);
        catalog
    }

    /// Drop every held kit and rescan both roots.
    ///
    /// Entries that fail to load are skipped without error: the roots may
    /// contain directories that are not drumkits. Afterwards the kit named
    /// `preselect` is active if present, else the first kit, else none.
    pub fn rebuild(&mut self, store: &dyn DrumkitStore, roots: &KitRoots, preselect: Option<&str>) {
        self.entries.clear();
        self.active = None;
        for (origin, names) in [
            (KitOrigin::System, roots.list_system()),
            (KitOrigin::User, roots.list_user()),
        ] {
            let root = roots.root(origin);
            for name in names {
                let dir = root.join(&name);
                match store.load(&dir) {
                    Ok(kit) => self.entries.push(CatalogEntry { kit, origin }),
                    Err(err) => debug!("Skipping {}: {err}", dir.display()),
                }
            }
        }
        self.active = preselect
            .and_then(|name| self.position(name))
            .or_else(|| (!self.entries.is_empty()).then_some(0));
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Kit names in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.kit.name.as_str())
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active(&self) -> Option<&CatalogEntry> {
        self.active.and_then(|index| self.entries.get(index))
    }

    /// Make the entry at `index` active. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.entries.len() {
            self.active = Some(index);
            true
        } else {
            false
        }
    }

    /// Make the first kit named `name` active.
    pub fn select_name(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(index) => self.select(index),
            None => false,
        }
    }

    /// First kit named `name`.
    pub fn find(&self, name: &str) -> Option<&CatalogEntry> {
        self.position(name).map(|index| &self.entries[index])
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.kit.name == name)
    }
}
