//! Library browser panel model.

use std::collections::BTreeSet;

use crate::drumkit::{CatalogEntry, DrumkitStore, KitCatalog, KitRoots};

/// Kit listing plus which kits are expanded to show their instruments.
#[derive(Debug, Default)]
pub struct KitBrowser {
    catalog: KitCatalog,
    expanded: BTreeSet<String>,
    refreshes: usize,
}

impl KitBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the listing, keeping the selection and expanded kits that
    /// still exist.
    pub fn refresh(&mut self, store: &dyn DrumkitStore, roots: &KitRoots) {
        let selected = self.selected().map(|entry| entry.kit.name.clone());
        self.catalog.rebuild(store, roots, selected.as_deref());
        self.prune_expanded();
        self.refreshes += 1;
    }

    /// Drop expanded names whose kit is gone.
    fn prune_expanded(&mut self) {
        let catalog = &self.catalog;
        self.expanded
            .retain(|name| catalog.names().any(|candidate| candidate == name));
    }

    pub fn entries(&self) -> &[CatalogEntry] {
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

    pub fn select_name(&mut self, name: &str) -> bool {
        self.catalog.select_name(name)
    }

    pub fn find(&self, name: &str) -> Option<&CatalogEntry> {
        self.catalog.find(name)
    }

    pub fn is_expanded(&self, name: &str) -> bool {
        self.expanded.contains(name)
    }

    pub fn toggle_expanded(&mut self, name: &str) {
        if !self.expanded.remove(name) {
            self.expanded.insert(name.to_string());
        }
    }

    /// How many times the listing was rebuilt.
    pub fn refresh_count(&self) -> usize {
        self.refreshes
    }
}
