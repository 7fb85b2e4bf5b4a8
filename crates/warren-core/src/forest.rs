//! Derived forest view over a page store

use crate::store::PageStore;

/// The trees formed by the current parent/child links.
///
/// Ephemeral and read-only: it borrows the store and computes nothing but
/// the root set. Store invariants guarantee every page sits in exactly one
/// tree and that traversal terminates.
#[derive(Debug)]
pub struct Forest<'a> {
    store: &'a PageStore,
    roots: Vec<&'a str>,
}

impl<'a> Forest<'a> {
    /// Derive the forest from the flat store state. An empty store yields
    /// an empty root set, not an error.
    pub fn build(store: &'a PageStore) -> Self {
        let roots = store.root_titles();
        Forest { store, roots }
    }

    /// Root titles (pages with no recorded parent), in insertion order.
    pub fn roots(&self) -> &[&'a str] {
        &self.roots
    }

    /// Child titles of a node, in stored order.
    pub fn children(&self, title: &str) -> &'a [String] {
        self.store.children_of(title)
    }

    /// Iterate over every page in the forest, in store insertion order.
    pub fn pages(&self) -> impl Iterator<Item = &'a crate::model::PageRecord> {
        self.store.pages()
    }

    pub fn page_count(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}
