//! Test utilities for Warren

use crate::store::PageStore;

/// Build a small two-tree store:
///
/// ```text
/// Rabbit ── Burrow ── Tunnel
///        └─ Warren
/// Moon
/// ```
pub fn sample_store() -> PageStore {
    let mut store = PageStore::new();
    store.add_page("Rabbit", None, None).unwrap();
    store.add_page("Burrow", Some("Rabbit"), None).unwrap();
    store.add_page("Warren", Some("Rabbit"), None).unwrap();
    store.add_page("Tunnel", Some("Burrow"), None).unwrap();
    store.add_page("Moon", None, None).unwrap();
    store
}

/// Build a store from (title, parent) pairs, with derived URLs.
pub fn store_from_links(links: &[(&str, Option<&str>)]) -> PageStore {
    let mut store = PageStore::new();
    for (title, parent) in links {
        store.add_page(title, *parent, None).unwrap();
    }
    store
}
