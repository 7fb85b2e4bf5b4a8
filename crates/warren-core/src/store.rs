//! Page store backed by petgraph::StableDiGraph with a title index

use std::collections::HashMap;

use petgraph::Direction;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};

use crate::error::StoreError;
use crate::model::{PageRecord, Snapshot};

/// The set of explored pages for one session, plus their parent→child links.
///
/// Pages are never removed, so petgraph's node iteration order doubles as
/// the store's insertion order. The graph mirrors the link structure for
/// parent lookup and ancestor walks; `PageRecord.children` stays the
/// canonical ordered child list.
pub struct PageStore {
    graph: StableDiGraph<PageRecord, ()>,
    index: HashMap<String, NodeIndex>,
}

impl std::fmt::Debug for PageStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageStore")
            .field("page_count", &self.graph.node_count())
            .field("link_count", &self.graph.edge_count())
            .finish()
    }
}

impl PageStore {
    pub fn new() -> Self {
        PageStore {
            graph: StableDiGraph::new(),
            index: HashMap::new(),
        }
    }

    /// Record a page, optionally linking it under a parent.
    ///
    /// The first call naming a title creates its record (`visited_at` set
    /// once, `url` derived when absent); later calls with the same title
    /// leave the record untouched but may add the parent link. Every
    /// validation runs before any mutation, so a rejected call leaves the
    /// store exactly as it was.
    pub fn add_page(
        &mut self,
        title: &str,
        parent: Option<&str>,
        url: Option<&str>,
    ) -> Result<(), StoreError> {
        if title.is_empty() {
            return Err(StoreError::EmptyTitle);
        }
        if let Some(parent) = parent {
            if !self.index.contains_key(parent) {
                return Err(StoreError::UnknownParent(parent.to_string()));
            }
            if parent == title {
                return Err(StoreError::SelfParent(title.to_string()));
            }
        }

        if !self.index.contains_key(title) {
            let idx = self.graph.add_node(PageRecord::new(title, url));
            self.index.insert(title.to_string(), idx);
            tracing::debug!("added page {title:?}");
        }

        match parent {
            Some(parent) => self.link(parent, title),
            None => Ok(()),
        }
    }

    /// Add a parent→child link between two existing pages, enforcing the
    /// single-parent and acyclicity invariants. Re-adding an existing link
    /// is a no-op.
    fn link(&mut self, parent: &str, child: &str) -> Result<(), StoreError> {
        let parent_idx = *self
            .index
            .get(parent)
            .ok_or_else(|| StoreError::UnknownParent(parent.to_string()))?;
        let child_idx = *self
            .index
            .get(child)
            .ok_or_else(|| StoreError::NotFound(child.to_string()))?;
        if parent_idx == child_idx {
            return Err(StoreError::SelfParent(child.to_string()));
        }
        if let Some(existing) = self.parent_index(child_idx) {
            if existing == parent_idx {
                return Ok(());
            }
            return Err(StoreError::ParentConflict {
                child: child.to_string(),
                existing: self.graph[existing].title.clone(),
            });
        }
        if self.is_ancestor(child_idx, parent_idx) {
            return Err(StoreError::CycleDetected {
                parent: parent.to_string(),
                child: child.to_string(),
            });
        }

        self.graph.add_edge(parent_idx, child_idx, ());
        self.graph[parent_idx].children.push(child.to_string());
        tracing::debug!("linked {parent:?} -> {child:?}");
        Ok(())
    }

    /// The parent node of `node`, if linked. Invariant B caps incoming
    /// edges at one.
    fn parent_index(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .neighbors_directed(node, Direction::Incoming)
            .next()
    }

    /// Whether `candidate` appears on the parent chain above `node`.
    /// Terminates because the store is always acyclic.
    fn is_ancestor(&self, candidate: NodeIndex, node: NodeIndex) -> bool {
        let mut current = node;
        while let Some(parent) = self.parent_index(current) {
            if parent == candidate {
                return true;
            }
            current = parent;
        }
        false
    }

    /// Get a page by title.
    pub fn get_page(&self, title: &str) -> Result<&PageRecord, StoreError> {
        self.index
            .get(title)
            .map(|&idx| &self.graph[idx])
            .ok_or_else(|| StoreError::NotFound(title.to_string()))
    }

    /// All titles in insertion order.
    pub fn list_titles(&self) -> Vec<&str> {
        self.graph
            .node_indices()
            .map(|idx| self.graph[idx].title.as_str())
            .collect()
    }

    /// Iterate over all pages in insertion order.
    pub fn pages(&self) -> impl Iterator<Item = &PageRecord> {
        self.graph.node_indices().map(|idx| &self.graph[idx])
    }

    /// Titles with no recorded parent, in insertion order.
    pub fn root_titles(&self) -> Vec<&str> {
        self.graph
            .externals(Direction::Incoming)
            .map(|idx| self.graph[idx].title.as_str())
            .collect()
    }

    /// The child titles of a page, in stored order. Empty for unknown titles.
    pub fn children_of(&self, title: &str) -> &[String] {
        self.index
            .get(title)
            .map(|&idx| self.graph[idx].children.as_slice())
            .unwrap_or(&[])
    }

    /// The parent title of a page, if it has one.
    pub fn parent_of(&self, title: &str) -> Option<&str> {
        let idx = *self.index.get(title)?;
        self.parent_index(idx)
            .map(|parent| self.graph[parent].title.as_str())
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Clone the full state into the serializable snapshot form, keeping
    /// insertion order.
    pub fn snapshot(&self) -> Snapshot {
        let mut snapshot = Snapshot::default();
        for record in self.pages() {
            snapshot.insert(record.title.clone(), record.clone());
        }
        snapshot
    }

    /// Rebuild a store from a snapshot, revalidating every link through the
    /// same invariant checks as `add_page`. A snapshot carrying a dangling
    /// child, a double parent, or a cycle is rejected rather than loaded.
    pub fn restore(snapshot: Snapshot) -> Result<Self, StoreError> {
        let mut store = PageStore::new();
        for (title, record) in snapshot.iter() {
            if title.is_empty() {
                return Err(StoreError::EmptyTitle);
            }
            let idx = store.graph.add_node(PageRecord {
                title: title.to_string(),
                url: record.url.clone(),
                visited_at: record.visited_at,
                children: Vec::new(),
            });
            store.index.insert(title.to_string(), idx);
        }
        for (title, record) in snapshot.iter() {
            for child in &record.children {
                store.link(title, child)?;
            }
        }
        Ok(store)
    }
}

impl Default for PageStore {
    fn default() -> Self {
        Self::new()
    }
}
