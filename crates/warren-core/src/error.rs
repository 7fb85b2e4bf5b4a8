//! Typed failures for store operations
//!
//! All of these are local and recoverable; the input collaborator is
//! responsible for user-facing messaging and must receive the kind
//! unmodified.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Title is blank; rejected before the store is touched.
    #[error("page title must not be empty")]
    EmptyTitle,

    /// Referenced parent title does not exist in the store.
    #[error("unknown parent page: {0:?}")]
    UnknownParent(String),

    /// A page was declared its own parent.
    #[error("page {0:?} cannot be its own parent")]
    SelfParent(String),

    /// Linking parent→child would close a directed cycle.
    #[error("linking {parent:?} -> {child:?} would create a cycle")]
    CycleDetected { parent: String, child: String },

    /// The child already has a different parent; a page has at most one.
    #[error("page {child:?} already has parent {existing:?}")]
    ParentConflict { child: String, existing: String },

    /// Lookup of a nonexistent title.
    #[error("no such page: {0:?}")]
    NotFound(String),
}

impl StoreError {
    /// Stable machine-readable name, surfaced unmodified at API boundaries.
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::EmptyTitle => "EmptyTitle",
            StoreError::UnknownParent(_) => "UnknownParent",
            StoreError::SelfParent(_) => "SelfParent",
            StoreError::CycleDetected { .. } => "CycleDetected",
            StoreError::ParentConflict { .. } => "ParentConflict",
            StoreError::NotFound(_) => "NotFound",
        }
    }
}
