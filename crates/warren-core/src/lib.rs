//! Warren Core — page store, forest derivation, and layout engine

pub mod model;
pub mod error;
pub mod store;
pub mod forest;
pub mod layout;
pub mod persistence;


#[cfg(test)]
pub mod test_utils;

pub use model::{default_url, Layout, LayoutEdge, PageRecord, Point, Snapshot, URL_TEMPLATE};
pub use error::StoreError;
pub use store::PageStore;
pub use forest::Forest;
pub use layout::{layout, LayoutParams};
pub use persistence::{
    DATA_DIR, HISTORY_FILE, data_dir, history_path, ensure_data_dir, clear_history, JsonFile,
    MemoryPersistence, Persistence,
};
