//! Core list-synchronization engine for synclist.
//! This crate is the single source of truth for list consistency rules.

pub mod controller;
pub mod logging;
pub mod model;
pub mod store;
pub mod view;

pub use controller::list_controller::{ListController, ListIntent, SubmitEvent};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::item::{ItemId, ListItem, TaskItem, TodoItem, OWNER_FIELD};
pub use model::list::{ListModel, ListenerId};
pub use store::memory::MemoryStore;
pub use store::remote::{
    ChangeFeed, Document, DocumentId, RemoteStore, StoreError, StoreResult,
};
pub use view::ViewSink;

/// Returns the core crate version, for embedding shells and smoke probes.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
