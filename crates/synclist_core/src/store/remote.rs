//! Remote store contract and shared store types.
//!
//! # Responsibility
//! - Define the CRUD + subscribe surface of the external document store.
//! - Define the store error taxonomy shared by every backend.
//!
//! # Invariants
//! - All operations are async and non-blocking; nothing in the core ever
//!   waits synchronously on the store.
//! - A change ping says only that the collection changed; subscribers
//!   re-query if they care.

use async_trait::async_trait;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use tokio::sync::mpsc;

/// One stored record: a flat JSON object.
pub type Document = serde_json::Map<String, Value>;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level failure taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A query/get was rejected by the store.
    ReadRejected(String),
    /// A create/update/delete was rejected by the store.
    WriteRejected(String),
    /// A persisted record could not be decoded into an item entity.
    InvalidRecord(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReadRejected(message) => write!(f, "remote read rejected: {message}"),
            Self::WriteRejected(message) => write!(f, "remote write rejected: {message}"),
            Self::InvalidRecord(message) => write!(f, "invalid stored record: {message}"),
        }
    }
}

impl Error for StoreError {}

/// Store-native key of one document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Display for DocumentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Long-lived stream of coarse change signals for one collection.
///
/// Backed by an unbounded channel so a backend never blocks on a slow
/// subscriber. [`ChangeFeed::next`] resolves `false` once the backend
/// drops its sender.
pub struct ChangeFeed {
    rx: mpsc::UnboundedReceiver<()>,
}

impl ChangeFeed {
    pub fn new(rx: mpsc::UnboundedReceiver<()>) -> Self {
        Self { rx }
    }

    /// Awaits the next change ping; `false` means the feed is closed.
    pub async fn next(&mut self) -> bool {
        self.rx.recv().await.is_some()
    }
}

/// Async contract of the external per-user-filterable document store.
///
/// Both list controllers share one handle; the store is assumed to
/// serialize concurrent writes to the same document safely.
#[async_trait(?Send)]
pub trait RemoteStore {
    /// Stores a new document and returns the store-assigned key.
    async fn create(&self, collection: &str, record: Document) -> StoreResult<DocumentId>;

    /// Fetches one document by key; `None` when absent.
    async fn get(&self, collection: &str, id: &DocumentId) -> StoreResult<Option<Document>>;

    /// Returns every document whose `field` equals `value`, in store
    /// enumeration order.
    async fn query_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> StoreResult<Vec<(DocumentId, Document)>>;

    /// Merges `fields` into an existing document.
    async fn update_fields(
        &self,
        collection: &str,
        id: &DocumentId,
        fields: Document,
    ) -> StoreResult<()>;

    /// Deletes one document; deleting an absent document succeeds.
    async fn delete_document(&self, collection: &str, id: &DocumentId) -> StoreResult<()>;

    /// Subscribes to coarse collection-level change signals.
    ///
    /// Pings are emitted for any mutation by any user; owner filtering
    /// happens at re-query time, not here.
    fn changes(&self, collection: &str) -> ChangeFeed;
}
