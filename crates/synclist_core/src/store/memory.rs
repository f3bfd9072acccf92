//! In-process reference backend for the remote store contract.
//!
//! # Responsibility
//! - Implement the full `RemoteStore` surface against process memory.
//! - Emit a change ping to every collection subscriber on each mutation.
//!
//! # Invariants
//! - Document keys are uuid-v4 strings, assigned at create time.
//! - Enumeration order is insertion order.
//! - Deleting an absent document succeeds; updating one is rejected.

use crate::store::remote::{ChangeFeed, Document, DocumentId, RemoteStore, StoreError, StoreResult};
use async_trait::async_trait;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Memory-backed document store for tests, demos and offline use.
///
/// Single-threaded by design, matching the cooperative model of the
/// controllers; interior mutability keeps the trait's `&self` surface.
#[derive(Default)]
pub struct MemoryStore {
    collections: RefCell<HashMap<String, Vec<(DocumentId, Document)>>>,
    watchers: RefCell<HashMap<String, Vec<mpsc::UnboundedSender<()>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shuts down push delivery: every outstanding [`ChangeFeed`] drains
    /// its queued pings and then reports closed.
    pub fn disconnect(&self) {
        self.watchers.borrow_mut().clear();
    }

    /// Pings every live subscriber of `collection`, dropping closed ones.
    fn notify(&self, collection: &str) {
        let mut watchers = self.watchers.borrow_mut();
        if let Some(senders) = watchers.get_mut(collection) {
            senders.retain(|tx| tx.send(()).is_ok());
        }
    }
}

#[async_trait(?Send)]
impl RemoteStore for MemoryStore {
    async fn create(&self, collection: &str, record: Document) -> StoreResult<DocumentId> {
        let id = DocumentId::new(Uuid::new_v4().to_string());
        self.collections
            .borrow_mut()
            .entry(collection.to_string())
            .or_default()
            .push((id.clone(), record));
        self.notify(collection);
        Ok(id)
    }

    async fn get(&self, collection: &str, id: &DocumentId) -> StoreResult<Option<Document>> {
        let collections = self.collections.borrow();
        let Some(documents) = collections.get(collection) else {
            return Ok(None);
        };
        Ok(documents
            .iter()
            .find(|(held, _)| held == id)
            .map(|(_, document)| document.clone()))
    }

    async fn query_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> StoreResult<Vec<(DocumentId, Document)>> {
        let collections = self.collections.borrow();
        let Some(documents) = collections.get(collection) else {
            return Ok(Vec::new());
        };
        Ok(documents
            .iter()
            .filter(|(_, document)| document.get(field) == Some(value))
            .cloned()
            .collect())
    }

    async fn update_fields(
        &self,
        collection: &str,
        id: &DocumentId,
        fields: Document,
    ) -> StoreResult<()> {
        let mut collections = self.collections.borrow_mut();
        let document = collections
            .get_mut(collection)
            .and_then(|documents| {
                documents
                    .iter_mut()
                    .find(|(held, _)| held == id)
                    .map(|(_, document)| document)
            })
            .ok_or_else(|| {
                StoreError::WriteRejected(format!("no document `{id}` in `{collection}`"))
            })?;
        for (key, value) in fields {
            document.insert(key, value);
        }
        drop(collections);
        self.notify(collection);
        Ok(())
    }

    async fn delete_document(&self, collection: &str, id: &DocumentId) -> StoreResult<()> {
        let mut collections = self.collections.borrow_mut();
        let removed = match collections.get_mut(collection) {
            Some(documents) => {
                let before = documents.len();
                documents.retain(|(held, _)| held != id);
                documents.len() != before
            }
            None => false,
        };
        drop(collections);
        if removed {
            self.notify(collection);
        }
        Ok(())
    }

    fn changes(&self, collection: &str) -> ChangeFeed {
        let (tx, rx) = mpsc::unbounded_channel();
        self.watchers
            .borrow_mut()
            .entry(collection.to_string())
            .or_default()
            .push(tx);
        ChangeFeed::new(rx)
    }
}
