//! Shared fixtures for controller integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Value;
use std::cell::{Cell, RefCell};
use synclist_core::{
    ChangeFeed, Document, DocumentId, ListItem, MemoryStore, RemoteStore, StoreError, StoreResult,
    ViewSink,
};

/// View sink recording every render as `(titles, total_count)`.
#[derive(Default)]
pub struct RecordingView {
    pub renders: Vec<(Vec<String>, usize)>,
}

impl<I: ListItem> ViewSink<I> for RecordingView {
    fn render(&mut self, items: &[I], total_count: usize) {
        let titles = items.iter().map(|item| item.title().to_string()).collect();
        self.renders.push((titles, total_count));
    }
}

/// One observed remote-store call.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreOp {
    Create {
        collection: String,
    },
    UpdateFields {
        collection: String,
        id: String,
        fields: Document,
    },
    Delete {
        collection: String,
        id: String,
    },
}

/// Memory-backed store that records write traffic and can be told to
/// reject writes.
#[derive(Default)]
pub struct RecordingStore {
    inner: MemoryStore,
    ops: RefCell<Vec<StoreOp>>,
    pub fail_writes: Cell<bool>,
    pub fail_reads: Cell<bool>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> Vec<StoreOp> {
        self.ops.borrow().clone()
    }

    pub fn completed_updates(&self) -> Vec<(String, Value)> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                StoreOp::UpdateFields { id, fields, .. } => fields
                    .get("completed")
                    .cloned()
                    .map(|completed| (id, completed)),
                _ => None,
            })
            .collect()
    }

    pub fn creates_into(&self, collection: &str) -> usize {
        self.ops()
            .into_iter()
            .filter(|op| matches!(op, StoreOp::Create { collection: held } if held == collection))
            .count()
    }

    fn rejection(&self, what: &str) -> StoreError {
        StoreError::WriteRejected(format!("injected failure: {what}"))
    }

    fn read_rejection(&self, what: &str) -> StoreError {
        StoreError::ReadRejected(format!("injected failure: {what}"))
    }
}

#[async_trait(?Send)]
impl RemoteStore for RecordingStore {
    async fn create(&self, collection: &str, record: Document) -> StoreResult<DocumentId> {
        if self.fail_writes.get() {
            return Err(self.rejection("create"));
        }
        self.ops.borrow_mut().push(StoreOp::Create {
            collection: collection.to_string(),
        });
        self.inner.create(collection, record).await
    }

    async fn get(&self, collection: &str, id: &DocumentId) -> StoreResult<Option<Document>> {
        if self.fail_reads.get() {
            return Err(self.read_rejection("get"));
        }
        self.inner.get(collection, id).await
    }

    async fn query_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> StoreResult<Vec<(DocumentId, Document)>> {
        if self.fail_reads.get() {
            return Err(self.read_rejection("query_by_field"));
        }
        self.inner.query_by_field(collection, field, value).await
    }

    async fn update_fields(
        &self,
        collection: &str,
        id: &DocumentId,
        fields: Document,
    ) -> StoreResult<()> {
        if self.fail_writes.get() {
            return Err(self.rejection("update_fields"));
        }
        self.ops.borrow_mut().push(StoreOp::UpdateFields {
            collection: collection.to_string(),
            id: id.as_str().to_string(),
            fields: fields.clone(),
        });
        self.inner.update_fields(collection, id, fields).await
    }

    async fn delete_document(&self, collection: &str, id: &DocumentId) -> StoreResult<()> {
        if self.fail_writes.get() {
            return Err(self.rejection("delete_document"));
        }
        self.ops.borrow_mut().push(StoreOp::Delete {
            collection: collection.to_string(),
            id: id.as_str().to_string(),
        });
        self.inner.delete_document(collection, id).await
    }

    fn changes(&self, collection: &str) -> ChangeFeed {
        self.inner.changes(collection)
    }
}

/// Seeds one stored item directly, bypassing any controller.
pub async fn seed_item<I: ListItem>(
    store: &dyn RemoteStore,
    title: &str,
    owner: &str,
) -> DocumentId {
    let record = I::new(title, owner).to_document().unwrap();
    store.create(I::COLLECTION, record).await.unwrap()
}
