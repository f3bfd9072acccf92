//! Item entities and the item-shape contract.
//!
//! # Responsibility
//! - Define the task/todo record shapes stored in the remote collections.
//! - Provide the `ListItem` contract a list controller is generic over.
//!
//! # Invariants
//! - An empty `ItemId` is the pending sentinel for a creation in flight;
//!   a non-empty id is assigned by the remote store and never reused.
//! - The stored `id` field and the store-native document key are kept in
//!   sync; on decode the native key wins.

use crate::store::remote::{Document, DocumentId, StoreError, StoreResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{Display, Formatter};

/// Document field holding the owning user's identity.
pub const OWNER_FIELD: &str = "owner";

/// Identifier of one list item.
///
/// The empty string is the pending sentinel: the item was built locally
/// and the remote store has not assigned a key yet. Items never reach a
/// `ListModel` while pending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the not-yet-assigned sentinel id.
    pub fn pending() -> Self {
        Self(String::new())
    }

    /// Returns whether the remote store has assigned this id.
    pub fn is_assigned(&self) -> bool {
        !self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<DocumentId> for ItemId {
    fn from(value: DocumentId) -> Self {
        Self(value.into_string())
    }
}

/// Shape contract for one list flavour.
///
/// A `ListController` is generic over this trait instead of carrying two
/// hand-copied task/todo variants. The provided codecs keep the wire
/// mapping in one place.
pub trait ListItem: Clone + Serialize + DeserializeOwned {
    /// Remote collection this flavour lives in.
    const COLLECTION: &'static str;

    /// Builds a pending-id entity owned by `owner`.
    fn new(title: &str, owner: &str) -> Self;

    fn id(&self) -> &ItemId;

    /// Stamps the store-assigned id onto the entity.
    fn assign_id(&mut self, id: ItemId);

    fn title(&self) -> &str;

    fn completed(&self) -> bool;

    fn set_completed(&mut self, completed: bool);

    fn owner(&self) -> &str;

    /// Serializes the entity into a store document.
    fn to_document(&self) -> StoreResult<Document> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(StoreError::InvalidRecord(format!(
                "item serialized to non-object value: {other}"
            ))),
            Err(err) => Err(StoreError::InvalidRecord(err.to_string())),
        }
    }

    /// Decodes a stored document, stamping the store-native key over the
    /// stored `id` field.
    fn from_document(id: DocumentId, document: Document) -> StoreResult<Self> {
        let mut item: Self = serde_json::from_value(Value::Object(document))
            .map_err(|err| StoreError::InvalidRecord(err.to_string()))?;
        item.assign_id(ItemId::from(id));
        Ok(item)
    }
}

/// One entry of the task list (`taskItems` collection).
///
/// `add_count` and `exec_count` are carried through storage unchanged; no
/// mutating operation touches them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskItem {
    #[serde(default)]
    pub id: ItemId,
    pub title: String,
    pub completed: bool,
    pub add_count: u32,
    pub exec_count: u32,
    pub owner: String,
}

impl ListItem for TaskItem {
    const COLLECTION: &'static str = "taskItems";

    fn new(title: &str, owner: &str) -> Self {
        Self {
            id: ItemId::pending(),
            title: title.to_string(),
            completed: false,
            add_count: 0,
            exec_count: 0,
            owner: owner.to_string(),
        }
    }

    fn id(&self) -> &ItemId {
        &self.id
    }

    fn assign_id(&mut self, id: ItemId) {
        self.id = id;
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn completed(&self) -> bool {
        self.completed
    }

    fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }

    fn owner(&self) -> &str {
        &self.owner
    }
}

/// One entry of the todo list (`todoItems` collection).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    #[serde(default)]
    pub id: ItemId,
    pub title: String,
    pub completed: bool,
    pub owner: String,
}

impl ListItem for TodoItem {
    const COLLECTION: &'static str = "todoItems";

    fn new(title: &str, owner: &str) -> Self {
        Self {
            id: ItemId::pending(),
            title: title.to_string(),
            completed: false,
            owner: owner.to_string(),
        }
    }

    fn id(&self) -> &ItemId {
        &self.id
    }

    fn assign_id(&mut self, id: ItemId) {
        self.id = id;
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn completed(&self) -> bool {
        self.completed
    }

    fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }

    fn owner(&self) -> &str {
        &self.owner
    }
}
