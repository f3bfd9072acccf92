//! Generic list controller.
//!
//! One controller owns one `ListModel` and a shared remote-store handle.
//! It is generic over the item shape (`ListItem`) instead of existing as
//! two hand-copied task/todo variants; the task-only promote operation is
//! an optional capability configured at construction.
//!
//! Lifecycle: constructed unbound; `start` performs the initial load and
//! mounts the render listener; every remote change ping funnels through
//! `resync`, which discards the model, refetches, re-mounts and re-renders.

use crate::model::item::{ItemId, ListItem, TodoItem, OWNER_FIELD};
use crate::model::list::{ListModel, ListenerId};
use crate::store::remote::{ChangeFeed, Document, DocumentId, RemoteStore};
use crate::view::ViewSink;
use log::{debug, error, info, warn};
use serde_json::Value;
use std::cell::RefCell;
use std::mem;
use std::rc::Rc;

/// User intent delivered by the embedding shell.
///
/// Stands in for the action callbacks a DOM view would bind to each row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListIntent {
    Add { title: String },
    Update { id: ItemId, completed: bool },
    Delete { id: ItemId },
    Promote { id: ItemId },
}

/// Form submission event delivered by the embedding shell.
#[derive(Debug, Clone)]
pub struct SubmitEvent {
    input: String,
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            default_prevented: false,
        }
    }

    /// Suppresses the shell's default submission side effect.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Takes the current input value, clearing the field.
    pub fn take_input(&mut self) -> String {
        mem::take(&mut self.input)
    }
}

/// Controller for one owner-partitioned list.
pub struct ListController<I: ListItem, V: ViewSink<I>> {
    store: Rc<dyn RemoteStore>,
    owner: String,
    model: ListModel<I>,
    view: Rc<RefCell<V>>,
    render_listener: Option<ListenerId>,
    promote_into: Option<&'static str>,
}

impl<I, V> ListController<I, V>
where
    I: ListItem + 'static,
    V: ViewSink<I> + 'static,
{
    /// Creates an unbound controller for `owner`.
    ///
    /// The owner identity is fixed at construction; switching users means
    /// constructing a new controller, not mutating session state.
    pub fn new(store: Rc<dyn RemoteStore>, owner: impl Into<String>, view: Rc<RefCell<V>>) -> Self {
        Self {
            store,
            owner: owner.into(),
            model: ListModel::new(),
            view,
            render_listener: None,
            promote_into: None,
        }
    }

    /// Enables the promote capability, targeting `collection` with
    /// todo-shaped documents.
    pub fn with_promote_into(mut self, collection: &'static str) -> Self {
        self.promote_into = Some(collection);
        self
    }

    /// Read access to the current model.
    pub fn model(&self) -> &ListModel<I> {
        &self.model
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn is_mounted(&self) -> bool {
        self.render_listener.is_some()
    }

    /// Initial population: load, mount, render.
    pub async fn start(&mut self) {
        self.resync().await;
    }

    /// Discards the current model and repopulates it from the store.
    ///
    /// Leaves the controller unmounted and emits nothing; callers re-mount
    /// and re-render afterwards (see [`Self::resync`]).
    pub async fn reload(&mut self) {
        self.render_listener = None;
        self.model = ListModel::new();

        let owner = Value::String(self.owner.clone());
        let rows = match self
            .store
            .query_by_field(I::COLLECTION, OWNER_FIELD, &owner)
            .await
        {
            Ok(rows) => rows,
            Err(err) => {
                error!(
                    "event=list_query_failed module=controller collection={} error={err}",
                    I::COLLECTION
                );
                return;
            }
        };

        for (doc_id, document) in rows {
            match I::from_document(doc_id, document) {
                Ok(item) => self.model.add(item),
                Err(err) => warn!(
                    "event=list_row_skipped module=controller collection={} error={err}",
                    I::COLLECTION
                ),
            }
        }
    }

    /// Single reconciliation entry point for remote invalidation.
    ///
    /// Coarse by design: any change signal, whoever caused it, triggers a
    /// full reload; the query itself filters by owner. A delta-based
    /// strategy would replace only this method.
    pub async fn resync(&mut self) {
        self.reload().await;
        self.mount();
        self.model.emit_change();
    }

    /// Subscribes to the collection's change feed and resyncs on every
    /// ping until the feed closes.
    pub async fn watch(&mut self) {
        let feed = self.store.changes(I::COLLECTION);
        self.watch_feed(feed).await;
    }

    /// Drives an externally created change feed (see [`Self::watch`]).
    pub async fn watch_feed(&mut self, mut feed: ChangeFeed) {
        while feed.next().await {
            self.resync().await;
        }
        debug!(
            "event=change_feed_closed module=controller collection={}",
            I::COLLECTION
        );
    }

    /// Creates a new item from `title` and appends it locally once the
    /// store has assigned its id.
    ///
    /// Not optimistic: a failed create is abandoned with a log line and
    /// no local mutation. The stored record is fetched back and the
    /// assigned key is stamped onto its `id` field, because downstream
    /// code addresses items by the stored field as well as the native key.
    pub async fn handle_add(&mut self, title: &str) {
        let item = I::new(title, &self.owner);
        let record = match item.to_document() {
            Ok(record) => record,
            Err(err) => {
                error!(
                    "event=doc_encode_failed module=controller collection={} error={err}",
                    I::COLLECTION
                );
                return;
            }
        };

        let doc_id = match self.store.create(I::COLLECTION, record).await {
            Ok(doc_id) => {
                info!(
                    "event=doc_created module=controller collection={} id={doc_id}",
                    I::COLLECTION
                );
                doc_id
            }
            Err(err) => {
                error!(
                    "event=doc_create_failed module=controller collection={} error={err}",
                    I::COLLECTION
                );
                return;
            }
        };

        let fetched = match self.store.get(I::COLLECTION, &doc_id).await {
            Ok(Some(document)) => document,
            Ok(None) => {
                error!(
                    "event=doc_fetch_failed module=controller collection={} id={doc_id} error=missing",
                    I::COLLECTION
                );
                return;
            }
            Err(err) => {
                error!(
                    "event=doc_fetch_failed module=controller collection={} id={doc_id} error={err}",
                    I::COLLECTION
                );
                return;
            }
        };

        self.stamp_document_id(I::COLLECTION, &doc_id).await;

        match I::from_document(doc_id, fetched) {
            Ok(stored) => self.model.add(stored),
            Err(err) => error!(
                "event=doc_decode_failed module=controller collection={} error={err}",
                I::COLLECTION
            ),
        }
    }

    /// Optimistic completion toggle: local mutation and render first, the
    /// remote write second. No rollback on remote failure.
    pub async fn handle_update(&mut self, id: &ItemId, completed: bool) {
        self.model.update(id, completed);

        let doc_id = DocumentId::new(id.as_str());
        let mut fields = Document::new();
        fields.insert("completed".to_string(), Value::Bool(completed));
        match self.store.update_fields(I::COLLECTION, &doc_id, fields).await {
            Ok(()) => debug!(
                "event=doc_updated module=controller collection={} id={id} completed={completed}",
                I::COLLECTION
            ),
            Err(err) => error!(
                "event=doc_update_failed module=controller collection={} id={id} error={err}",
                I::COLLECTION
            ),
        }
    }

    /// Optimistic removal: local first, remote second, no rollback.
    pub async fn handle_delete(&mut self, id: &ItemId) {
        self.model.delete(id);

        let doc_id = DocumentId::new(id.as_str());
        match self.store.delete_document(I::COLLECTION, &doc_id).await {
            Ok(()) => debug!(
                "event=doc_deleted module=controller collection={} id={id}",
                I::COLLECTION
            ),
            Err(err) => error!(
                "event=doc_delete_failed module=controller collection={} id={id} error={err}",
                I::COLLECTION
            ),
        }
    }

    /// Copies the matching item's title into a brand-new todo document in
    /// the promote target collection.
    ///
    /// Fire-and-forget: neither local list is mutated; the todo side
    /// surfaces the new entry through its own change feed. A missing
    /// source id is a defined no-op.
    pub async fn handle_promote(&mut self, id: &ItemId) {
        let Some(target) = self.promote_into else {
            warn!(
                "event=promote_unavailable module=controller collection={}",
                I::COLLECTION
            );
            return;
        };

        // Capture only the title; the model may be replaced by a resync
        // while the create is in flight.
        let Some(title) = self
            .model
            .items()
            .iter()
            .find(|item| item.id() == id)
            .map(|item| item.title().to_string())
        else {
            debug!(
                "event=promote_source_missing module=controller collection={} id={id}",
                I::COLLECTION
            );
            return;
        };

        let record = match TodoItem::new(&title, &self.owner).to_document() {
            Ok(record) => record,
            Err(err) => {
                error!("event=doc_encode_failed module=controller collection={target} error={err}");
                return;
            }
        };

        match self.store.create(target, record).await {
            Ok(doc_id) => {
                info!("event=doc_created module=controller collection={target} id={doc_id}");
                self.stamp_document_id(target, &doc_id).await;
            }
            Err(err) => {
                error!("event=doc_create_failed module=controller collection={target} error={err}")
            }
        }
    }

    /// Form submission: suppress the default side effect, take the input
    /// value and forward it as an add. Inert while unmounted, matching a
    /// detached submit handler.
    pub async fn handle_submit(&mut self, event: &mut SubmitEvent) {
        if !self.is_mounted() {
            debug!(
                "event=submit_ignored module=controller collection={} status=unmounted",
                I::COLLECTION
            );
            return;
        }
        event.prevent_default();
        let title = event.take_input();
        self.handle_add(&title).await;
    }

    /// Dispatches one shell-delivered intent.
    pub async fn handle_intent(&mut self, intent: ListIntent) {
        match intent {
            ListIntent::Add { title } => self.handle_add(&title).await,
            ListIntent::Update { id, completed } => self.handle_update(&id, completed).await,
            ListIntent::Delete { id } => self.handle_delete(&id).await,
            ListIntent::Promote { id } => self.handle_promote(&id).await,
        }
    }

    /// Registers the render listener on the current model. Idempotent.
    pub fn mount(&mut self) {
        if self.render_listener.is_some() {
            return;
        }
        let view = Rc::clone(&self.view);
        let id = self.model.on_change(move |model| {
            view.borrow_mut().render(model.items(), model.total_count());
        });
        self.render_listener = Some(id);
    }

    /// Removes the render listener. Idempotent; safe before any mount.
    pub fn unmount(&mut self) {
        if let Some(id) = self.render_listener.take() {
            self.model.off_change(id);
        }
    }

    /// Writes the store-assigned key back into the document's own `id`
    /// field. Failure is logged and does not abort the caller.
    async fn stamp_document_id(&self, collection: &str, id: &DocumentId) {
        let mut fields = Document::new();
        fields.insert("id".to_string(), Value::String(id.as_str().to_string()));
        if let Err(err) = self.store.update_fields(collection, id, fields).await {
            error!("event=doc_id_stamp_failed module=controller collection={collection} id={id} error={err}");
        }
    }
}
