//! Ordered item collection with synchronous change notification.
//!
//! # Responsibility
//! - Hold the in-memory sequence for one list flavour.
//! - Notify registered listeners on every mutation.
//!
//! # Invariants
//! - Assigned item ids are pairwise distinct; a duplicate `add` is a
//!   silent no-op and emits nothing.
//! - `update`/`delete` always emit exactly one notification, even when
//!   the target id is absent (a benign race with a concurrent reload).
//! - Listeners run synchronously, in registration order, and may not
//!   mutate the model re-entrantly (they only receive `&ListModel`).

use crate::model::item::{ItemId, ListItem};
use log::debug;

/// Handle returned by [`ListModel::on_change`], used to deregister.
///
/// Closures have no identity in Rust, so deregistration is handle-based
/// rather than by-function-value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<I> = Box<dyn Fn(&ListModel<I>)>;

/// In-memory ordered collection of one list flavour.
///
/// Created fresh on every full reload and discarded wholesale; mutated in
/// place between reloads.
pub struct ListModel<I: ListItem> {
    items: Vec<I>,
    listeners: Vec<(ListenerId, Listener<I>)>,
    next_listener: u64,
}

impl<I: ListItem> Default for ListModel<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: ListItem> ListModel<I> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Returns the current ordered sequence.
    ///
    /// Order is insertion order; a reload rebuilds the model in remote
    /// enumeration order.
    pub fn items(&self) -> &[I] {
        &self.items
    }

    pub fn total_count(&self) -> usize {
        self.items.len()
    }

    /// Appends an item and notifies listeners.
    ///
    /// An item whose assigned id is already present is dropped without a
    /// notification, keeping the uniqueness invariant intact.
    pub fn add(&mut self, item: I) {
        if item.id().is_assigned() && self.items.iter().any(|held| held.id() == item.id()) {
            debug!(
                "event=list_add_duplicate module=model id={} status=skipped",
                item.id()
            );
            return;
        }
        self.items.push(item);
        self.emit_change();
    }

    /// Replaces the `completed` flag of the matching item.
    ///
    /// A miss is a no-op but still notifies: the caller already treated
    /// the mutation as applied and the view must stay in step.
    pub fn update(&mut self, id: &ItemId, completed: bool) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id() == id) {
            item.set_completed(completed);
        }
        self.emit_change();
    }

    /// Removes the matching item; notifies whether or not one was removed.
    pub fn delete(&mut self, id: &ItemId) {
        self.items.retain(|item| item.id() != id);
        self.emit_change();
    }

    /// Registers a change listener; returns the deregistration handle.
    pub fn on_change(&mut self, listener: impl Fn(&ListModel<I>) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Deregisters a listener; unknown handles are ignored.
    pub fn off_change(&mut self, id: ListenerId) {
        self.listeners.retain(|(held, _)| *held != id);
    }

    /// Invokes every registered listener synchronously, in registration
    /// order.
    pub fn emit_change(&self) {
        for (_, listener) in &self.listeners {
            listener(self);
        }
    }
}
