//! Render boundary consumed by the list controllers.
//!
//! Tree construction, diffing against the container and the count display
//! slot all live behind this trait; the core only hands over the current
//! item snapshot once per change notification. User interactions come
//! back as [`crate::controller::list_controller::ListIntent`]s.

use crate::model::item::ListItem;

/// External view renderer for one list flavour.
pub trait ViewSink<I: ListItem> {
    /// Replaces the rendered list with `items` and updates the count slot.
    ///
    /// Must be idempotent: redundant re-renders with identical input are
    /// expected during reloads.
    fn render(&mut self, items: &[I], total_count: usize);
}
