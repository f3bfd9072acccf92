//! Domain model for owner-partitioned task/todo lists.
//!
//! # Responsibility
//! - Define the item entities shared by both list flavours.
//! - Provide the ordered list collection with change notification.
//!
//! # Invariants
//! - Within one `ListModel`, assigned item ids are pairwise distinct.
//! - Every successful mutation notifies listeners synchronously, in
//!   registration order.

pub mod item;
pub mod list;
