//! Remote document-store boundary.
//!
//! # Responsibility
//! - Define the async contract the list controllers consume.
//! - Keep document/key/error types in one place.
//!
//! # Invariants
//! - The store assigns document keys; callers never invent them.
//! - Change feeds carry no diff, only a "something changed" signal.

pub mod memory;
pub mod remote;
