//! Controllers mediating user intents, list models and the remote store.
//!
//! # Responsibility
//! - Translate user intents into local mutations plus remote writes.
//! - Translate remote push signals into full local reloads.
//!
//! # Invariants
//! - Optimistic mutations render before the remote write is issued.
//! - Remote failures are logged, never re-raised, never rolled back; the
//!   next push-driven resync reconciles any divergence.

pub mod list_controller;
