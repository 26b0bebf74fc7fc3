//! # Storage Module
//!
//! Handles all persistence for the allocation engine.
//!
//! The domain layer only sees the traits in [`traits`]: a record store with an
//! `allocations` and a `users` collection, each keyed by entity ID, plus the
//! guarded updates needed for accrual and withdrawal. The bundled
//! implementation is a file-backed YAML document store; a hosted document
//! database can be plugged in by implementing the same traits.

pub mod document;
pub mod traits;

pub use document::DocumentConnection;
pub use traits::{AllocationStorage, ConditionalUpdate, Connection, UserStorage};
