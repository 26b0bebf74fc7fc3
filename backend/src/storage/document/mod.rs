//! File-backed document store: one YAML file per document, one directory per collection.

pub mod allocation_repository;
pub mod connection;
pub mod user_repository;

#[cfg(test)]
pub mod test_utils;

pub use allocation_repository::AllocationRepository;
pub use connection::{DocumentConnection, DocumentUpdate, ALLOCATIONS_COLLECTION, USERS_COLLECTION};
pub use user_repository::UserRepository;
