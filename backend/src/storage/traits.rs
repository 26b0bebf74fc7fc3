//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! record stores to be used interchangeably in the domain layer.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::models::allocation::Allocation;
use crate::domain::models::user::User;

/// Outcome of a guarded single-record update
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionalUpdate {
    /// The guard held and the record was rewritten; carries the new record
    Applied(Allocation),
    /// The guard failed; carries the record as currently stored
    Rejected(Allocation),
    /// No record with that ID exists
    Missing,
}

/// Trait defining the interface for allocation storage operations
///
/// Documents live in the `allocations` collection keyed by allocation ID.
#[async_trait]
pub trait AllocationStorage: Send + Sync {
    /// Store a new allocation
    async fn store_allocation(&self, allocation: &Allocation) -> Result<()>;

    /// Retrieve a specific allocation by ID
    async fn get_allocation(&self, allocation_id: &str) -> Result<Option<Allocation>>;

    /// List a user's allocations ordered by allocation date descending (newest first)
    async fn list_allocations_for_user(&self, user_id: &str) -> Result<Vec<Allocation>>;

    /// Overwrite only the derived accrual fields.
    /// Rejected when the allocation has already been withdrawn.
    async fn update_accrual(
        &self,
        allocation_id: &str,
        total_revenue: f64,
        can_withdraw: bool,
    ) -> Result<ConditionalUpdate>;

    /// Compare-and-swap withdrawal: sets the withdrawal timestamp, zeroes the
    /// revenue and clears the flag, but only if no withdrawal timestamp is set yet.
    async fn mark_withdrawn(
        &self,
        allocation_id: &str,
        withdrawn_at: DateTime<Utc>,
    ) -> Result<ConditionalUpdate>;
}

/// Trait defining the interface for user storage operations
#[async_trait]
pub trait UserStorage: Send + Sync {
    /// Store a user, replacing any existing document with the same ID
    async fn store_user(&self, user: &User) -> Result<()>;

    /// Retrieve a specific user by ID
    async fn get_user(&self, user_id: &str) -> Result<Option<User>>;
}

/// Trait defining the interface for storage connections
///
/// Provides factory methods for creating repositories so the domain layer can
/// work with any record store without knowing the implementation details.
pub trait Connection: Send + Sync + Clone {
    type AllocationRepository: AllocationStorage + Clone;
    type UserRepository: UserStorage + Clone;

    fn create_allocation_repository(&self) -> Self::AllocationRepository;

    fn create_user_repository(&self) -> Self::UserRepository;
}
