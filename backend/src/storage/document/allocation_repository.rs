//! # Allocation Document Repository
//!
//! Stores each allocation as one YAML document in the `allocations`
//! collection. Derived-field updates and the withdrawal transition are
//! guarded read-modify-writes so a withdrawn allocation can never be
//! written back to an accruing state.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info};

use super::connection::{DocumentConnection, DocumentUpdate, ALLOCATIONS_COLLECTION};
use crate::domain::models::allocation::Allocation;
use crate::storage::traits::{AllocationStorage, ConditionalUpdate};

#[derive(Clone)]
pub struct AllocationRepository {
    connection: DocumentConnection,
}

impl AllocationRepository {
    pub fn new(connection: DocumentConnection) -> Self {
        Self { connection }
    }
}

impl From<DocumentUpdate<Allocation>> for ConditionalUpdate {
    fn from(update: DocumentUpdate<Allocation>) -> Self {
        match update {
            DocumentUpdate::Written(allocation) => ConditionalUpdate::Applied(allocation),
            DocumentUpdate::Unchanged(allocation) => ConditionalUpdate::Rejected(allocation),
            DocumentUpdate::Missing => ConditionalUpdate::Missing,
        }
    }
}

#[async_trait]
impl AllocationStorage for AllocationRepository {
    async fn store_allocation(&self, allocation: &Allocation) -> Result<()> {
        self.connection
            .write_document(ALLOCATIONS_COLLECTION, &allocation.id, allocation)
            .await?;
        info!("Stored allocation '{}' for user '{}'", allocation.id, allocation.user_id);
        Ok(())
    }

    async fn get_allocation(&self, allocation_id: &str) -> Result<Option<Allocation>> {
        self.connection
            .read_document(ALLOCATIONS_COLLECTION, allocation_id)
            .await
    }

    async fn list_allocations_for_user(&self, user_id: &str) -> Result<Vec<Allocation>> {
        let mut allocations: Vec<Allocation> = self
            .connection
            .list_documents::<Allocation>(ALLOCATIONS_COLLECTION)
            .await?
            .into_iter()
            .filter(|allocation| allocation.user_id == user_id)
            .collect();

        allocations.sort_by(|a, b| b.allocation_date.cmp(&a.allocation_date));
        debug!("Found {} allocations for user '{}'", allocations.len(), user_id);
        Ok(allocations)
    }

    async fn update_accrual(
        &self,
        allocation_id: &str,
        total_revenue: f64,
        can_withdraw: bool,
    ) -> Result<ConditionalUpdate> {
        let update = self
            .connection
            .update_document::<Allocation, _>(ALLOCATIONS_COLLECTION, allocation_id, |allocation| {
                if allocation.is_withdrawn() {
                    return false;
                }
                allocation.total_revenue = total_revenue;
                allocation.can_withdraw = can_withdraw;
                true
            })
            .await?;

        Ok(update.into())
    }

    async fn mark_withdrawn(
        &self,
        allocation_id: &str,
        withdrawn_at: DateTime<Utc>,
    ) -> Result<ConditionalUpdate> {
        let update = self
            .connection
            .update_document::<Allocation, _>(ALLOCATIONS_COLLECTION, allocation_id, |allocation| {
                if allocation.is_withdrawn() {
                    return false;
                }
                allocation.mark_withdrawn(withdrawn_at);
                true
            })
            .await?;

        if matches!(update, DocumentUpdate::Written(_)) {
            info!("Allocation '{}' withdrawn at {}", allocation_id, withdrawn_at.to_rfc3339());
        }
        Ok(update.into())
    }
}
