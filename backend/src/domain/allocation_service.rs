//! Allocation lifecycle: creation, accrual evaluation and withdrawal.
//!
//! ## Business Rules
//!
//! - An allocation is created once, when a payment has been confirmed, and
//!   snapshots the product's price and daily rate
//! - Revenue accrues per whole elapsed day; nothing is written before day one
//! - Withdrawal opens once the product's withdrawal period has elapsed
//! - Withdrawal is terminal: revenue drops to zero and never accrues again
//! - A failed operation never leaves a partially updated record behind
//!
//! Every operation takes the evaluation instant explicitly, which keeps the
//! accrual model a deterministic function of its inputs.

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use std::sync::Arc;

use crate::domain::accrual::{remaining_time, AccrualSnapshot};
use crate::domain::commands::allocation::{
    AllocationEvaluation, CreateAllocationCommand, CreateAllocationResult, PortfolioSummary,
    WithdrawResult,
};
use crate::domain::errors::{AllocationError, AllocationResult};
use crate::domain::models::allocation::Allocation;
use crate::domain::models::user::User;
use crate::domain::product_catalog::ProductCatalog;
use crate::domain::user_service::UserService;
use crate::storage::{AllocationStorage, ConditionalUpdate, Connection};

#[derive(Clone)]
pub struct AllocationService<C: Connection> {
    allocation_repository: C::AllocationRepository,
    user_service: UserService<C>,
    catalog: Arc<ProductCatalog>,
}

impl<C: Connection> AllocationService<C> {
    pub fn new(connection: Arc<C>, catalog: Arc<ProductCatalog>, user_service: UserService<C>) -> Self {
        let allocation_repository = connection.create_allocation_repository();
        Self {
            allocation_repository,
            user_service,
            catalog,
        }
    }

    /// Create the allocation for a confirmed payment
    pub async fn create_allocation(
        &self,
        command: CreateAllocationCommand,
        now: DateTime<Utc>,
    ) -> AllocationResult<CreateAllocationResult> {
        info!(
            "Creating allocation of '{}' for user '{}' via {}",
            command.product_id,
            command.user_id,
            command.payment_method.method_name()
        );

        if User::normalize_id(&command.user_id).is_empty() {
            return Err(AllocationError::Validation("User id is required".to_string()));
        }
        command.payment_method.validate()?;

        let product = self.catalog.require_product(&command.product_id)?;
        if product.price <= 0.0 {
            return Err(AllocationError::Validation(
                "Amount must be greater than 0".to_string(),
            ));
        }

        let user = self.user_service.get_user(&command.user_id).await?;

        let allocation = Allocation {
            id: Allocation::generate_id(),
            user_id: user.id,
            product_id: product.id.clone(),
            allocation_date: now,
            total_paid: product.price,
            payment_method: command.payment_method,
            daily_revenue: product.daily_revenue,
            total_revenue: 0.0,
            can_withdraw: false,
            withdrawn_at: None,
        };

        self.allocation_repository.store_allocation(&allocation).await?;

        info!(
            "Created allocation '{}': ${:.2} paid, ${:.2}/day, withdrawable after {} days",
            allocation.id, allocation.total_paid, allocation.daily_revenue, product.withdrawal_period
        );

        Ok(CreateAllocationResult {
            allocation,
            success_message: format!("Allocation in {} created successfully", product.name),
        })
    }

    pub async fn get_allocation(&self, allocation_id: &str) -> AllocationResult<Allocation> {
        self.allocation_repository
            .get_allocation(allocation_id)
            .await?
            .ok_or_else(|| AllocationError::allocation_not_found(allocation_id))
    }

    /// Recompute the derived accrual fields and persist them.
    ///
    /// Idempotent: evaluating twice at the same instant yields the same record.
    pub async fn evaluate_accrual(
        &self,
        allocation_id: &str,
        now: DateTime<Utc>,
    ) -> AllocationResult<AllocationEvaluation> {
        let allocation = self.get_allocation(allocation_id).await?;
        self.evaluate_loaded(allocation, now).await
    }

    async fn evaluate_loaded(
        &self,
        allocation: Allocation,
        now: DateTime<Utc>,
    ) -> AllocationResult<AllocationEvaluation> {
        let product = self.catalog.require_product(&allocation.product_id)?;
        let mut snapshot = AccrualSnapshot::compute(&allocation, product, now);

        let allocation = if snapshot.should_persist() && !snapshot.matches(&allocation) {
            match self
                .allocation_repository
                .update_accrual(&allocation.id, snapshot.total_revenue, snapshot.can_withdraw)
                .await?
            {
                ConditionalUpdate::Applied(updated) => updated,
                ConditionalUpdate::Rejected(current) => {
                    warn!(
                        "Allocation '{}' was withdrawn while being evaluated, keeping stored state",
                        current.id
                    );
                    snapshot = AccrualSnapshot::compute(&current, product, now);
                    current
                }
                ConditionalUpdate::Missing => {
                    return Err(AllocationError::allocation_not_found(&allocation.id));
                }
            }
        } else {
            allocation
        };

        debug!(
            "Evaluated allocation '{}' ({:?}): {} days, ${:.2}, withdrawable: {}",
            allocation.id,
            allocation.status(),
            snapshot.elapsed_days,
            allocation.total_revenue,
            allocation.can_withdraw
        );

        let countdown = if allocation.is_withdrawn() {
            None
        } else {
            Some(remaining_time(allocation.allocation_date, product.withdrawal_period, now))
        };

        Ok(AllocationEvaluation {
            allocation,
            snapshot,
            countdown,
        })
    }

    /// Withdraw the accrued revenue of an eligible allocation.
    ///
    /// Eligibility is re-derived at `now` with the same rule the evaluator
    /// uses. The store applies the transition as a compare-and-swap on the
    /// withdrawal timestamp, so of two racing callers exactly one succeeds.
    pub async fn withdraw(&self, allocation_id: &str, now: DateTime<Utc>) -> AllocationResult<WithdrawResult> {
        info!("Withdrawal requested for allocation '{}'", allocation_id);

        let allocation = self.get_allocation(allocation_id).await?;
        if allocation.is_withdrawn() {
            return Err(already_withdrawn(allocation_id));
        }

        let product = self.catalog.require_product(&allocation.product_id)?;
        let snapshot = AccrualSnapshot::compute(&allocation, product, now);
        if !snapshot.can_withdraw {
            return Err(AllocationError::InvalidState(format!(
                "Allocation {} is not eligible for withdrawal yet ({} of {} days elapsed)",
                allocation_id, snapshot.elapsed_days, product.withdrawal_period
            )));
        }

        match self.allocation_repository.mark_withdrawn(allocation_id, now).await? {
            ConditionalUpdate::Applied(updated) => {
                info!("Withdrew ${:.2} from allocation '{}'", snapshot.total_revenue, allocation_id);
                Ok(WithdrawResult {
                    allocation: updated,
                    amount_withdrawn: snapshot.total_revenue,
                    success_message: format!("Withdrew ${:.2}", snapshot.total_revenue),
                })
            }
            ConditionalUpdate::Rejected(_) => Err(already_withdrawn(allocation_id)),
            ConditionalUpdate::Missing => Err(AllocationError::allocation_not_found(allocation_id)),
        }
    }

    /// A user's allocations as stored, newest first
    pub async fn list_user_allocations(&self, user_id: &str) -> AllocationResult<Vec<Allocation>> {
        Ok(self
            .allocation_repository
            .list_allocations_for_user(User::normalize_id(user_id))
            .await?)
    }

    /// Evaluate every allocation of a user, newest first.
    ///
    /// Allocations whose product left the catalog are returned as stored.
    pub async fn refresh_user_allocations(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> AllocationResult<Vec<Allocation>> {
        let allocations = self.list_user_allocations(user_id).await?;
        let mut refreshed = Vec::with_capacity(allocations.len());

        for allocation in allocations {
            match self.evaluate_loaded(allocation.clone(), now).await {
                Ok(evaluation) => refreshed.push(evaluation.allocation),
                Err(AllocationError::NotFound { entity: "Product", id }) => {
                    warn!("Allocation '{}' references unknown product '{}'", allocation.id, id);
                    refreshed.push(allocation);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(refreshed)
    }

    pub async fn portfolio_summary(&self, user_id: &str) -> AllocationResult<PortfolioSummary> {
        let allocations = self.list_user_allocations(user_id).await?;
        Ok(summarize(&allocations))
    }
}

fn already_withdrawn(allocation_id: &str) -> AllocationError {
    AllocationError::InvalidState(format!("Allocation {} has already been withdrawn", allocation_id))
}

pub fn summarize(allocations: &[Allocation]) -> PortfolioSummary {
    allocations.iter().fold(PortfolioSummary::default(), |mut summary, allocation| {
        summary.allocation_count += 1;
        summary.total_allocated += allocation.total_paid;
        summary.total_revenue += allocation.total_revenue;
        summary
    })
}
