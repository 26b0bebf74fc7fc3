//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer is responsible for mapping the
//! public DTOs defined in the `shared` crate to these internal types.

pub mod allocation {
    use crate::domain::accrual::{AccrualSnapshot, WithdrawalCountdown};
    use crate::domain::models::allocation::Allocation;
    use crate::domain::models::payment::PaymentDetails;

    /// Payment confirmation signal: creates exactly one allocation.
    #[derive(Debug, Clone)]
    pub struct CreateAllocationCommand {
        pub user_id: String,
        pub product_id: String,
        pub payment_method: PaymentDetails,
    }

    #[derive(Debug, Clone)]
    pub struct CreateAllocationResult {
        pub allocation: Allocation,
        pub success_message: String,
    }

    /// An allocation after its accrual has been evaluated.
    #[derive(Debug, Clone)]
    pub struct AllocationEvaluation {
        /// The record as persisted after evaluation
        pub allocation: Allocation,
        pub snapshot: AccrualSnapshot,
        /// `None` once the allocation has been withdrawn
        pub countdown: Option<WithdrawalCountdown>,
    }

    #[derive(Debug, Clone)]
    pub struct WithdrawResult {
        pub allocation: Allocation,
        /// Revenue that was accrued at the moment of withdrawal
        pub amount_withdrawn: f64,
        pub success_message: String,
    }

    /// Dashboard totals for one user.
    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub struct PortfolioSummary {
        pub allocation_count: usize,
        pub total_allocated: f64,
        pub total_revenue: f64,
    }
}

pub mod user {
    /// Input for registering (or re-registering) a user.
    #[derive(Debug, Clone)]
    pub struct RegisterUserCommand {
        pub id: String,
        pub email: String,
        pub name: Option<String>,
    }
}
