//! Domain model for an allocation.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::payment::PaymentDetails;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub id: String,
    pub user_id: String,
    pub product_id: String,
    pub allocation_date: DateTime<Utc>,
    /// Product price at the time of purchase
    pub total_paid: f64,
    pub payment_method: PaymentDetails,
    /// Snapshot of the product rate, unaffected by later catalog changes
    pub daily_revenue: f64,
    pub total_revenue: f64,
    pub can_withdraw: bool,
    #[serde(default)]
    pub withdrawn_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationStatus {
    Active,
    Withdrawn,
}

impl Allocation {
    /// Generate a fresh allocation ID
    pub fn generate_id() -> String {
        format!("allocation::{}", Uuid::new_v4())
    }

    pub fn is_withdrawn(&self) -> bool {
        self.withdrawn_at.is_some()
    }

    pub fn status(&self) -> AllocationStatus {
        if self.is_withdrawn() {
            AllocationStatus::Withdrawn
        } else {
            AllocationStatus::Active
        }
    }

    /// Apply the terminal withdrawal transition in one step
    pub fn mark_withdrawn(&mut self, at: DateTime<Utc>) {
        self.withdrawn_at = Some(at);
        self.total_revenue = 0.0;
        self.can_withdraw = false;
    }
}
