//! Domain model for a catalog product.
use serde::{Deserialize, Serialize};

/// Longest cooldown a catalog may declare (a hundred years)
pub const MAX_WITHDRAWAL_PERIOD_DAYS: u32 = 36_500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    /// Currency units credited per whole elapsed day
    pub daily_revenue: f64,
    /// Whole days before accrued revenue becomes withdrawable
    pub withdrawal_period: u32,
}

impl Product {
    /// Check the catalog-level invariants of a single product
    pub fn validate(&self) -> Result<(), ProductValidationError> {
        if self.id.trim().is_empty() {
            return Err(ProductValidationError::EmptyId);
        }
        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(ProductValidationError::NonPositivePrice(self.id.clone()));
        }
        if !self.daily_revenue.is_finite() || self.daily_revenue < 0.0 {
            return Err(ProductValidationError::NegativeDailyRevenue(self.id.clone()));
        }
        if self.withdrawal_period == 0 {
            return Err(ProductValidationError::ZeroWithdrawalPeriod(self.id.clone()));
        }
        if self.withdrawal_period > MAX_WITHDRAWAL_PERIOD_DAYS {
            return Err(ProductValidationError::WithdrawalPeriodTooLong(self.id.clone()));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ProductValidationError {
    #[error("Product id cannot be empty")]
    EmptyId,
    #[error("Product {0} must have a positive price")]
    NonPositivePrice(String),
    #[error("Product {0} cannot have a negative daily revenue")]
    NegativeDailyRevenue(String),
    #[error("Product {0} must have a withdrawal period of at least one day")]
    ZeroWithdrawalPeriod(String),
    #[error("Product {0} has a withdrawal period longer than 36500 days")]
    WithdrawalPeriodTooLong(String),
    #[error("Duplicate product id: {0}")]
    DuplicateId(String),
}
