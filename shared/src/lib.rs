use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog entry a user can allocate into
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    /// Price paid for one allocation
    pub price: f64,
    pub image: String,
    pub description: String,
    /// Simulated revenue credited per whole day
    pub daily_revenue: f64,
    /// Cooldown in whole days before revenue can be withdrawn
    pub withdrawal_period: u32,
}

/// Registered storefront user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
}

/// Mobile money operators accepted at checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MobileMoneyProvider {
    OrangeMoney,
    MtnMomo,
}

impl fmt::Display for MobileMoneyProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MobileMoneyProvider::OrangeMoney => write!(f, "Orange Money"),
            MobileMoneyProvider::MtnMomo => write!(f, "MTN MoMo"),
        }
    }
}

/// Payment details submitted with a checkout, one variant per payment method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "kebab-case")]
pub enum PaymentMethod {
    MobileMoney {
        provider: MobileMoneyProvider,
        phone_number: String,
    },
    #[serde(rename = "paypal")]
    PayPal { email: String },
    Crypto { address: String },
}

/// A user's notional share in a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    /// Allocation ID in format: "allocation::<uuid>"
    pub id: String,
    pub user_id: String,
    pub product_id: String,
    /// Creation time (RFC 3339)
    pub allocation_date: String,
    pub total_paid: f64,
    pub payment_method: PaymentMethod,
    /// Daily rate captured at allocation time
    pub daily_revenue: f64,
    /// Revenue accrued so far
    pub total_revenue: f64,
    pub can_withdraw: bool,
    /// Set once the revenue has been withdrawn (RFC 3339)
    pub withdrawn_at: Option<String>,
}

/// Time left before an allocation becomes withdrawable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WithdrawalCountdown {
    EligibleNow,
    Remaining { days: i64, hours: i64, minutes: i64 },
    Withdrawn,
}

/// Query string of the product listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductListRequest {
    /// Only return products of this category
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub user: User,
}

/// Sent by the checkout flow once a payment has been confirmed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAllocationRequest {
    pub user_id: String,
    pub product_id: String,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAllocationResponse {
    pub allocation: Allocation,
    pub success_message: String,
}

/// Allocation as seen at evaluation time, with its countdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationStatusResponse {
    pub allocation: Allocation,
    pub elapsed_days: u64,
    pub countdown: WithdrawalCountdown,
    /// Human readable countdown, e.g. "2d 3h 15m"
    pub countdown_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationListRequest {
    /// Re-evaluate accrual for every allocation before returning
    #[serde(default)]
    pub refresh: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationListResponse {
    pub allocations: Vec<Allocation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawResponse {
    pub allocation: Allocation,
    pub amount_withdrawn: f64,
    pub success_message: String,
}

/// Dashboard totals for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub allocation_count: usize,
    pub total_allocated: f64,
    pub total_revenue: f64,
}

/// Error body returned by every failing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Stable error kind: not_found, invalid_state, validation_error, upstream_io
    pub error: String,
    pub message: String,
}

impl fmt::Display for WithdrawalCountdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WithdrawalCountdown::EligibleNow => write!(f, "Ready to withdraw"),
            WithdrawalCountdown::Withdrawn => write!(f, "Withdrawn"),
            WithdrawalCountdown::Remaining { days, hours, minutes } if *days > 0 => {
                write!(f, "{}d {}h {}m", days, hours, minutes)
            }
            WithdrawalCountdown::Remaining { hours, minutes, .. } => {
                write!(f, "{}h {}m", hours, minutes)
            }
        }
    }
}
