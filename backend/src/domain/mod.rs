//! # Domain Module
//!
//! Contains the business logic of the storefront allocation engine.
//!
//! A purchase confirmed at checkout becomes an allocation: a notional share
//! in a catalog product that accrues simulated revenue per whole day and can
//! be withdrawn once, after the product's cooldown has elapsed.
//!
//! ## Module Organization
//!
//! - **accrual**: Pure accrual math (elapsed days, revenue, eligibility, countdown)
//! - **allocation_service**: Allocation lifecycle on top of the record store
//! - **product_catalog**: Read-only product catalog and its validation
//! - **user_service**: User documents that own allocations
//! - **commands**: Internal command and result types used by the services
//! - **errors**: Error taxonomy shared by every service
//!
//! ## Business Rules
//!
//! - Revenue is `elapsed_days * daily_revenue`, with the rate captured at purchase
//! - Withdrawal opens when `elapsed_days >= withdrawal_period`
//! - A withdrawn allocation stays at zero revenue and is never withdrawable again

pub mod accrual;
pub mod allocation_service;
pub mod commands;
pub mod errors;
pub mod models;
pub mod product_catalog;
pub mod user_service;

pub use allocation_service::AllocationService;
pub use errors::{AllocationError, AllocationResult};
pub use product_catalog::ProductCatalog;
pub use user_service::UserService;
