pub mod allocation;
pub mod payment;
pub mod product;
pub mod user;
