//! Conversions between domain models and the shared DTOs.

pub mod allocation_mapper;
pub mod product_mapper;
pub mod user_mapper;

pub use allocation_mapper::AllocationMapper;
pub use product_mapper::ProductMapper;
pub use user_mapper::UserMapper;
