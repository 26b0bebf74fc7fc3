//! # IO Module
//!
//! Adapter layer between HTTP clients and the domain. It owns request and
//! response translation and error-to-status mapping, and holds no business
//! rules of its own.

pub mod rest;

pub use rest::*;
