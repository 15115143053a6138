//! Core types for the Chocolaterie API.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod order;
pub mod product;
pub mod status;

pub use id::*;
pub use order::{CustomerInfo, Order, OrderItem, OrderRecord};
pub use product::{Product, ProductRecord, ProductValidationError};
pub use status::OrderStatus;
