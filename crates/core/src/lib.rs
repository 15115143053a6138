//! Chocolaterie Core - Shared domain types.
//!
//! This crate provides the domain model used by the API server:
//! products, orders, order items, customer records, and their identifiers.
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no database
//! access, no HTTP. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, product and order shapes, order status

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
