//! Business services over the document store.
//!
//! Each service borrows the store handle for the duration of a request, the
//! same way repositories borrow the pool. No service holds state of its own.

pub mod catalog;
pub mod checkout;
pub mod seed;

pub use catalog::{CatalogError, CatalogService};
pub use checkout::{CheckoutError, CheckoutItem, CheckoutService};
pub use seed::{SeedError, SeedOutcome, SeedService};
