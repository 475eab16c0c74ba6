//! `plantpal-app` — composition root.
//!
//! Builds every storefront service once from configuration and hands them
//! out by reference. Nothing here is reachable through ambient globals.

pub mod config;
pub mod storefront;

pub use config::StorefrontConfig;
pub use storefront::{SharedStore, Storefront};
