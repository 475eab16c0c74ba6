//! `plantpal-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no storage, no timers, no IO).

pub mod aggregate;
pub mod error;
pub mod id;
pub mod money;

pub use aggregate::{Aggregate, Event, Executed};
pub use error::{DomainError, DomainResult};
pub use id::{ProductId, UserId};
pub use money::Money;
