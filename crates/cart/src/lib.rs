//! Cart domain module.
//!
//! Business rules for the shopping cart, implemented purely as deterministic
//! domain logic (no storage). Persistence lives in `plantpal-infra`.

pub mod cart;

pub use cart::{Cart, CartCommand, CartEvent, CartLine};
