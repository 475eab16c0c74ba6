//! Infrastructure layer: durable key-value storage and the adapters that
//! persist cart, wishlist and session state through it.

pub mod persistent;
pub mod services;
pub mod store;

pub use persistent::Persistent;
pub use services::{CartService, SessionService, WishlistService};
pub use store::{FileStore, InMemoryStore, KeyValueStore, StoreError, StoreResult, keys};
