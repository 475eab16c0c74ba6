//! Wishlist domain module: a set of saved products, unique by id.

pub mod wishlist;

pub use wishlist::{Wishlist, WishlistCommand, WishlistEvent};
