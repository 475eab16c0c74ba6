//! Storefront services: each owns one piece of persisted client state.

pub mod cart;
pub mod session;
pub mod wishlist;

pub use cart::CartService;
pub use session::SessionService;
pub use wishlist::WishlistService;
