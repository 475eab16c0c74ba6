use plantpal_catalog::Product;
use plantpal_core::ProductId;
use plantpal_wishlist::{Wishlist, WishlistCommand};

use crate::persistent::Persistent;
use crate::store::{KeyValueStore, keys};

/// Wishlist set persisted under [`keys::WISHLIST`].
#[derive(Debug)]
pub struct WishlistService<S> {
    inner: Persistent<Wishlist, S>,
}

impl<S: KeyValueStore> WishlistService<S> {
    pub fn load(store: S) -> Self {
        Self {
            inner: Persistent::load(store, keys::WISHLIST),
        }
    }

    pub fn wishlist(&self) -> &Wishlist {
        self.inner.state()
    }

    /// Members in the order they were added.
    pub fn items(&self) -> &[Product] {
        self.wishlist().items()
    }

    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.wishlist().contains(product_id)
    }

    /// No-op when already present.
    pub fn add(&mut self, product: &Product) {
        self.run(WishlistCommand::Add {
            product: product.clone(),
        });
    }

    pub fn remove(&mut self, product_id: &ProductId) {
        self.run(WishlistCommand::Remove {
            product_id: product_id.clone(),
        });
    }

    /// Heart button: add when absent, remove when present. Returns the new membership.
    pub fn toggle(&mut self, product: &Product) -> bool {
        if self.contains(&product.id) {
            self.remove(&product.id);
            false
        } else {
            self.add(product);
            true
        }
    }

    fn run(&mut self, command: WishlistCommand) {
        let Ok(_) = self.inner.execute(&command);
    }
}
