use plantpal_cart::{Cart, CartCommand, CartLine};
use plantpal_catalog::Product;
use plantpal_core::{DomainResult, Money, ProductId};

use crate::persistent::Persistent;
use crate::store::{KeyValueStore, keys};

/// Cart aggregator persisted under [`keys::CART`].
#[derive(Debug)]
pub struct CartService<S> {
    inner: Persistent<Cart, S>,
}

impl<S: KeyValueStore> CartService<S> {
    pub fn load(store: S) -> Self {
        Self {
            inner: Persistent::load(store, keys::CART),
        }
    }

    pub fn cart(&self) -> &Cart {
        self.inner.state()
    }

    pub fn lines(&self) -> &[CartLine] {
        self.cart().lines()
    }

    pub fn subtotal(&self) -> Money {
        self.cart().subtotal()
    }

    pub fn item_count(&self) -> u64 {
        self.cart().item_count()
    }

    /// Add `quantity` (at least 1) of `product`, merging into an existing line.
    pub fn add_item(&mut self, product: &Product, quantity: u32) -> DomainResult<()> {
        self.inner
            .execute(&CartCommand::add(product.clone(), quantity))
            .map(drop)
    }

    /// Remove the product's line; nothing happens when it is absent.
    pub fn remove_item(&mut self, product_id: &ProductId) {
        self.run_total(CartCommand::remove(product_id.clone()));
    }

    /// Replace a line's quantity; zero or below removes it.
    ///
    /// Returns `DomainError::NotFound` for a positive quantity on a product
    /// that is not in the cart; the cart is left as it was.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) -> DomainResult<()> {
        self.inner
            .execute(&CartCommand::set_quantity(product_id.clone(), quantity))
            .map(drop)
    }

    pub fn clear(&mut self) {
        self.run_total(CartCommand::Clear);
    }

    /// For commands the cart never rejects.
    fn run_total(&mut self, command: CartCommand) {
        if let Err(err) = self.inner.execute(&command) {
            tracing::warn!(?command, error = %err, "cart command rejected");
        }
    }
}
