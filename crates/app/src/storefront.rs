//! Storefront: every service, constructed once and owned in one place.

use std::sync::Arc;

use anyhow::Context;

use plantpal_auth::{IdentityProvider, SimulatedIdentityProvider, User};
use plantpal_catalog::{Catalog, FilterCriteria, Product, RELATED_COUNT, SortKey};
use plantpal_checkout::{
    CheckoutError, CheckoutFlow, CheckoutStep, OrderConfirmation, OrderProcessor, OrderSummary,
    PaymentInfo, SimulatedOrderProcessor,
};
use plantpal_core::{DomainError, DomainResult, ProductId};
use plantpal_infra::{
    CartService, FileStore, InMemoryStore, KeyValueStore, SessionService, WishlistService,
};

use crate::config::StorefrontConfig;

/// Store handle shared by the cart, wishlist and session services.
pub type SharedStore = Arc<dyn KeyValueStore>;

pub struct Storefront {
    catalog: Arc<Catalog>,
    cart: CartService<SharedStore>,
    wishlist: WishlistService<SharedStore>,
    session: SessionService<SharedStore, Arc<dyn IdentityProvider>>,
    orders: Arc<dyn OrderProcessor>,
    checkout: Option<CheckoutFlow>,
}

impl core::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Storefront")
            .field("products", &self.catalog.len())
            .field("cart_items", &self.cart.item_count())
            .field("wishlist", &self.wishlist.items().len())
            .field("signed_in", &self.session.is_signed_in())
            .field("checkout", &self.checkout.as_ref().map(CheckoutFlow::step))
            .finish()
    }
}

impl Storefront {
    /// Build the storefront from configuration with the built-in catalog and
    /// the simulated identity and order services.
    pub fn bootstrap(config: &StorefrontConfig) -> anyhow::Result<Self> {
        let store: SharedStore = match &config.data_dir {
            Some(dir) => Arc::new(
                FileStore::open(dir)
                    .with_context(|| format!("failed to open data directory {}", dir.display()))?,
            ),
            None => Arc::new(InMemoryStore::new()),
        };
        let catalog = Catalog::builtin().context("built-in catalog is invalid")?;

        tracing::info!(
            products = catalog.len(),
            data_dir = ?config.data_dir,
            "storefront ready"
        );
        Ok(Self::with_parts(
            Arc::new(catalog),
            store,
            Arc::new(SimulatedIdentityProvider::new(config.auth_delay)),
            Arc::new(SimulatedOrderProcessor::new(config.order_delay)),
        ))
    }

    /// Wire explicit collaborators (tests, alternative backends).
    pub fn with_parts(
        catalog: Arc<Catalog>,
        store: SharedStore,
        identity: Arc<dyn IdentityProvider>,
        orders: Arc<dyn OrderProcessor>,
    ) -> Self {
        Self {
            catalog,
            cart: CartService::load(store.clone()),
            wishlist: WishlistService::load(store.clone()),
            session: SessionService::load(store, identity),
            orders,
            checkout: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &CartService<SharedStore> {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut CartService<SharedStore> {
        &mut self.cart
    }

    pub fn wishlist(&self) -> &WishlistService<SharedStore> {
        &self.wishlist
    }

    pub fn wishlist_mut(&mut self) -> &mut WishlistService<SharedStore> {
        &mut self.wishlist
    }

    pub fn session(&self) -> &SessionService<SharedStore, Arc<dyn IdentityProvider>> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionService<SharedStore, Arc<dyn IdentityProvider>> {
        &mut self.session
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.current_user()
    }

    /// Shop page view.
    pub fn browse(&self, criteria: &FilterCriteria, sort: SortKey) -> Vec<&Product> {
        self.catalog.query(criteria, sort)
    }

    /// Detail page: the product and a few from the same category.
    pub fn product_detail(&self, product_id: &ProductId) -> Option<(&Product, Vec<&Product>)> {
        let product = self.catalog.get(product_id)?;
        Some((product, self.catalog.related(product_id, RELATED_COUNT)))
    }

    pub fn add_to_cart(&mut self, product_id: &ProductId, quantity: u32) -> DomainResult<()> {
        let product = lookup(&self.catalog, product_id)?;
        self.cart.add_item(product, quantity)
    }

    /// Returns whether the product is in the wishlist afterwards.
    pub fn toggle_wishlist(&mut self, product_id: &ProductId) -> DomainResult<bool> {
        let product = lookup(&self.catalog, product_id)?;
        Ok(self.wishlist.toggle(product))
    }

    /// Move a wishlist item into the cart (one unit), leaving the wishlist as is.
    pub fn wishlist_to_cart(&mut self, product_id: &ProductId) -> DomainResult<()> {
        if !self.wishlist.contains(product_id) {
            return Err(DomainError::not_found(format!("wishlist item {product_id}")));
        }
        self.add_to_cart(product_id, 1)
    }

    /// Cart and checkout totals for the current cart.
    pub fn order_summary(&self) -> OrderSummary {
        OrderSummary::from_subtotal(self.cart.subtotal())
    }

    pub fn checkout(&self) -> Option<&CheckoutFlow> {
        self.checkout.as_ref()
    }

    pub fn checkout_mut(&mut self) -> Option<&mut CheckoutFlow> {
        self.checkout.as_mut()
    }

    /// Start (or restart) checkout at the shipping step.
    pub fn begin_checkout(&mut self) -> Result<&mut CheckoutFlow, CheckoutError> {
        let flow = CheckoutFlow::start(self.session.current_user(), self.cart.cart())?;
        Ok(self.checkout.insert(flow))
    }

    /// Submit payment for the checkout in progress. On success the cart is
    /// cleared and the checkout ends.
    pub async fn place_order(
        &mut self,
        payment: PaymentInfo,
    ) -> Result<OrderConfirmation, CheckoutError> {
        let user = self
            .session
            .current_user()
            .cloned()
            .ok_or(CheckoutError::NotSignedIn)?;
        let flow = self.checkout.as_mut().ok_or(CheckoutError::WrongStep {
            expected: CheckoutStep::Payment,
            actual: CheckoutStep::Shipping,
        })?;

        let confirmation = flow
            .place_order(payment, &user, self.cart.cart(), self.orders.as_ref())
            .await?;

        self.cart.clear();
        self.checkout = None;
        Ok(confirmation)
    }
}

fn lookup<'a>(catalog: &'a Catalog, product_id: &ProductId) -> DomainResult<&'a Product> {
    catalog
        .get(product_id)
        .ok_or_else(|| DomainError::not_found(format!("product {product_id}")))
}
