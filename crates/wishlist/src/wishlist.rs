use core::convert::Infallible;

use serde::{Deserialize, Serialize};

use plantpal_catalog::Product;
use plantpal_core::{Aggregate, Event, ProductId};

/// Aggregate root: Wishlist.
///
/// Members are unique by product id and kept in insertion order for display.
/// Serialized as the bare list of products.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Product>", into = "Vec<Product>")]
pub struct Wishlist {
    items: Vec<Product>,
    version: u64,
}

impl Wishlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from stored products, keeping the first occurrence of each id.
    pub fn from_items(items: Vec<Product>) -> Self {
        let mut unique: Vec<Product> = Vec::with_capacity(items.len());
        for item in items {
            if !unique.iter().any(|p| p.id == item.id) {
                unique.push(item);
            }
        }
        Self {
            items: unique,
            version: 0,
        }
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.items.iter().any(|p| &p.id == product_id)
    }
}

impl From<Vec<Product>> for Wishlist {
    fn from(items: Vec<Product>) -> Self {
        Self::from_items(items)
    }
}

impl From<Wishlist> for Vec<Product> {
    fn from(wishlist: Wishlist) -> Self {
        wishlist.items
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WishlistCommand {
    Add { product: Product },
    Remove { product_id: ProductId },
}

#[derive(Debug, Clone, PartialEq)]
pub enum WishlistEvent {
    Added { product: Product },
    Removed { product_id: ProductId },
}

impl Event for WishlistEvent {
    fn event_type(&self) -> &'static str {
        match self {
            WishlistEvent::Added { .. } => "wishlist.added",
            WishlistEvent::Removed { .. } => "wishlist.removed",
        }
    }
}

impl Aggregate for Wishlist {
    type Command = WishlistCommand;
    type Event = WishlistEvent;
    type Error = Infallible;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            WishlistEvent::Added { product } => self.items.push(product.clone()),
            WishlistEvent::Removed { product_id } => self.items.retain(|p| &p.id != product_id),
        }
        self.version += 1;
    }

    /// Adding a present product or removing an absent one emits nothing.
    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        let events = match command {
            WishlistCommand::Add { product } if !self.contains(&product.id) => {
                vec![WishlistEvent::Added {
                    product: product.clone(),
                }]
            }
            WishlistCommand::Remove { product_id } if self.contains(product_id) => {
                vec![WishlistEvent::Removed {
                    product_id: product_id.clone(),
                }]
            }
            _ => vec![],
        };
        Ok(events)
    }

    fn version(&self) -> u64 {
        self.version
    }
}
