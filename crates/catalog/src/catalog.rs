//! The immutable product catalog.

use std::collections::HashSet;

use plantpal_core::{DomainError, DomainResult, ProductId};

use crate::product::{CareLevel, Category, LightNeeds, Product};
use crate::query::{FilterCriteria, SortKey, query};

/// Category label meaning "no category constraint".
pub const ALL_PLANTS: &str = "All Plants";

/// Number of products shown on the home page.
pub const FEATURED_COUNT: usize = 4;

/// Number of related products shown on a detail page.
pub const RELATED_COUNT: usize = 4;

const BUILTIN_CATALOG: &str = include_str!("../data/plants.json");

/// Category choices for the shop sidebar, sentinel first.
pub fn categories() -> Vec<&'static str> {
    core::iter::once(ALL_PLANTS)
        .chain(Category::ALL.iter().map(|c| c.as_str()))
        .collect()
}

/// Ordered, validated list of products. Never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, validating every product and identifier uniqueness.
    pub fn new(products: Vec<Product>) -> DomainResult<Self> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            product.validate()?;
            if !seen.insert(&product.id) {
                return Err(DomainError::conflict(format!(
                    "duplicate product id {}",
                    product.id
                )));
            }
        }
        Ok(Self { products })
    }

    /// Parse a JSON array of products (prices in cents).
    pub fn from_json(json: &str) -> DomainResult<Self> {
        let products: Vec<Product> = serde_json::from_str(json)
            .map_err(|e| DomainError::validation(format!("catalog JSON: {e}")))?;
        Self::new(products)
    }

    /// The compiled-in seed catalog.
    pub fn builtin() -> DomainResult<Self> {
        let catalog = Self::from_json(BUILTIN_CATALOG)?;
        tracing::debug!(products = catalog.len(), "loaded built-in catalog");
        Ok(catalog)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// First `n` products in catalog order.
    pub fn featured(&self, n: usize) -> &[Product] {
        &self.products[..n.min(self.products.len())]
    }

    /// Up to `n` other products from the same category, in catalog order.
    ///
    /// Empty when `id` is not in the catalog.
    pub fn related(&self, id: &ProductId, n: usize) -> Vec<&Product> {
        let Some(product) = self.get(id) else {
            return Vec::new();
        };
        self.products
            .iter()
            .filter(|p| &p.id != id && p.category == product.category)
            .take(n)
            .collect()
    }

    /// Filtered, sorted view (see [`query`]).
    pub fn query(&self, criteria: &FilterCriteria, sort: SortKey) -> Vec<&Product> {
        query(&self.products, criteria, sort)
    }

    pub fn care_levels(&self) -> &'static [CareLevel] {
        CareLevel::ALL
    }

    pub fn light_needs(&self) -> &'static [LightNeeds] {
        LightNeeds::ALL
    }
}
