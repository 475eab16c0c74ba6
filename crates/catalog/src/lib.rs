//! Catalog domain module.
//!
//! This crate holds the immutable product catalog and the query engine that
//! derives filtered, sorted views of it. Pure logic (no IO beyond parsing the
//! compiled-in seed data).

pub mod catalog;
pub mod product;
pub mod query;

pub use catalog::{ALL_PLANTS, Catalog, FEATURED_COUNT, RELATED_COUNT, categories};
pub use product::{CareGuide, CareLevel, Category, LightNeeds, Product};
pub use query::{DEFAULT_MAX_PRICE, FilterCriteria, SortKey, query};
