//! Catalog query engine: filter by criteria, then order by a sort key.
//!
//! Works by full linear scan; catalogs are tens of items.

use core::cmp::Ordering;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use plantpal_core::{DomainResult, Money};

use crate::catalog::ALL_PLANTS;
use crate::product::{CareLevel, Category, LightNeeds, Product};

/// Upper end of the price slider; also the cleared-filter ceiling.
pub const DEFAULT_MAX_PRICE: Money = Money::new(100, 0);

/// User-selected constraints. `None` (or an empty search) means "match all".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub search: String,
    pub category: Option<Category>,
    /// Inclusive ceiling; the floor is always zero.
    pub max_price: Option<Money>,
    pub care_level: Option<CareLevel>,
    pub light_needs: Option<LightNeeds>,
}

impl Default for FilterCriteria {
    /// The cleared state of the shop filters.
    fn default() -> Self {
        Self {
            search: String::new(),
            category: None,
            max_price: Some(DEFAULT_MAX_PRICE),
            care_level: None,
            light_needs: None,
        }
    }
}

impl FilterCriteria {
    /// Criteria that match every product regardless of price.
    pub fn match_all() -> Self {
        Self {
            max_price: None,
            ..Self::default()
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    /// Category from its label; `"All Plants"` or an empty label clears it.
    pub fn with_category_label(self, label: &str) -> DomainResult<Self> {
        let label = label.trim();
        let category = if label.is_empty() || label == ALL_PLANTS {
            None
        } else {
            Some(label.parse()?)
        };
        Ok(self.with_category(category))
    }

    pub fn with_max_price(mut self, max_price: Option<Money>) -> Self {
        self.max_price = max_price;
        self
    }

    pub fn with_care_level(mut self, care_level: Option<CareLevel>) -> Self {
        self.care_level = care_level;
        self
    }

    pub fn with_light_needs(mut self, light_needs: Option<LightNeeds>) -> Self {
        self.light_needs = light_needs;
        self
    }

    /// Number of active constraints shown on the filter toggle (price excluded).
    pub fn active_count(&self) -> usize {
        [
            self.category.is_some(),
            self.care_level.is_some(),
            self.light_needs.is_some(),
            !self.search.trim().is_empty(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    /// True when `product` satisfies every active constraint.
    pub fn matches(&self, product: &Product) -> bool {
        let needle = self.search.trim().to_lowercase();
        self.matches_with_needle(product, &needle)
    }

    fn matches_with_needle(&self, product: &Product, needle: &str) -> bool {
        product.matches_search(needle)
            && self.category.is_none_or(|c| product.category == c)
            && self.max_price.is_none_or(|max| product.price <= max)
            && self.care_level.is_none_or(|c| product.care_level == c)
            && self.light_needs.is_none_or(|l| product.light_needs == l)
    }
}

/// Ordering applied after filtering.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Most reviews first.
    #[default]
    Popularity,
    #[serde(rename = "price-low")]
    PriceAsc,
    #[serde(rename = "price-high")]
    PriceDesc,
    /// Name A-Z.
    Name,
    /// Highest rated first.
    Rating,
}

impl SortKey {
    pub const ALL: &'static [SortKey] = &[
        SortKey::Popularity,
        SortKey::PriceAsc,
        SortKey::PriceDesc,
        SortKey::Name,
        SortKey::Rating,
    ];

    /// Query-parameter value (`price-low`, ...).
    pub fn as_param(self) -> &'static str {
        match self {
            SortKey::Popularity => "popularity",
            SortKey::PriceAsc => "price-low",
            SortKey::PriceDesc => "price-high",
            SortKey::Name => "name",
            SortKey::Rating => "rating",
        }
    }

    /// Parse a query-parameter value; anything unrecognized sorts by popularity.
    pub fn from_param(value: &str) -> Self {
        SortKey::ALL
            .iter()
            .copied()
            .find(|k| k.as_param() == value.trim())
            .unwrap_or_default()
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Popularity => "Most Popular",
            SortKey::PriceAsc => "Price: Low to High",
            SortKey::PriceDesc => "Price: High to Low",
            SortKey::Name => "Name A-Z",
            SortKey::Rating => "Highest Rated",
        }
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortKey::Popularity => b.reviews.cmp(&a.reviews),
            SortKey::PriceAsc => a.price.cmp(&b.price),
            SortKey::PriceDesc => b.price.cmp(&a.price),
            SortKey::Name => compare_names(&a.name, &b.name),
            SortKey::Rating => b.rating.total_cmp(&a.rating),
        }
    }
}

/// Collation key for name ordering: canonical decomposition with combining
/// marks dropped, then lowercased. "Éa" keys as "ea".
fn collation_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Accent- and case-insensitive order first, then raw text as the tie-break.
fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

/// Filter `products` by `criteria` and order the result by `sort`.
///
/// Deterministic: ties keep their input order (stable sort).
pub fn query<'a>(products: &'a [Product], criteria: &FilterCriteria, sort: SortKey) -> Vec<&'a Product> {
    let needle = criteria.search.trim().to_lowercase();
    let mut matched: Vec<&Product> = products
        .iter()
        .filter(|p| criteria.matches_with_needle(p, &needle))
        .collect();
    matched.sort_by(|a, b| sort.compare(a, b));

    tracing::debug!(
        search = %criteria.search,
        sort = sort.as_param(),
        total = products.len(),
        matched = matched.len(),
        "catalog query"
    );
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::test_support::product;
    use proptest::prelude::*;

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    fn sample() -> Vec<Product> {
        let mut a = product("a", "Snake Plant", 3299);
        a.category = Category::LowMaintenance;
        a.care_level = CareLevel::Easy;
        a.light_needs = LightNeeds::Low;
        a.rating = 4.9;
        a.reviews = 189;

        let mut b = product("b", "fiddle Leaf Fig", 7899);
        b.category = Category::StatementPlants;
        b.care_level = CareLevel::Medium;
        b.light_needs = LightNeeds::High;
        b.rating = 4.6;
        b.reviews = 156;

        let mut c = product("c", "Aloe", 1500);
        c.category = Category::Succulents;
        c.care_level = CareLevel::Easy;
        c.light_needs = LightNeeds::High;
        c.rating = 4.6;
        c.reviews = 312;
        c.description = "Soothing gel in every leaf".to_string();

        vec![a, b, c]
    }

    #[test]
    fn default_sort_is_popularity() {
        let products = sample();
        let result = query(&products, &FilterCriteria::default(), SortKey::default());
        assert_eq!(ids(&result), ["c", "a", "b"]);
    }

    #[test]
    fn every_sort_key_orders_as_documented() {
        let products = sample();
        let all = FilterCriteria::match_all();

        assert_eq!(ids(&query(&products, &all, SortKey::PriceAsc)), ["c", "a", "b"]);
        assert_eq!(ids(&query(&products, &all, SortKey::PriceDesc)), ["b", "a", "c"]);
        assert_eq!(ids(&query(&products, &all, SortKey::Name)), ["c", "b", "a"]);
        // b and c tie on rating and keep input order.
        assert_eq!(ids(&query(&products, &all, SortKey::Rating)), ["a", "b", "c"]);
    }

    #[test]
    fn name_sort_ignores_accents_and_case() {
        let products = vec![
            product("b", "Eb", 1000),
            product("a", "\u{c9}a", 1000),
            product("d", "echeveria", 1000),
            product("c", "\u{c9}cheveria", 1000),
        ];
        let sorted = query(&products, &FilterCriteria::match_all(), SortKey::Name);
        // "Éa" < "Eb" < "Écheveria" / "echeveria"; equal keys fall back to raw text.
        assert_eq!(ids(&sorted), ["a", "b", "d", "c"]);
    }

    #[test]
    fn constraints_are_anded() {
        let products = sample();

        let easy = FilterCriteria::default().with_care_level(Some(CareLevel::Easy));
        assert_eq!(ids(&query(&products, &easy, SortKey::PriceAsc)), ["c", "a"]);

        let easy_bright = easy.clone().with_light_needs(Some(LightNeeds::High));
        assert_eq!(ids(&query(&products, &easy_bright, SortKey::PriceAsc)), ["c"]);

        let none = easy_bright.with_category(Some(Category::Hanging));
        assert!(query(&products, &none, SortKey::PriceAsc).is_empty());
    }

    #[test]
    fn search_is_case_insensitive_over_name_description_category() {
        let products = sample();
        let by_name = FilterCriteria::default().with_search("SNAKE");
        assert_eq!(ids(&query(&products, &by_name, SortKey::Popularity)), ["a"]);

        let by_description = FilterCriteria::default().with_search("gel");
        assert_eq!(ids(&query(&products, &by_description, SortKey::Popularity)), ["c"]);

        let by_category = FilterCriteria::default().with_search("statement");
        assert_eq!(ids(&query(&products, &by_category, SortKey::Popularity)), ["b"]);
    }

    #[test]
    fn price_ceiling_is_inclusive() {
        let products = sample();
        let criteria = FilterCriteria::default().with_max_price(Some(Money::from_cents(3299)));
        assert_eq!(ids(&query(&products, &criteria, SortKey::PriceAsc)), ["c", "a"]);
    }

    #[test]
    fn category_label_sentinel_clears_constraint() {
        let criteria = FilterCriteria::default()
            .with_category_label("Succulents")
            .unwrap();
        assert_eq!(criteria.category, Some(Category::Succulents));

        let cleared = criteria.with_category_label(ALL_PLANTS).unwrap();
        assert_eq!(cleared.category, None);

        assert!(FilterCriteria::default().with_category_label("Cacti").is_err());
    }

    #[test]
    fn active_count_ignores_price() {
        let criteria = FilterCriteria::default()
            .with_max_price(Some(Money::new(20, 0)))
            .with_search("fig")
            .with_light_needs(Some(LightNeeds::Low));
        assert_eq!(criteria.active_count(), 2);
        assert_eq!(FilterCriteria::default().active_count(), 0);
    }

    #[test]
    fn sort_key_params_round_trip_and_fall_back() {
        for key in SortKey::ALL {
            assert_eq!(SortKey::from_param(key.as_param()), *key);
        }
        assert_eq!(SortKey::from_param("newest"), SortKey::Popularity);
    }

    fn arb_products() -> impl Strategy<Value = Vec<Product>> {
        prop::collection::vec((1u64..20_000, 0u32..500, 0u8..=50, 0usize..7), 0..30).prop_map(
            |specs| {
                specs
                    .into_iter()
                    .enumerate()
                    .map(|(i, (price, reviews, rating, cat))| {
                        let mut p = product(&i.to_string(), &format!("Plant {i}"), price);
                        p.reviews = reviews;
                        p.rating = f32::from(rating) / 10.0;
                        p.category = Category::ALL[cat];
                        p
                    })
                    .collect()
            },
        )
    }

    proptest! {
        /// Property: price-descending is the reverse of price-ascending.
        #[test]
        fn price_sorts_are_reverses(products in arb_products(), ceiling in 1u64..20_000) {
            let criteria = FilterCriteria::match_all().with_max_price(Some(Money::from_cents(ceiling)));
            let asc: Vec<Money> = query(&products, &criteria, SortKey::PriceAsc).iter().map(|p| p.price).collect();
            let mut desc: Vec<Money> = query(&products, &criteria, SortKey::PriceDesc).iter().map(|p| p.price).collect();
            desc.reverse();
            prop_assert_eq!(asc, desc);
        }

        /// Property: with no constraints every product comes back exactly once.
        #[test]
        fn unconstrained_query_returns_everything(products in arb_products(), key in 0usize..5) {
            let result = query(&products, &FilterCriteria::match_all(), SortKey::ALL[key]);
            prop_assert_eq!(result.len(), products.len());
            let mut seen = ids(&result);
            seen.sort();
            let mut expected: Vec<String> = products.iter().map(|p| p.id.to_string()).collect();
            expected.sort();
            prop_assert_eq!(seen, expected);
        }

        /// Property: identical inputs give identical output.
        #[test]
        fn query_is_deterministic(products in arb_products(), key in 0usize..5) {
            let criteria = FilterCriteria::default();
            let first = ids(&query(&products, &criteria, SortKey::ALL[key]));
            let second = ids(&query(&products, &criteria, SortKey::ALL[key]));
            prop_assert_eq!(first, second);
        }
    }
}
