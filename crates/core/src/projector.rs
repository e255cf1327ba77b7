//! Filter/sort projection of the catalog for display.
//!
//! Everything here is pure: the input slice is never mutated and each call
//! returns a fresh `Vec`. Applying the same query to the same products always
//! yields the same output.
//!
//! ```
//! use way2rare_core::{CategoryFilter, SortMode, project};
//! # use way2rare_core::{Price, Product, ProductId};
//! # let product = |id: i32, price: u32, category: &str| Product {
//! #     id: ProductId::from(id),
//! #     name: format!("p{id}"),
//! #     description: String::new(),
//! #     price: Price::from_units(price),
//! #     images: vec![],
//! #     category: category.to_string(),
//! #     sizes: vec![],
//! #     is_current: false,
//! # };
//! let products = vec![product(1, 60, "Hoodies"), product(2, 25, "T-Shirts")];
//!
//! let cheapest_first = project(&products, &CategoryFilter::default(), SortMode::LowHigh);
//! assert_eq!(cheapest_first[0].price, Price::from_units(25));
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::Product;

/// How to order the projected products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Keep store/seed order.
    #[default]
    Relevant,
    /// Ascending by price.
    LowHigh,
    /// Descending by price.
    HighLow,
}

impl SortMode {
    /// The wire name (`relevant`, `low-high`, `high-low`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Relevant => "relevant",
            Self::LowHigh => "low-high",
            Self::HighLow => "high-low",
        }
    }

    /// Order `products` in place. Uses a stable sort, so equal prices keep
    /// their relative order in both directions.
    fn apply(self, products: &mut [Product]) {
        match self {
            Self::Relevant => {}
            Self::LowHigh => products.sort_by(|a, b| a.price.cmp(&b.price)),
            Self::HighLow => products.sort_by(|a, b| b.price.cmp(&a.price)),
        }
    }
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a [`SortMode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid sort mode: {0}")]
pub struct SortModeError(String);

impl std::str::FromStr for SortMode {
    type Err = SortModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "relevant" => Ok(Self::Relevant),
            "low-high" => Ok(Self::LowHigh),
            "high-low" => Ok(Self::HighLow),
            _ => Err(SortModeError(s.to_string())),
        }
    }
}

/// The set of categories selected in the filter panel.
///
/// An empty set means "no filter". Matching is exact set membership on
/// [`Product::category`], never substring.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryFilter(BTreeSet<String>);

impl CategoryFilter {
    /// Build a filter from the given category names.
    pub fn new<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(categories.into_iter().map(Into::into).collect())
    }

    /// Flip a category on or off, as a checkbox does. Returns whether the
    /// category is selected afterwards.
    pub fn toggle(&mut self, category: &str) -> bool {
        if self.0.remove(category) {
            false
        } else {
            self.0.insert(category.to_string());
            true
        }
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `category` is selected.
    #[must_use]
    pub fn contains(&self, category: &str) -> bool {
        self.0.contains(category)
    }

    /// Whether a product passes this filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.is_empty() || self.contains(&product.category)
    }

    /// Iterate over the selected categories in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Filter by category and sort by `sort`.
///
/// With an empty `categories` set every product passes.
#[must_use]
pub fn project(products: &[Product], categories: &CategoryFilter, sort: SortMode) -> Vec<Product> {
    let mut out: Vec<Product> = products
        .iter()
        .filter(|p| categories.matches(p))
        .cloned()
        .collect();
    sort.apply(&mut out);
    out
}

/// Everything the collection page can narrow the catalog by.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub categories: CategoryFilter,
    #[serde(default)]
    pub sort: SortMode,
    /// Case-insensitive name search. Ignored when blank.
    #[serde(default)]
    pub search: String,
}

impl CatalogQuery {
    /// Apply search, category filter and sort, in that order.
    #[must_use]
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return project(products, &self.categories, self.sort);
        }

        let matching: Vec<Product> = products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        project(&matching, &self.categories, self.sort)
    }
}

/// Distinct categories in first-seen order, for building the filter panel.
#[must_use]
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for product in products {
        if seen.insert(product.category.as_str()) {
            out.push(product.category.clone());
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::{Price, ProductId};

    fn product(id: i32, price: u32, category: &str) -> Product {
        Product {
            id: ProductId::from(id),
            name: format!("Way2Rare Item {id}"),
            description: String::new(),
            price: Price::from_units(price),
            images: vec![format!("https://cdn.example/{id}.jpeg")],
            category: category.to_string(),
            sizes: vec!["M".to_string()],
            is_current: false,
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, 60, "Hoodies"),
            product(2, 25, "T-Shirts"),
            product(3, 50, "Hoodies"),
            product(4, 65, "Hoodies"),
            product(5, 40, "Bottoms"),
        ]
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_empty_filter_passes_everything_in_order() {
        let products = catalog();
        let out = project(&products, &CategoryFilter::default(), SortMode::Relevant);
        assert_eq!(out, products);
    }

    #[test]
    fn test_category_filter_is_set_membership() {
        let products = catalog();
        let filter = CategoryFilter::new(["Hoodies", "Bottoms"]);
        let out = project(&products, &filter, SortMode::Relevant);
        assert_eq!(ids(&out), vec!["1", "3", "4", "5"]);
        assert!(out.iter().all(|p| filter.contains(&p.category)));
    }

    #[test]
    fn test_category_filter_does_not_substring_match() {
        let products = catalog();
        let filter = CategoryFilter::new(["Hood"]);
        assert!(project(&products, &filter, SortMode::Relevant).is_empty());
    }

    #[test]
    fn test_sort_low_high_and_high_low() {
        let products = catalog();
        let filter = CategoryFilter::default();
        assert_eq!(
            ids(&project(&products, &filter, SortMode::LowHigh)),
            vec!["2", "5", "3", "1", "4"]
        );
        assert_eq!(
            ids(&project(&products, &filter, SortMode::HighLow)),
            vec!["4", "1", "3", "5", "2"]
        );
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let products = vec![
            product(1, 30, "A"),
            product(2, 10, "A"),
            product(3, 30, "A"),
            product(4, 10, "A"),
        ];
        let filter = CategoryFilter::default();
        assert_eq!(
            ids(&project(&products, &filter, SortMode::LowHigh)),
            vec!["2", "4", "1", "3"]
        );
        assert_eq!(
            ids(&project(&products, &filter, SortMode::HighLow)),
            vec!["1", "3", "2", "4"]
        );
    }

    #[test]
    fn test_projection_is_idempotent_and_pure() {
        let products = catalog();
        let before = products.clone();
        let filter = CategoryFilter::new(["Hoodies"]);
        let first = project(&products, &filter, SortMode::HighLow);
        let second = project(&products, &filter, SortMode::HighLow);
        assert_eq!(first, second);
        assert_eq!(products, before);
    }

    #[test]
    fn test_toggle() {
        let mut filter = CategoryFilter::default();
        assert!(filter.toggle("Hoodies"));
        assert!(filter.contains("Hoodies"));
        assert!(!filter.toggle("Hoodies"));
        assert!(filter.is_empty());
    }

    #[test]
    fn test_sort_mode_parse() {
        assert_eq!("low-high".parse::<SortMode>().unwrap(), SortMode::LowHigh);
        assert_eq!(SortMode::HighLow.to_string(), "high-low");
        assert!("cheapest".parse::<SortMode>().is_err());
        let json = serde_json::to_string(&SortMode::Relevant).unwrap();
        assert_eq!(json, "\"relevant\"");
    }

    #[test]
    fn test_query_search_is_case_insensitive() {
        let mut products = catalog();
        products[1].name = "Way2Rare Summer Tee".to_string();
        let query = CatalogQuery {
            search: "  summer ".to_string(),
            ..CatalogQuery::default()
        };
        assert_eq!(ids(&query.apply(&products)), vec!["2"]);
    }

    #[test]
    fn test_query_combines_filters() {
        let products = catalog();
        let query = CatalogQuery {
            categories: CategoryFilter::new(["Hoodies"]),
            sort: SortMode::LowHigh,
            search: "item".to_string(),
        };
        assert_eq!(ids(&query.apply(&products)), vec!["3", "1", "4"]);
    }

    #[test]
    fn test_categories_first_seen_order() {
        assert_eq!(
            categories(&catalog()),
            vec!["Hoodies", "T-Shirts", "Bottoms"]
        );
    }
}
