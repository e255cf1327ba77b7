//! Display model for product cards and detail pages.

use serde::Serialize;

use way2rare_core::{Product, ProductId};

use crate::config::StorefrontConfig;

/// Product display data.
///
/// Prices carry the configured currency prefix and both image slots are
/// always filled, falling back to the placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: String,
    pub primary_image: String,
    pub secondary_image: String,
    pub category: String,
    pub sizes: Vec<String>,
    pub is_current: bool,
}

impl ProductView {
    #[must_use]
    pub fn new(product: &Product, config: &StorefrontConfig) -> Self {
        let placeholder = config.placeholder_image.as_str();

        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.display(&config.currency),
            primary_image: product.primary_image().unwrap_or(placeholder).to_string(),
            secondary_image: product.secondary_image().unwrap_or(placeholder).to_string(),
            category: product.category.clone(),
            sizes: product.sizes.clone(),
            is_current: product.is_current,
        }
    }
}
