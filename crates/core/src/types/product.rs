//! Catalog product record.

use serde::{Deserialize, Deserializer, Serialize};

use super::{Price, ProductId};

/// A product in the catalog.
///
/// Field names on the wire are camelCase (`isCurrent`). Older seed payloads
/// use `_id`, `current` and a single-string `image`; those spellings are
/// accepted on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(alias = "_id")]
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    /// Ordered image URLs; the first is the primary image.
    #[serde(default, alias = "image", deserialize_with = "one_or_many")]
    pub images: Vec<String>,
    pub category: String,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default, alias = "current")]
    pub is_current: bool,
}

impl Product {
    /// The primary image, if the record has any.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// The image shown beneath the primary one; repeats the primary when the
    /// record has a single image.
    #[must_use]
    pub fn secondary_image(&self) -> Option<&str> {
        self.images
            .get(1)
            .or_else(|| self.images.first())
            .map(String::as_str)
    }
}

/// Accept either a single string or a sequence of strings.
fn one_or_many<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(url) if url.is_empty() => Vec::new(),
        OneOrMany::One(url) => vec![url],
        OneOrMany::Many(urls) => urls.into_iter().filter(|u| !u.is_empty()).collect(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_api_shape() {
        let json = r#"{
            "id": 1,
            "name": "Way2Rare Zip Hoodie",
            "description": "Zip Hoodie with Way2Rare Logo",
            "price": 60,
            "images": ["https://cdn.example/NavyZip.jpeg"],
            "category": "Hoodies",
            "sizes": ["S", "M", "L"],
            "isCurrent": true
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id.as_str(), "1");
        assert_eq!(product.price, Price::from_units(60));
        assert!(product.is_current);
        assert_eq!(product.primary_image(), Some("https://cdn.example/NavyZip.jpeg"));
    }

    #[test]
    fn test_deserialize_seed_shape() {
        let json = r#"{
            "_id": "0002",
            "name": "Way2Rare Summer Tee",
            "price": 25,
            "image": "https://cdn.example/SummerTee.png",
            "category": "T-Shirts",
            "current": false
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id.as_str(), "0002");
        assert_eq!(product.images.len(), 1);
        assert!(product.sizes.is_empty());
        assert!(product.description.is_empty());
    }

    #[test]
    fn test_serialize_camel_case() {
        let product = Product {
            id: ProductId::from(3),
            name: "Pullover".to_string(),
            description: String::new(),
            price: Price::from_units(50),
            images: vec![],
            category: "Hoodies".to_string(),
            sizes: vec![],
            is_current: false,
        };
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["id"], "3");
        assert_eq!(value["isCurrent"], false);
    }

    #[test]
    fn test_secondary_image_falls_back_to_primary() {
        let mut product: Product = serde_json::from_str(
            r#"{"id": 1, "name": "n", "price": 1, "images": ["a"], "category": "c"}"#,
        )
        .unwrap();
        assert_eq!(product.secondary_image(), Some("a"));
        product.images.push("b".to_string());
        assert_eq!(product.secondary_image(), Some("b"));
        product.images.clear();
        assert_eq!(product.secondary_image(), None);
    }
}
