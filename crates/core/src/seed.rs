//! The bundled launch catalog.
//!
//! Used two ways: the storefront falls back to [`products`] whenever the API
//! is unreachable or returns nothing, and the CLI seed step writes the same
//! records into an empty store.

use crate::{Price, Product, ProductId};

/// Public bucket holding product and model photography.
pub const IMAGE_BASE_URL: &str =
    "https://rwccduyhfvbsvogsheth.supabase.co/storage/v1/object/public/product%20images";

/// A gallery post before the store assigns its id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GallerySeed {
    pub image: String,
    pub handle: String,
}

const STANDARD_SIZES: [&str; 5] = ["S", "M", "L", "XL", "XXL"];

fn product_image(file: &str) -> String {
    format!("{IMAGE_BASE_URL}/product_pics/{file}")
}

fn model_image(file: &str) -> String {
    format!("{IMAGE_BASE_URL}/model_pics/{file}")
}

fn product(
    id: &str,
    name: &str,
    description: &str,
    price: u32,
    image: &str,
    category: &str,
    is_current: bool,
) -> Product {
    Product {
        id: ProductId::new_unchecked(id),
        name: name.to_string(),
        description: description.to_string(),
        price: Price::from_units(price),
        images: vec![product_image(image)],
        category: category.to_string(),
        sizes: STANDARD_SIZES.iter().map(|s| (*s).to_string()).collect(),
        is_current,
    }
}

/// The seed product list, in display order.
#[must_use]
pub fn products() -> Vec<Product> {
    vec![
        product(
            "0001",
            "Way2Rare Zip Hoodie",
            "Zip Hoodie with Way2Rare Logo",
            60,
            "NavyZip.jpeg",
            "Hoodies",
            true,
        ),
        product(
            "0002",
            "Way2Rare Summer Tee",
            "Lightweight summer t-shirt with Way2Rare Logo",
            25,
            "SummerTee.png",
            "T-Shirts",
            false,
        ),
        product(
            "0003",
            "Way2Rare Pullover Hoodie",
            "Pullover Hoodie with Bubble Way2Rare Logo",
            50,
            "Pullover.jpeg",
            "Hoodies",
            false,
        ),
        product(
            "0004",
            "Way2Rare Retro Zip Hoodie",
            "Retro Style Zip Hoodie with Way2Rare Logo",
            65,
            "NavyZip.jpeg",
            "Hoodies",
            false,
        ),
        product(
            "0005",
            "Way2Rare Logo Sweatpants",
            "Comfortable Sweatpants with Way2Rare Logo",
            40,
            "NavyZip.jpeg",
            "Bottoms",
            false,
        ),
    ]
}

/// The seed gallery, oldest first (insertion order).
#[must_use]
pub fn gallery() -> Vec<GallerySeed> {
    [
        ("IMG_1816.JPG", "@slattinson"),
        ("IMG_2078.JPG", "@mrrvin.whispr"),
        ("IMG_2298.JPG", "@phucbui0"),
        ("IMG_2353.JPG", "@louis.jndr"),
        ("IMG_2393.JPG", "@way2rare"),
        ("IMG_3137.jpeg", "@rare.collective"),
        ("IMG_3334.jpeg", "@urban.archive"),
        ("IMG_3458.jpeg", "@latecheckout"),
    ]
    .into_iter()
    .map(|(file, handle)| GallerySeed {
        image: model_image(file),
        handle: handle.to_string(),
    })
    .collect()
}
