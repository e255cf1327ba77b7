//! Core types for Way2Rare.
//!
//! This module provides type-safe wrappers for catalog concepts.

pub mod gallery;
pub mod id;
pub mod price;
pub mod product;

pub use gallery::{GalleryPost, sort_newest_first};
pub use id::*;
pub use price::{Price, PriceError};
pub use product::Product;
