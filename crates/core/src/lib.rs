//! Way2Rare Core - Shared catalog types.
//!
//! This crate provides the types shared by every Way2Rare component:
//! - `api` - Read-only catalog HTTP API backed by `PostgreSQL`
//! - `storefront` - Catalog client with seed-data fallback
//! - `cli` - Migrations and the seed step
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP clients. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, prices, products and gallery posts
//! - [`projector`] - Category filtering, search and price sorting
//! - [`seed`] - The bundled launch catalog

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod projector;
pub mod seed;
pub mod types;

pub use projector::{CatalogQuery, CategoryFilter, SortMode, SortModeError, categories, project};
pub use types::*;
