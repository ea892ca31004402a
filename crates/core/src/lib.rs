//! Digital Shop Core - Shared types library.
//!
//! This crate provides common types used across all digital shop components:
//! - `storefront` - Cart store, catalog view-model and checkout orchestration
//! - `cli` - Terminal front end for browsing, the cart and checkout
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for item ids and prices, plus the item and
//!   cart entry records shared by the catalog and the cart

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
