//! Digital Shop Storefront library.
//!
//! The client-side core of the shop: the persisted cart, the catalog
//! view-model and the checkout hand-off to the shop API. Front ends (the
//! `shop-cli` binary, tests) own a [`cart::CartStore`] and feed catalog items
//! through the pure functions in [`catalog`].
//!
//! # Modules
//!
//! - [`cart`] - cart state, persistence backends and the store wrapper
//! - [`catalog`] - filtering, sorting, comparison and related items
//! - [`checkout`] - sequential submission of the cart to the API
//! - [`shop`] - HTTP client for the shop REST API
//! - [`config`] - environment-driven configuration
//! - [`error`] - unified error type with Sentry reporting

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod shop;
