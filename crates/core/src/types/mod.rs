//! Core types for the digital shop.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod id;
pub mod item;
pub mod price;

pub use cart::{CartCandidate, CartEntry, DEFAULT_ITEM_TYPE};
pub use id::*;
pub use item::{Item, LOW_STOCK_THRESHOLD};
pub use price::{CURRENCY_UNIT, Price, PriceError};
