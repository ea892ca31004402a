//! Checkout: hand the local cart to the shop API.
//!
//! Lines are submitted one at a time in cart order, each awaited before the
//! next, followed by a single confirmation call. The local cart is cleared
//! only after every call succeeded; any failure stops the sequence and leaves
//! the cart as it was. Dropping the returned future cancels the request in
//! flight with the same guarantee.

use std::future::Future;

use thiserror::Error;
use tracing::instrument;

use digital_shop_core::{ItemId, Price};

use crate::cart::{CartStorage, CartStore};
use crate::shop::{CartLineRequest, ShopApiClient, ShopApiError};

/// Fallback message shown when the backend gave no detail.
pub const CHECKOUT_FAILED: &str = "Checkout failed";

/// The submission side of the shop API.
pub trait CheckoutApi {
    /// Submit one cart line.
    fn add_line(
        &self,
        line: &CartLineRequest,
    ) -> impl Future<Output = Result<(), ShopApiError>> + Send;

    /// Confirm the checkout of everything submitted so far.
    fn checkout(&self) -> impl Future<Output = Result<(), ShopApiError>> + Send;
}

impl CheckoutApi for ShopApiClient {
    fn add_line(
        &self,
        line: &CartLineRequest,
    ) -> impl Future<Output = Result<(), ShopApiError>> + Send {
        self.add_to_cart(line)
    }

    fn checkout(&self) -> impl Future<Output = Result<(), ShopApiError>> + Send {
        self.confirm_checkout()
    }
}

/// Errors that abort a checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nothing to check out.
    #[error("Cart is empty")]
    EmptyCart,

    /// Submitting a cart line failed.
    #[error("Failed to submit {item_id}: {source}")]
    Line {
        item_id: ItemId,
        #[source]
        source: ShopApiError,
    },

    /// The confirmation call failed.
    #[error("Checkout confirmation failed: {0}")]
    Confirm(#[source] ShopApiError),
}

impl CheckoutError {
    /// Message suitable for showing to the shopper.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyCart => "Your cart is empty".to_string(),
            Self::Line { source, .. } | Self::Confirm(source) => source
                .detail()
                .map_or_else(|| CHECKOUT_FAILED.to_string(), str::to_string),
        }
    }
}

/// What was checked out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutReceipt {
    pub lines: usize,
    pub total_items: u64,
    pub total_price: Price,
}

/// Submit every cart line, confirm, then clear the cart.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] without calling the API when the cart
/// is empty, or the first API failure. The cart is untouched on error.
#[instrument(skip_all, fields(lines = store.state().len()))]
pub async fn checkout_cart<S, A>(
    store: &mut CartStore<S>,
    api: &A,
) -> Result<CheckoutReceipt, CheckoutError>
where
    S: CartStorage,
    A: CheckoutApi,
{
    if store.state().is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let receipt = CheckoutReceipt {
        lines: store.state().len(),
        total_items: store.total_items(),
        total_price: store.total_price(),
    };
    let lines: Vec<CartLineRequest> = store
        .state()
        .entries()
        .iter()
        .map(CartLineRequest::from)
        .collect();

    for line in &lines {
        api.add_line(line).await.map_err(|source| {
            tracing::error!(item_id = %line.item_id, error = %source, "Cart line submission failed");
            CheckoutError::Line {
                item_id: line.item_id.clone(),
                source,
            }
        })?;
    }

    api.checkout().await.map_err(|source| {
        tracing::error!(error = %source, "Checkout confirmation failed");
        CheckoutError::Confirm(source)
    })?;

    store.clear_cart();
    tracing::info!(
        lines = receipt.lines,
        total_items = receipt.total_items,
        total_price = %receipt.total_price,
        "Checkout completed"
    );
    Ok(receipt)
}
