//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type for front ends driving the shop.
//! Front ends call [`AppError::report`] before showing the error so
//! infrastructure failures land in Sentry.

use thiserror::Error;

use crate::cart::StorageError;
use crate::catalog::CatalogError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::shop::ShopApiError;

/// Application-level error type for the shop.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Cart storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Catalog could not be loaded.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Shop API operation failed.
    #[error("Shop API error: {0}")]
    ShopApi(#[from] ShopApiError),

    /// Checkout was aborted.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Item or cart entry not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input from the user.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Whether this error points at broken infrastructure rather than user
    /// input.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        match self {
            Self::Checkout(err) => !matches!(err, CheckoutError::EmptyCart),
            Self::Storage(_) | Self::Catalog(_) | Self::ShopApi(_) => true,
            Self::Config(_) | Self::NotFound(_) | Self::BadRequest(_) => false,
        }
    }

    /// Capture internal errors to Sentry and log them.
    pub fn report(&self) {
        if self.is_internal() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Command error"
            );
        } else {
            tracing::warn!(error = %self, "Command rejected");
        }
    }

    /// Message to show the shopper.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Checkout(err) => err.user_message(),
            Self::ShopApi(err) => err
                .detail()
                .map_or_else(|| "External service error".to_string(), str::to_string),
            Self::Storage(_) => "Could not access the saved cart".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of cart and
/// catalog actions leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added item", Some(&[("item_id", "item_1")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
