//! Shop REST API client.
//!
//! # Architecture
//!
//! - Plain JSON over HTTP with `reqwest`
//! - Optional bearer token from configuration on every request
//! - The backend owns the server-side cart, purchases and balances; this
//!   client only lists items and submits the local cart at checkout
//!
//! # Endpoints
//!
//! ```text
//! GET  /shop/items          - Browse shop items
//! POST /shop/cart/add       - Add a line to the server-side cart
//! POST /shop/cart/checkout  - Check out the server-side cart
//! ```

pub mod types;

pub use types::CartLineRequest;

use reqwest::Response;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::instrument;
use url::Url;

use digital_shop_core::Item;

use crate::config::ShopApiConfig;
use types::{ErrorBody, ItemsResponse};

/// API paths relative to the configured base URL.
pub mod endpoints {
    pub const ITEMS: &str = "shop/items";
    pub const CART_ADD: &str = "shop/cart/add";
    pub const CART_CHECKOUT: &str = "shop/cart/checkout";
}

/// Errors that can occur when talking to the shop API.
#[derive(Debug, Error)]
pub enum ShopApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error: {status} - {detail}")]
    Api { status: u16, detail: String },

    /// An endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ShopApiError {
    /// The backend's own explanation, when it gave one.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Api { detail, .. } if !detail.is_empty() => Some(detail),
            _ => None,
        }
    }
}

/// Client for the shop REST API.
#[derive(Clone)]
pub struct ShopApiClient {
    client: reqwest::Client,
    base_url: Url,
    token: Option<SecretString>,
}

impl std::fmt::Debug for ShopApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}

impl ShopApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ShopApiConfig) -> Result<Self, ShopApiError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("digital-shop/", env!("CARGO_PKG_VERSION")))
            .build()?;

        // Url::join drops the last path segment unless it ends with '/'.
        let mut base_url = config.base_url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client,
            base_url,
            token: config.token.clone(),
        })
    }

    /// Base URL every endpoint is resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an endpoint path against the base URL.
    ///
    /// # Errors
    ///
    /// Returns error if the path does not form a valid URL.
    pub fn endpoint(&self, path: &str) -> Result<Url, ShopApiError> {
        Ok(self.base_url.join(path)?)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    /// List the items on sale.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be parsed.
    #[instrument(skip(self))]
    pub async fn list_items(&self) -> Result<Vec<Item>, ShopApiError> {
        let url = self.endpoint(endpoints::ITEMS)?;
        let response = self.authorize(self.client.get(url)).send().await?;
        let response = ensure_success(response).await?;
        let body: ItemsResponse = response.json().await?;
        Ok(crate::catalog::ingest(body.into_items()))
    }

    /// Add one line to the server-side cart.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the API rejects the line.
    #[instrument(skip(self), fields(item_id = %line.item_id))]
    pub async fn add_to_cart(&self, line: &CartLineRequest) -> Result<(), ShopApiError> {
        let url = self.endpoint(endpoints::CART_ADD)?;
        let response = self.authorize(self.client.post(url)).json(line).send().await?;
        ensure_success(response).await?;
        Ok(())
    }

    /// Check out the server-side cart.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the API rejects the checkout.
    #[instrument(skip(self))]
    pub async fn confirm_checkout(&self) -> Result<(), ShopApiError> {
        let url = self.endpoint(endpoints::CART_CHECKOUT)?;
        let response = self.authorize(self.client.post(url)).send().await?;
        ensure_success(response).await?;
        Ok(())
    }
}

/// Turn a non-success response into [`ShopApiError::Api`].
async fn ensure_success(response: Response) -> Result<Response, ShopApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::debug!(status = status.as_u16(), body = %body, "Shop API request failed");
    Err(ShopApiError::Api {
        status: status.as_u16(),
        detail: error_detail(&body),
    })
}

/// The `detail` field of an error body, or empty when there is none.
fn error_detail(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: serde_json::Value::String(detail),
        }) => detail,
        Ok(ErrorBody {
            detail: serde_json::Value::Null,
        })
        | Err(_) => String::new(),
        Ok(ErrorBody { detail }) => detail.to_string(),
    }
}
