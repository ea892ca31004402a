//! Cart commands.
//!
//! The cart lives in `SHOP_DATA_DIR/cart-storage.json` and survives between
//! invocations.
//!
//! # Usage
//!
//! ```bash
//! shop-cli cart add item_1
//! shop-cli cart set item_1 3
//! shop-cli cart show
//! shop-cli cart checkout
//! ```

use digital_shop_core::Item;
use digital_shop_storefront::cart::{CartStorage, CartStore, JsonFileStorage};
use digital_shop_storefront::checkout::checkout_cart;
use digital_shop_storefront::config::ShopConfig;
use digital_shop_storefront::error::{AppError, Result, add_breadcrumb};
use digital_shop_storefront::shop::ShopApiClient;

use super::catalog::require_item;

/// Open the persisted cart under the configured data directory.
pub fn open_store(config: &ShopConfig) -> CartStore<JsonFileStorage> {
    CartStore::load(JsonFileStorage::new(&config.data_dir))
}

/// Print every line and the totals.
#[allow(clippy::print_stdout)]
pub fn show<S: CartStorage>(store: &CartStore<S>) {
    if store.state().is_empty() {
        println!("Your cart is empty");
        return;
    }

    for entry in store.state().entries() {
        println!(
            "{:<12} {:<32} {:>4} x {:>12} = {}",
            entry.item_id,
            entry.name,
            entry.quantity,
            entry.price,
            entry.line_total()
        );
    }
    println!("Items: {}", store.total_items());
    println!("Total: {}", store.total_price());
}

/// Add one unit of `item_id` from the catalog.
///
/// # Errors
///
/// Returns `NotFound` for unknown items and `BadRequest` for items that
/// cannot be bought.
#[allow(clippy::print_stdout)]
pub fn add<S: CartStorage>(store: &mut CartStore<S>, items: &[Item], item_id: &str) -> Result<()> {
    let item = require_item(items, item_id)?;
    if !item.is_available {
        return Err(AppError::BadRequest(format!("{} is out of stock", item.name)));
    }

    let again = store.state().contains(item_id);
    store.add_item(item.to_cart_candidate());
    add_breadcrumb("cart", "Added item", Some(&[("item_id", item_id)]));

    let quantity = store.state().get(item_id).map_or(0, |entry| entry.quantity);
    if again {
        println!("Added another {} (now {quantity})", item.name);
    } else {
        println!("Added {} to cart", item.name);
    }
    Ok(())
}

/// Remove `item_id` from the cart.
///
/// # Errors
///
/// Returns `NotFound` if the item is not in the cart.
#[allow(clippy::print_stdout)]
pub fn remove<S: CartStorage>(store: &mut CartStore<S>, item_id: &str) -> Result<()> {
    if !store.remove_item(item_id) {
        return Err(not_in_cart(item_id));
    }
    add_breadcrumb("cart", "Removed item", Some(&[("item_id", item_id)]));
    println!("Removed {item_id}");
    Ok(())
}

/// Set the quantity of `item_id`; zero removes it.
///
/// # Errors
///
/// Returns `NotFound` if the item is not in the cart.
#[allow(clippy::print_stdout)]
pub fn set_quantity<S: CartStorage>(
    store: &mut CartStore<S>,
    item_id: &str,
    quantity: u32,
) -> Result<()> {
    if !store.update_quantity(item_id, quantity) {
        return Err(not_in_cart(item_id));
    }
    if quantity == 0 {
        println!("Removed {item_id}");
    } else {
        println!("{item_id} quantity set to {quantity}");
    }
    Ok(())
}

/// Empty the cart.
#[allow(clippy::print_stdout)]
pub fn clear<S: CartStorage>(store: &mut CartStore<S>) {
    store.clear_cart();
    add_breadcrumb("cart", "Cleared cart", None);
    println!("Cart cleared");
}

/// Submit the cart to the shop API and clear it on success.
///
/// # Errors
///
/// Returns the checkout failure; the cart is left untouched.
#[allow(clippy::print_stdout)]
pub async fn checkout<S: CartStorage>(store: &mut CartStore<S>, config: &ShopConfig) -> Result<()> {
    let client = ShopApiClient::new(&config.api)?;
    add_breadcrumb("checkout", "Checkout started", None);

    let receipt = checkout_cart(store, &client).await?;
    println!(
        "Checked out {} items ({} lines) for {}",
        receipt.total_items, receipt.lines, receipt.total_price
    );
    Ok(())
}

fn not_in_cart(item_id: &str) -> AppError {
    AppError::NotFound(format!("{item_id} is not in the cart"))
}
