//! # Cart Demo
//!
//! Walks a cart through a short shopping session and logs every committed
//! action.
//!
//! ## Usage
//! ```bash
//! cargo run -p cartstate-core --bin cart-demo
//!
//! # With limits from a config file
//! cargo run -p cartstate-core --bin cart-demo -- ./cart.toml
//!
//! # Show reducer transitions
//! RUST_LOG=cartstate=trace cargo run -p cartstate-core --bin cart-demo
//! ```

use std::env;
use std::path::PathBuf;

use cartstate::{Cart, CartConfig, CartResult, Item, ItemPatch, Money};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("cart-demo failed: {}", e);
        std::process::exit(1);
    }
}

fn run() -> CartResult<()> {
    let config_path = env::args().nth(1).map(PathBuf::from);
    let config = CartConfig::load(config_path.as_deref())?;

    let mut cart = Cart::builder()
        .config(config)
        .on_item_add(|item| info!(id = %item.id, quantity = item.quantity, "Item added"))
        .on_item_update(|id, patch| info!(id = %id, quantity = ?patch.quantity, "Item updated"))
        .on_item_remove(|id| info!(id = %id, "Item removed"))
        .on_empty_cart(|| info!("Cart emptied"))
        .build();

    cart.subscribe_all(|kind, event| {
        info!(
            action = %kind,
            total_items = event.state.total_items(),
            cart_total = event.state.cart_total().cents(),
            "Cart changed"
        );
    });

    let cola = Item::new("cola-330")
        .with_price(Money::from_cents(299))
        .with_field("name", json!("Cola 330ml"))
        .with_field("specs", json!(["cold", "can"]));
    let chips = Item::new("chips-salted")
        .with_price(Money::from_cents(149))
        .with_field("specs", json!(["snack"]));

    cart.add_item(&cola, 2)?;
    cart.add_item(&cola, 1)?;
    cart.add_item(&chips, 4)?;
    cart.update_item("chips-salted", ItemPatch::new().field("note", json!("family size")))?;
    cart.update_item_quantity("chips-salted", 2)?;

    let mut coupon = serde_json::Map::new();
    coupon.insert("coupon".to_string(), json!("WELCOME10"));
    cart.set_cart_metadata(coupon);

    info!(cold = cart.get_spec_quantity(&json!("cold")), "Cold items");
    info!(
        state = %serde_json::to_string(cart.state()).unwrap_or_default(),
        "Final cart"
    );

    cart.empty_cart();
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=cartstate=trace` - Show reducer transitions
/// - Default: INFO, DEBUG for cartstate
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,cartstate=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
