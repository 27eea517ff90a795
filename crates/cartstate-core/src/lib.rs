//! # cartstate: Cart State Container
//!
//! Holds cart line items, derived totals and metadata. Every change goes
//! through one pure reducer, and observers are told about each committed
//! change.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        cartstate Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Cart (public API)                            │   │
//! │  │   add_item, update_item_quantity, empty_cart, set_metadata ...  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Action                                 │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │   validation ──► reducer ──► CartState (derived totals)         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ CartEvent                              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │   EventBus subscribers  ──►  CartHooks                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`cart`] - The `Cart` API and its builder
//! - [`reducer`] - Pure `(state, action) -> state`
//! - [`state`] - `CartState` and the total calculators
//! - [`action`] - Actions and their JSON envelope
//! - [`item`] - Items, patches, and the `Merge` trait
//! - [`bus`] - Synchronous observer notification
//! - [`hooks`] - Caller callbacks
//! - [`money`] - Integer money amounts
//! - [`config`] - Optional limits
//! - [`validation`] - Checks run before dispatch
//! - [`error`] - Error types
//!
//! ## Example Usage
//!
//! ```rust
//! use cartstate::{Cart, Item, Money};
//!
//! let mut cart = Cart::new();
//! cart.add_item(&Item::new("a").with_price(Money::from_cents(10)), 2)?;
//! cart.add_item(&Item::new("a"), 3)?;
//!
//! assert_eq!(cart.get_item_quantity("a"), 5);
//! assert_eq!(cart.state().cart_total().cents(), 50);
//! # Ok::<(), cartstate::CartError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod action;
pub mod bus;
pub mod cart;
pub mod config;
pub mod error;
pub mod hooks;
pub mod item;
pub mod money;
pub mod reducer;
pub mod state;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use action::{Action, ActionEnvelope, ActionKind};
pub use bus::{CartEvent, EventBus, SubscriptionId, Topic};
pub use cart::{Cart, CartBuilder};
pub use config::{CartConfig, LimitSettings};
pub use error::{CartError, CartResult};
pub use hooks::CartHooks;
pub use item::{CartItem, Item, ItemPatch, Merge, Metadata};
pub use money::Money;
pub use reducer::{reduce, reduce_envelope};
pub use state::{generate_cart_state, CartState, CartTotals};
