//! # Validation Module
//!
//! Checks run by the public cart API before an action is dispatched.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cart method                                                            │
//! │       │                                                                 │
//! │       ├── input checks   (id present, price on new items)               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_action ← THIS MODULE                                          │
//! │       │                                                                 │
//! │       ├── id uniqueness  (SET_ITEMS, ADD_ITEM)                          │
//! │       ├── item limit     (LimitSettings::max_unique_items)              │
//! │       └── quantity limit (LimitSettings::max_item_quantity)             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  reduce() ─ only reached when every check passed                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use crate::action::Action;
use crate::config::LimitSettings;
use crate::error::{CartError, CartResult};
use crate::item::CartItem;
use crate::state::CartState;

/// Validates an item id is present. Any non-empty string counts, whitespace
/// included.
pub fn validate_item_id(id: &str) -> CartResult<()> {
    if id.is_empty() {
        return Err(CartError::MissingId);
    }
    Ok(())
}

/// Validates a line quantity against the configured maximum.
pub fn validate_quantity(quantity: i64, limits: &LimitSettings) -> CartResult<()> {
    match limits.max_item_quantity {
        Some(max) if quantity > max => Err(CartError::QuantityTooLarge {
            requested: quantity,
            max,
        }),
        _ => Ok(()),
    }
}

/// Validates the number of distinct lines against the configured maximum.
pub fn validate_cart_size(unique_items: usize, limits: &LimitSettings) -> CartResult<()> {
    match limits.max_unique_items {
        Some(max) if unique_items > max => Err(CartError::CartTooLarge { max }),
        _ => Ok(()),
    }
}

/// Validates an item list has no repeated ids.
pub fn validate_unique_ids(items: &[CartItem]) -> CartResult<()> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        validate_item_id(&item.id)?;
        if !seen.insert(item.id.as_str()) {
            return Err(CartError::DuplicateItem(item.id.clone()));
        }
    }
    Ok(())
}

/// Validates `action` against the current state and limits.
///
/// Passing this check guarantees the reducer's output keeps ids unique and
/// stays within limits.
pub fn validate_action(
    state: &CartState,
    action: &Action,
    limits: &LimitSettings,
) -> CartResult<()> {
    match action {
        Action::SetItems(items) => {
            validate_unique_ids(items)?;
            validate_cart_size(items.len(), limits)?;
            items
                .iter()
                .try_for_each(|item| validate_quantity(item.quantity, limits))
        }
        Action::AddItem(item) => {
            validate_item_id(&item.id)?;
            if state.item(&item.id).is_some() {
                return Err(CartError::DuplicateItem(item.id.clone()));
            }
            validate_cart_size(state.total_unique_items() + 1, limits)?;
            validate_quantity(item.quantity, limits)
        }
        Action::UpdateItem { patch, .. } => match patch.quantity {
            Some(quantity) => validate_quantity(quantity, limits),
            None => Ok(()),
        },
        Action::RemoveItem { .. }
        | Action::EmptyCart
        | Action::ClearCartMeta
        | Action::SetCartMeta(_)
        | Action::UpdateCartMeta(_) => Ok(()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
