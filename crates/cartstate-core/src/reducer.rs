//! # Reducer
//!
//! `reduce(state, action) -> state`. Pure and deterministic: the input state
//! is never modified, and replaying the same actions always yields the same
//! state.
//!
//! ## Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SET_ITEMS        items = payload                       ─┐              │
//! │  ADD_ITEM         items = items ++ [payload]             │ recompute    │
//! │  UPDATE_ITEM      items[id] = items[id] ⊕ patch          │ derived      │
//! │  REMOVE_ITEM      items = items \ [id]                  ─┘ fields       │
//! │                                                                         │
//! │  EMPTY_CART       state = initial (metadata cleared too)                │
//! │                                                                         │
//! │  CLEAR_CART_META  metadata = {}                         ─┐ items and    │
//! │  SET_CART_META    metadata = payload                     │ totals       │
//! │  UPDATE_CART_META metadata = metadata ⊕ payload         ─┘ untouched    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The reducer does not enforce id uniqueness; `Cart::dispatch` validates
//! actions before they get here.

use tracing::trace;

use crate::action::{Action, ActionEnvelope};
use crate::error::CartResult;
use crate::item::{CartItem, Merge};
use crate::state::{generate_cart_state, CartState};

/// Applies `action` to `state`, returning the next state.
pub fn reduce(state: &CartState, action: Action) -> CartState {
    trace!(action = %action.kind(), "Reducing cart action");

    match action {
        Action::SetItems(items) => generate_cart_state(&items, state.metadata().clone()),

        Action::AddItem(item) => {
            let mut items = state.items().to_vec();
            items.push(item);
            generate_cart_state(&items, state.metadata().clone())
        }

        Action::UpdateItem { id, patch } => {
            let items: Vec<CartItem> = state
                .items()
                .iter()
                .map(|item| {
                    if item.id == id {
                        item.merge(&patch)
                    } else {
                        item.clone()
                    }
                })
                .collect();
            generate_cart_state(&items, state.metadata().clone())
        }

        Action::RemoveItem { id } => {
            let items: Vec<CartItem> = state
                .items()
                .iter()
                .filter(|item| item.id != id)
                .cloned()
                .collect();
            generate_cart_state(&items, state.metadata().clone())
        }

        Action::EmptyCart => CartState::initial(),

        Action::ClearCartMeta => state.with_metadata(Default::default()),

        Action::SetCartMeta(metadata) => state.with_metadata(metadata),

        Action::UpdateCartMeta(patch) => state.with_metadata(state.metadata().merge(&patch)),
    }
}

/// Decodes `envelope` and applies it.
///
/// ## Errors
/// - `UnsupportedAction` for an unknown `type`
/// - `InvalidAction` when required fields are missing or malformed
///
/// On error no state is produced, so the caller's state stays as it was.
pub fn reduce_envelope(state: &CartState, envelope: ActionEnvelope) -> CartResult<CartState> {
    let action = Action::try_from(envelope)?;
    Ok(reduce(state, action))
}

// =============================================================================
// Unit Tests
// =============================================================================
