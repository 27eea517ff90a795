//! # Cart State
//!
//! The immutable snapshot held by a `Cart`, and the calculators that derive
//! its totals.
//!
//! ## Derived Fields
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  items ──┬──► totalUniqueItems = items.len()                            │
//! │          │          └──► isEmpty = totalUniqueItems == 0                │
//! │          ├──► items[i].itemTotal = price × quantity                     │
//! │          ├──► totalItems = Σ quantity                                   │
//! │          └──► cartTotal  = Σ price × quantity                           │
//! │                                                                         │
//! │  metadata ──► (independent, never derived)                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Fields are private. The only way to build a `CartState` with items is
//! [`generate_cart_state`], so the derived fields cannot go stale.

use serde::Serialize;

use crate::item::{CartItem, Metadata};
use crate::money::Money;

// =============================================================================
// Calculators
// =============================================================================

/// Number of distinct lines.
pub fn calculate_unique_items(items: &[CartItem]) -> usize {
    items.len()
}

/// Copies of `items` with `itemTotal` set on each.
pub fn calculate_item_totals(items: &[CartItem]) -> Vec<CartItem> {
    items.iter().map(CartItem::with_item_total).collect()
}

/// Sum of `price × quantity` over all lines.
pub fn calculate_total(items: &[CartItem]) -> Money {
    items.iter().map(CartItem::line_total).sum()
}

/// Sum of quantities over all lines.
pub fn calculate_total_items(items: &[CartItem]) -> i64 {
    items.iter().map(|item| item.quantity).sum()
}

/// Builds a consistent state from `items` and `metadata`.
pub fn generate_cart_state(items: &[CartItem], metadata: Metadata) -> CartState {
    let total_unique_items = calculate_unique_items(items);

    CartState {
        items: calculate_item_totals(items),
        is_empty: total_unique_items == 0,
        total_items: calculate_total_items(items),
        total_unique_items,
        cart_total: calculate_total(items),
        metadata,
    }
}

// =============================================================================
// Cart State
// =============================================================================

/// A snapshot of the cart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    items: Vec<CartItem>,
    is_empty: bool,
    total_items: i64,
    total_unique_items: usize,
    cart_total: Money,
    metadata: Metadata,
}

impl CartState {
    /// The empty cart: no items, zero totals, empty metadata.
    pub fn initial() -> Self {
        CartState {
            items: Vec::new(),
            is_empty: true,
            total_items: 0,
            total_unique_items: 0,
            cart_total: Money::zero(),
            metadata: Metadata::new(),
        }
    }

    /// Same items and totals, different metadata.
    pub(crate) fn with_metadata(&self, metadata: Metadata) -> Self {
        CartState {
            metadata,
            ..self.clone()
        }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.is_empty
    }

    /// Sum of all quantities.
    pub fn total_items(&self) -> i64 {
        self.total_items
    }

    /// Number of distinct lines.
    pub fn total_unique_items(&self) -> usize {
        self.total_unique_items
    }

    pub fn cart_total(&self) -> Money {
        self.cart_total
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Finds a line by id.
    pub fn item(&self, id: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Summary of the derived fields.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self)
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::initial()
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Cart totals summary, without the item list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub is_empty: bool,
    pub total_items: i64,
    pub total_unique_items: usize,
    pub cart_total: Money,
}

impl From<&CartState> for CartTotals {
    fn from(state: &CartState) -> Self {
        CartTotals {
            is_empty: state.is_empty,
            total_items: state.total_items,
            total_unique_items: state.total_unique_items,
            cart_total: state.cart_total,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_items() -> Vec<CartItem> {
        vec![
            CartItem::new("a", Money::from_cents(10), 2),
            CartItem::new("b", Money::from_cents(250), 3),
        ]
    }

    #[test]
    fn test_calculators() {
        let items = sample_items();
        assert_eq!(calculate_unique_items(&items), 2);
        assert_eq!(calculate_total_items(&items), 5);
        assert_eq!(calculate_total(&items), Money::from_cents(770));
    }

    #[test]
    fn test_generate_recomputes_stale_item_totals() {
        let mut items = sample_items();
        items[0].item_total = Money::from_cents(999_999);

        let state = generate_cart_state(&items, Metadata::new());
        assert_eq!(state.items()[0].item_total, Money::from_cents(20));
        assert_eq!(state.items()[1].item_total, Money::from_cents(750));
    }

    #[test]
    fn test_initial_state() {
        let state = CartState::initial();
        assert!(state.is_empty());
        assert_eq!(state.total_items(), 0);
        assert_eq!(state.total_unique_items(), 0);
        assert_eq!(state.cart_total(), Money::zero());
        assert!(state.metadata().is_empty());
        assert_eq!(state, generate_cart_state(&[], Metadata::new()));
    }

    #[test]
    fn test_totals_summary() {
        let state = generate_cart_state(&sample_items(), Metadata::new());
        let totals = state.totals();
        assert!(!totals.is_empty);
        assert_eq!(totals.total_items, 5);
        assert_eq!(totals.total_unique_items, 2);
        assert_eq!(totals.cart_total.cents(), 770);
    }

    #[test]
    fn test_state_json_shape() {
        let items = [CartItem::new("a", Money::from_cents(10), 2)];
        let state = generate_cart_state(&items, Metadata::new());
        assert_eq!(
            serde_json::to_value(&state).unwrap(),
            json!({
                "items": [{"id": "a", "price": 10, "quantity": 2, "itemTotal": 20}],
                "isEmpty": false,
                "totalItems": 2,
                "totalUniqueItems": 1,
                "cartTotal": 20,
                "metadata": {}
            })
        );
    }
}
