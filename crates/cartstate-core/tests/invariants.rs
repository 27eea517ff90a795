//! Property tests: derived totals and id uniqueness hold after any sequence
//! of public operations.

use std::collections::HashSet;

use cartstate::{Cart, Item, ItemPatch, Metadata, Money};
use proptest::prelude::*;
use serde_json::json;

#[derive(Debug, Clone)]
enum Op {
    Add { id: u8, price: Option<i64>, quantity: i64 },
    Remove { id: u8 },
    Update { id: u8, quantity: Option<i64>, price: Option<i64> },
    SetQuantity { id: u8, quantity: i64 },
    SetQuantityOrInsert { id: u8, quantity: i64 },
    Empty,
    SetMeta { key: u8 },
    UpdateMeta { key: u8 },
    ClearMeta,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..6, proptest::option::of(0i64..10_000), -3i64..20)
            .prop_map(|(id, price, quantity)| Op::Add { id, price, quantity }),
        (0u8..6).prop_map(|id| Op::Remove { id }),
        (0u8..6, proptest::option::of(0i64..20), proptest::option::of(0i64..10_000))
            .prop_map(|(id, quantity, price)| Op::Update { id, quantity, price }),
        (0u8..6, -3i64..20).prop_map(|(id, quantity)| Op::SetQuantity { id, quantity }),
        (0u8..6, -3i64..20).prop_map(|(id, quantity)| Op::SetQuantityOrInsert { id, quantity }),
        Just(Op::Empty),
        (0u8..4).prop_map(|key| Op::SetMeta { key }),
        (0u8..4).prop_map(|key| Op::UpdateMeta { key }),
        Just(Op::ClearMeta),
    ]
}

fn item(id: u8, price: Option<i64>) -> Item {
    let mut item = Item::new(format!("sku-{}", id));
    if let Some(cents) = price {
        item = item.with_price(Money::from_cents(cents));
    }
    item
}

fn meta(key: u8) -> Metadata {
    let mut m = Metadata::new();
    m.insert(format!("k{}", key), json!(key));
    m
}

fn apply(cart: &mut Cart, op: Op) {
    // Errors are expected for some inputs; the invariants must hold either way.
    let _ = match op {
        Op::Add { id, price, quantity } => cart.add_item(&item(id, price), quantity),
        Op::Remove { id } => {
            cart.remove_item(&format!("sku-{}", id));
            Ok(())
        }
        Op::Update { id, quantity, price } => {
            let mut patch = ItemPatch::new();
            patch.quantity = quantity;
            patch.price = price.map(Money::from_cents);
            cart.update_item(&format!("sku-{}", id), patch)
        }
        Op::SetQuantity { id, quantity } => {
            cart.update_item_quantity(&format!("sku-{}", id), quantity)
        }
        Op::SetQuantityOrInsert { id, quantity } => {
            cart.update_item_quantity_or_insert(&item(id, None), quantity)
        }
        Op::Empty => {
            cart.empty_cart();
            Ok(())
        }
        Op::SetMeta { key } => {
            cart.set_cart_metadata(meta(key));
            Ok(())
        }
        Op::UpdateMeta { key } => {
            cart.update_cart_metadata(meta(key));
            Ok(())
        }
        Op::ClearMeta => {
            cart.clear_cart_metadata();
            Ok(())
        }
    };
}

proptest! {
    #[test]
    fn test_derived_fields_always_consistent(
        ops in proptest::collection::vec(op_strategy(), 0..60)
    ) {
        let mut cart = Cart::new();

        for op in ops {
            apply(&mut cart, op);

            let state = cart.state();
            let items = state.items();

            let cart_total: Money = items.iter().map(|i| i.price * i.quantity).sum();
            let total_items: i64 = items.iter().map(|i| i.quantity).sum();

            prop_assert_eq!(state.cart_total(), cart_total);
            prop_assert_eq!(state.total_items(), total_items);
            prop_assert_eq!(state.total_unique_items(), items.len());
            prop_assert_eq!(state.is_empty(), items.is_empty());

            for i in items {
                prop_assert_eq!(i.item_total, i.price * i.quantity);
            }

            let ids: HashSet<&str> = items.iter().map(|i| i.id.as_str()).collect();
            prop_assert_eq!(ids.len(), items.len());
        }
    }

    #[test]
    fn test_failed_operations_leave_state_unchanged(id in 0u8..6, quantity in 1i64..20) {
        let mut cart = Cart::new();
        cart.add_item(&item(0, Some(100)), 1).unwrap();
        let before = cart.state().clone();

        if cart.add_item(&item(id, None), quantity).is_err() {
            prop_assert_eq!(cart.state(), &before);
        }

        let before = cart.state().clone();
        if cart.update_item_quantity(&format!("absent-{}", id), quantity).is_err() {
            prop_assert_eq!(cart.state(), &before);
        }
    }
}
