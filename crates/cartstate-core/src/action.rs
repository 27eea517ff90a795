//! # Actions
//!
//! Tagged transition requests consumed by the reducer.
//!
//! Inside the crate actions are the closed [`Action`] enum. On the wire they
//! travel as an [`ActionEnvelope`]:
//!
//! ```json
//! { "type": "UPDATE_ITEM", "id": "a", "payload": { "quantity": 5 } }
//! ```
//!
//! Decoding an envelope is the only place an unknown `type` can appear, so it
//! is also the only source of [`CartError::UnsupportedAction`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CartError, CartResult};
use crate::item::{CartItem, ItemPatch, Metadata};

// =============================================================================
// Action Kind
// =============================================================================

/// The `type` tag of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    SetItems,
    AddItem,
    UpdateItem,
    RemoveItem,
    EmptyCart,
    ClearCartMeta,
    SetCartMeta,
    UpdateCartMeta,
}

impl ActionKind {
    pub const ALL: [ActionKind; 8] = [
        ActionKind::SetItems,
        ActionKind::AddItem,
        ActionKind::UpdateItem,
        ActionKind::RemoveItem,
        ActionKind::EmptyCart,
        ActionKind::ClearCartMeta,
        ActionKind::SetCartMeta,
        ActionKind::UpdateCartMeta,
    ];

    /// The wire name, e.g. `"ADD_ITEM"`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ActionKind::SetItems => "SET_ITEMS",
            ActionKind::AddItem => "ADD_ITEM",
            ActionKind::UpdateItem => "UPDATE_ITEM",
            ActionKind::RemoveItem => "REMOVE_ITEM",
            ActionKind::EmptyCart => "EMPTY_CART",
            ActionKind::ClearCartMeta => "CLEAR_CART_META",
            ActionKind::SetCartMeta => "SET_CART_META",
            ActionKind::UpdateCartMeta => "UPDATE_CART_META",
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ActionKind {
    type Err = CartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CartError::UnsupportedAction(s.to_string()))
    }
}

// =============================================================================
// Action
// =============================================================================

/// A transition request.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Replace the item list wholesale.
    SetItems(Vec<CartItem>),
    /// Append a line.
    AddItem(CartItem),
    /// Merge `patch` into the line with `id`.
    UpdateItem { id: String, patch: ItemPatch },
    /// Drop the line with `id`.
    RemoveItem { id: String },
    /// Reset to the initial state.
    EmptyCart,
    /// Reset metadata, keep items.
    ClearCartMeta,
    /// Replace metadata.
    SetCartMeta(Metadata),
    /// Shallow-merge into metadata.
    UpdateCartMeta(Metadata),
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::SetItems(_) => ActionKind::SetItems,
            Action::AddItem(_) => ActionKind::AddItem,
            Action::UpdateItem { .. } => ActionKind::UpdateItem,
            Action::RemoveItem { .. } => ActionKind::RemoveItem,
            Action::EmptyCart => ActionKind::EmptyCart,
            Action::ClearCartMeta => ActionKind::ClearCartMeta,
            Action::SetCartMeta(_) => ActionKind::SetCartMeta,
            Action::UpdateCartMeta(_) => ActionKind::UpdateCartMeta,
        }
    }

    /// Decodes an action from its JSON envelope.
    pub fn from_json(value: Value) -> CartResult<Self> {
        let envelope: ActionEnvelope =
            serde_json::from_value(value).map_err(|e| CartError::InvalidAction {
                kind: "envelope".to_string(),
                reason: e.to_string(),
            })?;
        Action::try_from(envelope)
    }

    /// Encodes this action as a JSON envelope.
    pub fn to_envelope(&self) -> CartResult<ActionEnvelope> {
        let kind = self.kind();
        let (id, payload) = match self {
            Action::SetItems(items) => (None, Some(encode_payload(kind, items)?)),
            Action::AddItem(item) => (None, Some(encode_payload(kind, item)?)),
            Action::UpdateItem { id, patch } => {
                (Some(id.clone()), Some(encode_payload(kind, patch)?))
            }
            Action::RemoveItem { id } => (Some(id.clone()), None),
            Action::EmptyCart | Action::ClearCartMeta => (None, None),
            Action::SetCartMeta(metadata) | Action::UpdateCartMeta(metadata) => {
                (None, Some(Value::Object(metadata.clone())))
            }
        };

        Ok(ActionEnvelope {
            kind: kind.as_str().to_string(),
            id,
            payload,
        })
    }
}

// =============================================================================
// Action Envelope
// =============================================================================

/// Wire form of an action.
///
/// Prices in the payload are integers in minor currency units (`10` means
/// ten cents, not ten dollars). A fractional price such as `9.99` is rejected
/// with `InvalidAction`; callers holding decimal amounts scale them first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionEnvelope {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl TryFrom<ActionEnvelope> for Action {
    type Error = CartError;

    fn try_from(envelope: ActionEnvelope) -> CartResult<Self> {
        let kind: ActionKind = envelope.kind.parse()?;
        let ActionEnvelope { id, payload, .. } = envelope;

        let action = match kind {
            ActionKind::SetItems => Action::SetItems(decode_payload(kind, payload)?),
            ActionKind::AddItem => Action::AddItem(decode_payload(kind, payload)?),
            ActionKind::UpdateItem => Action::UpdateItem {
                id: require_id(kind, id)?,
                patch: decode_payload(kind, payload)?,
            },
            ActionKind::RemoveItem => Action::RemoveItem {
                id: require_id(kind, id)?,
            },
            ActionKind::EmptyCart => Action::EmptyCart,
            ActionKind::ClearCartMeta => Action::ClearCartMeta,
            ActionKind::SetCartMeta => Action::SetCartMeta(decode_payload(kind, payload)?),
            ActionKind::UpdateCartMeta => Action::UpdateCartMeta(decode_payload(kind, payload)?),
        };

        Ok(action)
    }
}

fn require_id(kind: ActionKind, id: Option<String>) -> CartResult<String> {
    id.filter(|id| !id.is_empty())
        .ok_or_else(|| CartError::InvalidAction {
            kind: kind.to_string(),
            reason: "missing `id`".to_string(),
        })
}

fn decode_payload<T: DeserializeOwned>(kind: ActionKind, payload: Option<Value>) -> CartResult<T> {
    let payload = payload.ok_or_else(|| CartError::InvalidAction {
        kind: kind.to_string(),
        reason: "missing `payload`".to_string(),
    })?;

    serde_json::from_value(payload).map_err(|e| CartError::InvalidAction {
        kind: kind.to_string(),
        reason: e.to_string(),
    })
}

fn encode_payload<T: Serialize>(kind: ActionKind, payload: &T) -> CartResult<Value> {
    serde_json::to_value(payload).map_err(|e| CartError::InvalidAction {
        kind: kind.to_string(),
        reason: e.to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use serde_json::json;

    #[test]
    fn test_kind_parses_wire_names() {
        for kind in ActionKind::ALL {
            assert_eq!(kind.as_str().parse::<ActionKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_kind_is_unsupported() {
        let err = "CHECKOUT".parse::<ActionKind>().unwrap_err();
        assert_eq!(err, CartError::UnsupportedAction("CHECKOUT".to_string()));
    }

    #[test]
    fn test_decode_update_item() {
        let action = Action::from_json(json!({
            "type": "UPDATE_ITEM",
            "id": "a",
            "payload": {"quantity": 5, "note": "gift"}
        }))
        .unwrap();

        assert_eq!(
            action,
            Action::UpdateItem {
                id: "a".to_string(),
                patch: ItemPatch::new().quantity(5).field("note", json!("gift")),
            }
        );
    }

    #[test]
    fn test_decode_missing_id_is_invalid() {
        let err = Action::from_json(json!({"type": "REMOVE_ITEM"})).unwrap_err();
        assert!(matches!(err, CartError::InvalidAction { .. }));
    }

    #[test]
    fn test_decode_bad_payload_is_invalid() {
        let err = Action::from_json(json!({"type": "ADD_ITEM", "payload": {"id": "a"}}))
            .unwrap_err();
        assert!(matches!(err, CartError::InvalidAction { ref kind, .. } if kind == "ADD_ITEM"));
    }

    #[test]
    fn test_decode_fractional_price_is_invalid() {
        let err = Action::from_json(json!({
            "type": "ADD_ITEM",
            "payload": {"id": "a", "price": 9.99, "quantity": 1}
        }))
        .unwrap_err();
        assert!(matches!(err, CartError::InvalidAction { ref kind, .. } if kind == "ADD_ITEM"));
    }

    #[test]
    fn test_envelope_shape() {
        let action = Action::AddItem(CartItem::new("a", Money::from_cents(10), 2));
        let envelope = action.to_envelope().unwrap();
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "type": "ADD_ITEM",
                "payload": {"id": "a", "price": 10, "quantity": 2, "itemTotal": 20}
            })
        );

        let empty = Action::EmptyCart.to_envelope().unwrap();
        assert_eq!(serde_json::to_value(&empty).unwrap(), json!({"type": "EMPTY_CART"}));
    }

    #[test]
    fn test_decode_update_item_with_whole_line_payload() {
        let action = Action::from_json(json!({
            "type": "UPDATE_ITEM",
            "id": "a",
            "payload": {"id": "a", "price": 10, "quantity": 3, "itemTotal": 20, "note": "gift"}
        }))
        .unwrap();

        assert_eq!(
            action,
            Action::UpdateItem {
                id: "a".to_string(),
                patch: ItemPatch::new()
                    .price(Money::from_cents(10))
                    .quantity(3)
                    .field("note", json!("gift")),
            }
        );
    }

    #[test]
    fn test_decode_add_item_keeps_reserved_fields_typed() {
        let action = Action::from_json(json!({
            "type": "ADD_ITEM",
            "payload": {"id": "a", "price": 10, "quantity": 2, "itemTotal": 99, "name": "Cola"}
        }))
        .unwrap();

        let line = match action {
            Action::AddItem(line) => line,
            other => panic!("expected ADD_ITEM, got {:?}", other),
        };
        assert_eq!(line.extra.len(), 1);
        assert_eq!(line.extra["name"], json!("Cola"));

        let envelope = Action::AddItem(line).to_envelope().unwrap();
        assert_eq!(
            serde_json::to_string(&envelope.payload).unwrap(),
            r#"{"id":"a","price":10,"quantity":2,"itemTotal":99,"name":"Cola"}"#
        );
    }
}
