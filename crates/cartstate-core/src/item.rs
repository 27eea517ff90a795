//! # Item Types
//!
//! Cart line items and the inputs used to create and update them.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Item Types                                      │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Item       │   │    CartItem     │   │   ItemPatch     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │──►│  id             │◄──│  price?         │       │
//! │  │  price?         │   │  price          │   │  quantity?      │       │
//! │  │  extra fields   │   │  quantity       │   │  extra fields   │       │
//! │  └─────────────────┘   │  itemTotal      │   └─────────────────┘       │
//! │   caller input          │  extra fields   │    partial update          │
//! │                         └─────────────────┘                             │
//! │                          stored in CartState                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `ItemPatch` has no `id`: merging a patch can never change which item it
//! is, so id uniqueness survives every update.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::money::Money;

/// Caller-defined key-value data (cart metadata, extra item fields).
pub type Metadata = Map<String, Value>;

/// Field names owned by `CartItem` itself. Extra fields never shadow them.
const RESERVED_FIELDS: [&str; 4] = ["id", "price", "quantity", "itemTotal"];

/// Extra field holding an item's spec values, read by `get_spec_quantity`.
pub const SPECS_FIELD: &str = "specs";

fn insert_extra(extra: &mut Metadata, key: impl Into<String>, value: Value) {
    let key = key.into();
    if !RESERVED_FIELDS.contains(&key.as_str()) {
        extra.insert(key, value);
    }
}

/// Drops reserved names that reached `extra` through a flattened decode.
fn strip_reserved(mut extra: Metadata) -> Metadata {
    extra.retain(|key, _| !RESERVED_FIELDS.contains(&key.as_str()));
    extra
}

// =============================================================================
// Merge
// =============================================================================

/// Copy-on-write merge: builds a new value with `patch` laid over `self`.
///
/// Fields absent from the patch keep their current value; present fields
/// overwrite (shallow, one level deep).
pub trait Merge<Patch: ?Sized> {
    fn merge(&self, patch: &Patch) -> Self;
}

impl Merge<Metadata> for Metadata {
    fn merge(&self, patch: &Metadata) -> Self {
        let mut merged = self.clone();
        for (key, value) in patch {
            merged.insert(key.clone(), value.clone());
        }
        merged
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// A line in the cart.
///
/// `item_total` is derived (`price × quantity`). The reducer recomputes it on
/// every transition, so a value read from `CartState` is always current.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "CartItemWire")]
pub struct CartItem {
    /// Unique identifier within the cart.
    pub id: String,

    /// Unit price.
    pub price: Money,

    /// Quantity in cart.
    pub quantity: i64,

    /// Line total (`price × quantity`).
    #[serde(default)]
    pub item_total: Money,

    /// Caller-defined fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Metadata,
}

impl CartItem {
    /// Creates a cart item with its line total already computed.
    pub fn new(id: impl Into<String>, price: Money, quantity: i64) -> Self {
        CartItem {
            id: id.into(),
            price,
            quantity,
            item_total: price.multiply_quantity(quantity),
            extra: Metadata::new(),
        }
    }

    /// Adds a caller-defined field. Reserved names are ignored.
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        insert_extra(&mut self.extra, key, value);
        self
    }

    /// Calculates the line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }

    /// Returns a copy with `item_total` recomputed.
    pub fn with_item_total(&self) -> Self {
        CartItem {
            item_total: self.line_total(),
            ..self.clone()
        }
    }

    /// Returns the `specs` extra field when it is an array.
    pub fn specs(&self) -> Option<&Vec<Value>> {
        self.extra.get(SPECS_FIELD).and_then(Value::as_array)
    }

    /// Checks whether this item's `specs` contain `spec`.
    pub fn has_spec(&self, spec: &Value) -> bool {
        self.specs().is_some_and(|specs| specs.contains(spec))
    }
}

impl Merge<ItemPatch> for CartItem {
    fn merge(&self, patch: &ItemPatch) -> Self {
        CartItem {
            id: self.id.clone(),
            price: patch.price.unwrap_or(self.price),
            quantity: patch.quantity.unwrap_or(self.quantity),
            item_total: self.item_total,
            extra: strip_reserved(self.extra.merge(&patch.extra)),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartItemWire {
    id: String,
    price: Money,
    quantity: i64,
    #[serde(default)]
    item_total: Money,
    #[serde(flatten)]
    extra: Metadata,
}

impl From<CartItemWire> for CartItem {
    fn from(wire: CartItemWire) -> Self {
        CartItem {
            id: wire.id,
            price: wire.price,
            quantity: wire.quantity,
            item_total: wire.item_total,
            extra: strip_reserved(wire.extra),
        }
    }
}

// =============================================================================
// Item (caller input)
// =============================================================================

/// An item as the caller hands it to `add_item`.
///
/// `price` is optional here because re-adding an item that is already in
/// the cart does not need one. A decoded `quantity` or `itemTotal` is
/// dropped: the quantity is always passed alongside the item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "ItemWire")]
pub struct Item {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Money>,

    #[serde(flatten)]
    pub extra: Metadata,
}

impl Item {
    pub fn new(id: impl Into<String>) -> Self {
        Item {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_price(mut self, price: Money) -> Self {
        self.price = Some(price);
        self
    }

    /// Adds a caller-defined field. Reserved names are ignored.
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        insert_extra(&mut self.extra, key, value);
        self
    }

    /// Builds the stored line for this item. A missing price becomes zero.
    pub fn to_cart_item(&self, quantity: i64) -> CartItem {
        CartItem {
            extra: strip_reserved(self.extra.clone()),
            ..CartItem::new(self.id.clone(), self.price.unwrap_or_default(), quantity)
        }
    }

    /// Builds an update carrying this item's fields and `quantity`.
    pub fn to_patch(&self, quantity: i64) -> ItemPatch {
        ItemPatch {
            price: self.price,
            quantity: Some(quantity),
            extra: strip_reserved(self.extra.clone()),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemWire {
    id: String,
    #[serde(default)]
    price: Option<Money>,
    #[serde(flatten)]
    extra: Metadata,
}

impl From<ItemWire> for Item {
    fn from(wire: ItemWire) -> Self {
        Item {
            id: wire.id,
            price: wire.price,
            extra: strip_reserved(wire.extra),
        }
    }
}

// =============================================================================
// Item Patch
// =============================================================================

/// A partial item used by UPDATE_ITEM.
///
/// Decoding accepts a whole line (`{...item, quantity}`): `price` and
/// `quantity` land in the typed fields, `id` and `itemTotal` are dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "ItemPatchWire")]
pub struct ItemPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Money>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,

    #[serde(flatten)]
    pub extra: Metadata,
}

impl ItemPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn price(mut self, price: Money) -> Self {
        self.price = Some(price);
        self
    }

    pub fn quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Sets a caller-defined field. Reserved names are ignored.
    pub fn field(mut self, key: impl Into<String>, value: Value) -> Self {
        insert_extra(&mut self.extra, key, value);
        self
    }

    /// True when the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        self.price.is_none() && self.quantity.is_none() && self.extra.is_empty()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemPatchWire {
    #[serde(default)]
    price: Option<Money>,
    #[serde(default)]
    quantity: Option<i64>,
    #[serde(flatten)]
    extra: Metadata,
}

impl From<ItemPatchWire> for ItemPatch {
    fn from(wire: ItemPatchWire) -> Self {
        ItemPatch {
            price: wire.price,
            quantity: wire.quantity,
            extra: strip_reserved(wire.extra),
        }
    }
}

/// A patch carrying every field of an existing line.
impl From<&CartItem> for ItemPatch {
    fn from(item: &CartItem) -> Self {
        ItemPatch {
            price: Some(item.price),
            quantity: Some(item.quantity),
            extra: item.extra.clone(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
