//! # Cart
//!
//! The public cart API: validates input, dispatches actions to the reducer,
//! notifies bus subscribers, then calls the caller's hooks.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cart Operation Flow                               │
//! │                                                                         │
//! │  cart.add_item(item, 2)                                                 │
//! │       │                                                                 │
//! │       ├── id missing?              → Err(MissingId)                     │
//! │       ├── quantity <= 0?           → Ok(()), nothing happens            │
//! │       ├── new item without price?  → Err(MissingPrice)                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  dispatch(ADD_ITEM | UPDATE_ITEM)                                       │
//! │       ├── validate_action          → Err(DuplicateItem | limits)        │
//! │       ├── state = reduce(state, action)                                 │
//! │       └── bus.emit(action, state)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  hooks.on_item_add / on_item_update                                     │
//! │                                                                         │
//! │  Any Err is returned before reduce(), so state is unchanged.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Threading
//! Everything runs to completion on the caller's thread. Mutations take
//! `&mut self`. `Cart` is `Send` (hooks and handlers must be too), so
//! callers sharing a cart between threads wrap it in their own lock.

use serde_json::Value;
use tracing::debug;

use crate::action::{Action, ActionEnvelope, ActionKind};
use crate::bus::{CartEvent, EventBus, SubscriptionId, Topic};
use crate::config::CartConfig;
use crate::error::{CartError, CartResult};
use crate::hooks::CartHooks;
use crate::item::{CartItem, Item, ItemPatch, Metadata};
use crate::reducer::reduce;
use crate::state::CartState;
use crate::validation::{validate_action, validate_item_id};

// =============================================================================
// Builder
// =============================================================================

/// Builds a [`Cart`] with config and hooks.
///
/// ## Usage
/// ```rust
/// use cartstate::Cart;
///
/// let cart = Cart::builder()
///     .on_item_add(|item| println!("added {}", item.id))
///     .on_item_remove(|id| println!("removed {}", id))
///     .build();
/// assert!(cart.state().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct CartBuilder {
    config: CartConfig,
    hooks: CartHooks,
}

impl CartBuilder {
    pub fn config(mut self, config: CartConfig) -> Self {
        self.config = config;
        self
    }

    pub fn hooks(mut self, hooks: CartHooks) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn on_item_add(mut self, hook: impl FnMut(&CartItem) + Send + 'static) -> Self {
        self.hooks = self.hooks.on_item_add(hook);
        self
    }

    pub fn on_item_update(mut self, hook: impl FnMut(&str, &ItemPatch) + Send + 'static) -> Self {
        self.hooks = self.hooks.on_item_update(hook);
        self
    }

    pub fn on_item_remove(mut self, hook: impl FnMut(&str) + Send + 'static) -> Self {
        self.hooks = self.hooks.on_item_remove(hook);
        self
    }

    pub fn on_empty_cart(mut self, hook: impl FnMut() + Send + 'static) -> Self {
        self.hooks = self.hooks.on_empty_cart(hook);
        self
    }

    pub fn build(self) -> Cart {
        Cart {
            state: CartState::initial(),
            config: self.config,
            hooks: self.hooks,
            bus: EventBus::new(),
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// A long-lived cart.
#[derive(Debug)]
pub struct Cart {
    state: CartState,
    config: CartConfig,
    hooks: CartHooks,
    bus: EventBus,
}

impl Cart {
    /// Creates an empty cart with no limits and no-op hooks.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> CartBuilder {
        CartBuilder::default()
    }

    /// The current state snapshot.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    pub fn items(&self) -> &[CartItem] {
        self.state.items()
    }

    pub fn config(&self) -> &CartConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Observers
    // -------------------------------------------------------------------------

    /// Subscribes to committed actions of one kind (or `Topic::All`).
    pub fn subscribe<F>(&mut self, topic: impl Into<Topic>, handler: F) -> SubscriptionId
    where
        F: FnMut(ActionKind, &CartEvent<'_>) + Send + 'static,
    {
        self.bus.on(topic, handler)
    }

    /// Subscribes to every committed action.
    pub fn subscribe_all<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(ActionKind, &CartEvent<'_>) + Send + 'static,
    {
        self.bus.on(Topic::All, handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.off(id)
    }

    // -------------------------------------------------------------------------
    // Dispatch
    // -------------------------------------------------------------------------

    /// Validates and applies an action. Hooks are not called.
    ///
    /// ## Errors
    /// - `DuplicateItem` if the action would repeat an id
    /// - `CartTooLarge` / `QuantityTooLarge` when limits are configured
    pub fn dispatch(&mut self, action: Action) -> CartResult<()> {
        validate_action(&self.state, &action, &self.config.limits)?;
        self.commit(action);
        Ok(())
    }

    /// Decodes and applies a serialized action.
    ///
    /// ## Errors
    /// - `UnsupportedAction` for an unknown `type`
    /// - `InvalidAction` for missing or malformed fields
    /// - anything [`Cart::dispatch`] returns
    pub fn dispatch_envelope(&mut self, envelope: ActionEnvelope) -> CartResult<()> {
        let action = Action::try_from(envelope)?;
        self.dispatch(action)
    }

    /// Like [`Cart::dispatch_envelope`], from raw JSON.
    pub fn dispatch_json(&mut self, value: Value) -> CartResult<()> {
        let action = Action::from_json(value)?;
        self.dispatch(action)
    }

    fn commit(&mut self, action: Action) {
        if self.bus.is_empty() {
            self.state = reduce(&self.state, action);
            return;
        }

        let committed = action.clone();
        self.state = reduce(&self.state, action);
        self.bus.emit(&CartEvent {
            action: &committed,
            state: &self.state,
        });
    }

    // -------------------------------------------------------------------------
    // Items
    // -------------------------------------------------------------------------

    /// Replaces the whole item list.
    pub fn set_items(&mut self, items: Vec<CartItem>) -> CartResult<()> {
        debug!(count = items.len(), "Setting cart items");
        self.dispatch(Action::SetItems(items))
    }

    /// Adds `quantity` of `item`, or increases the quantity of an existing line.
    ///
    /// ## Behavior
    /// - quantity <= 0: nothing happens
    /// - item not in cart: appended (needs a price), add hook fires
    /// - item in cart: quantity becomes existing + `quantity`, the item's
    ///   other fields overwrite the stored ones, update hook fires
    ///
    /// ## Errors
    /// - `MissingId` if `item.id` is empty
    /// - `MissingPrice` if the item is new and has no price
    pub fn add_item(&mut self, item: &Item, quantity: i64) -> CartResult<()> {
        validate_item_id(&item.id)?;

        if quantity <= 0 {
            debug!(id = %item.id, quantity, "Ignoring add with non-positive quantity");
            return Ok(());
        }

        match self.state.item(&item.id).map(|current| current.quantity) {
            None => {
                if item.price.is_none() {
                    return Err(CartError::MissingPrice {
                        id: item.id.clone(),
                    });
                }

                debug!(id = %item.id, quantity, "Adding item to cart");
                let line = item.to_cart_item(quantity);
                self.dispatch(Action::AddItem(line.clone()))?;
                (self.hooks.on_item_add)(&line);
            }
            Some(existing) => {
                let total = existing + quantity;
                debug!(id = %item.id, quantity = total, "Increasing item quantity");
                let patch = item.to_patch(total);
                self.dispatch(Action::UpdateItem {
                    id: item.id.clone(),
                    patch: patch.clone(),
                })?;
                (self.hooks.on_item_update)(&item.id, &patch);
            }
        }

        Ok(())
    }

    /// Removes the line with `id`. An empty id is ignored.
    pub fn remove_item(&mut self, id: &str) {
        if id.is_empty() {
            return;
        }

        debug!(id = %id, "Removing item from cart");
        self.commit(Action::RemoveItem { id: id.to_string() });
        (self.hooks.on_item_remove)(id);
    }

    /// Merges `patch` into the line with `id`.
    ///
    /// An empty id or empty patch is ignored. The update hook receives the
    /// patch as given, not the merged line.
    pub fn update_item(&mut self, id: &str, patch: ItemPatch) -> CartResult<()> {
        if id.is_empty() || patch.is_empty() {
            return Ok(());
        }

        debug!(id = %id, "Updating item");
        self.dispatch(Action::UpdateItem {
            id: id.to_string(),
            patch: patch.clone(),
        })?;
        (self.hooks.on_item_update)(id, &patch);
        Ok(())
    }

    /// Sets the quantity of an existing line. Strict: the line must exist.
    ///
    /// A quantity <= 0 removes the line instead.
    ///
    /// ## Errors
    /// - `ItemNotFound` if no line has `id`
    pub fn update_item_quantity(&mut self, id: &str, quantity: i64) -> CartResult<()> {
        if quantity <= 0 {
            self.remove_item(id);
            return Ok(());
        }

        let current = self
            .state
            .item(id)
            .ok_or_else(|| CartError::ItemNotFound(id.to_string()))?;
        let patch = ItemPatch::from(current).quantity(quantity);

        debug!(id = %id, quantity, "Setting item quantity");
        self.dispatch(Action::UpdateItem {
            id: id.to_string(),
            patch: patch.clone(),
        })?;
        (self.hooks.on_item_update)(id, &patch);
        Ok(())
    }

    /// Sets the quantity of a line, inserting it when absent. Lenient
    /// counterpart of [`Cart::update_item_quantity`].
    ///
    /// ## Behavior
    /// - quantity <= 0: removes the line
    /// - item not in cart: appended with `quantity` (no price check, a
    ///   missing price is stored as zero), add hook fires
    /// - item in cart: only the quantity changes, update hook fires
    ///
    /// ## Errors
    /// - `MissingId` if `item.id` is empty
    pub fn update_item_quantity_or_insert(
        &mut self,
        item: &Item,
        quantity: i64,
    ) -> CartResult<()> {
        validate_item_id(&item.id)?;

        if quantity <= 0 {
            self.remove_item(&item.id);
            return Ok(());
        }

        match self.state.item(&item.id) {
            None => {
                debug!(id = %item.id, quantity, "Inserting item via quantity update");
                let line = item.to_cart_item(quantity);
                self.dispatch(Action::AddItem(line.clone()))?;
                (self.hooks.on_item_add)(&line);
            }
            Some(current) => {
                let patch = ItemPatch::from(current).quantity(quantity);
                debug!(id = %item.id, quantity, "Setting item quantity");
                self.dispatch(Action::UpdateItem {
                    id: item.id.clone(),
                    patch: patch.clone(),
                })?;
                (self.hooks.on_item_update)(&item.id, &patch);
            }
        }

        Ok(())
    }

    /// Resets the cart to its initial state, metadata included.
    pub fn empty_cart(&mut self) {
        debug!(items = self.state.total_unique_items(), "Emptying cart");
        self.commit(Action::EmptyCart);
        (self.hooks.on_empty_cart)();
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    pub fn get_item(&self, id: &str) -> Option<&CartItem> {
        self.state.item(id)
    }

    /// Quantity of the line with `id`, or 0 when absent.
    pub fn get_item_quantity(&self, id: &str) -> i64 {
        self.get_item(id).map_or(0, |item| item.quantity)
    }

    pub fn in_cart(&self, id: &str) -> bool {
        self.get_item(id).is_some()
    }

    /// Total quantity of lines whose `specs` field contains `spec`.
    ///
    /// Lines without a `specs` array do not count.
    pub fn get_spec_quantity(&self, spec: &Value) -> i64 {
        self.state
            .items()
            .iter()
            .filter(|item| item.has_spec(spec))
            .map(|item| item.quantity)
            .sum()
    }

    // -------------------------------------------------------------------------
    // Metadata
    // -------------------------------------------------------------------------

    /// Replaces cart metadata. An empty map is ignored.
    pub fn set_cart_metadata(&mut self, metadata: Metadata) {
        if metadata.is_empty() {
            return;
        }
        debug!(keys = metadata.len(), "Setting cart metadata");
        self.commit(Action::SetCartMeta(metadata));
    }

    /// Shallow-merges into cart metadata. An empty map is ignored.
    pub fn update_cart_metadata(&mut self, metadata: Metadata) {
        if metadata.is_empty() {
            return;
        }
        debug!(keys = metadata.len(), "Updating cart metadata");
        self.commit(Action::UpdateCartMeta(metadata));
    }

    pub fn clear_cart_metadata(&mut self) {
        debug!("Clearing cart metadata");
        self.commit(Action::ClearCartMeta);
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
