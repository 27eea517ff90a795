//! # Cart Hooks
//!
//! Caller-supplied callbacks fired after a public cart method commits.
//!
//! | Hook              | Fired by                                  | Receives         |
//! |-------------------|-------------------------------------------|------------------|
//! | `on_item_add`     | `add_item`, `update_item_quantity_or_insert` | the new line  |
//! | `on_item_update`  | `add_item` (existing), `update_item*`     | id, patch        |
//! | `on_item_remove`  | `remove_item`, quantity <= 0 updates      | id               |
//! | `on_empty_cart`   | `empty_cart`                              | nothing          |
//!
//! Every hook defaults to a no-op, so the cart never has to check whether
//! one is set. Hooks must be `Send` so a `Cart` can move between threads.

use crate::item::{CartItem, ItemPatch};

type AddHook = Box<dyn FnMut(&CartItem) + Send>;
type UpdateHook = Box<dyn FnMut(&str, &ItemPatch) + Send>;
type RemoveHook = Box<dyn FnMut(&str) + Send>;
type EmptyHook = Box<dyn FnMut() + Send>;

/// The set of hooks a `Cart` calls.
pub struct CartHooks {
    pub(crate) on_item_add: AddHook,
    pub(crate) on_item_update: UpdateHook,
    pub(crate) on_item_remove: RemoveHook,
    pub(crate) on_empty_cart: EmptyHook,
}

impl CartHooks {
    pub fn new() -> Self {
        CartHooks {
            on_item_add: Box::new(|_| {}),
            on_item_update: Box::new(|_, _| {}),
            on_item_remove: Box::new(|_| {}),
            on_empty_cart: Box::new(|| {}),
        }
    }

    pub fn on_item_add(mut self, hook: impl FnMut(&CartItem) + Send + 'static) -> Self {
        self.on_item_add = Box::new(hook);
        self
    }

    pub fn on_item_update(mut self, hook: impl FnMut(&str, &ItemPatch) + Send + 'static) -> Self {
        self.on_item_update = Box::new(hook);
        self
    }

    pub fn on_item_remove(mut self, hook: impl FnMut(&str) + Send + 'static) -> Self {
        self.on_item_remove = Box::new(hook);
        self
    }

    pub fn on_empty_cart(mut self, hook: impl FnMut() + Send + 'static) -> Self {
        self.on_empty_cart = Box::new(hook);
        self
    }
}

impl Default for CartHooks {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CartHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartHooks").finish_non_exhaustive()
    }
}
