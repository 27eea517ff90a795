//! # Event Bus
//!
//! Synchronous publish/subscribe for committed cart actions.
//!
//! ## Delivery
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cart::dispatch(action)                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  reduce(state, action) ──► new state committed                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  bus.emit(CartEvent { action, state })                                  │
//! │       │                                                                 │
//! │       ├──► on(Topic::Kind(ADD_ITEM), h1)   only ADD_ITEM                │
//! │       ├──► on(Topic::All, h2)              every action                 │
//! │       └──► on(Topic::Kind(ADD_ITEM), h3)                                │
//! │                                                                         │
//! │  Handlers run in registration order, on the caller's thread, before     │
//! │  the cart method returns. No queue, no error isolation.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Handlers only see shared references to the action and the committed
//! state, so they cannot re-enter the cart that owns the bus.

use crate::action::{Action, ActionKind};
use crate::state::CartState;

/// What a handler is subscribed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    /// One action kind.
    Kind(ActionKind),
    /// Every action (the wildcard channel).
    All,
}

impl Topic {
    fn matches(&self, kind: ActionKind) -> bool {
        match self {
            Topic::Kind(k) => *k == kind,
            Topic::All => true,
        }
    }
}

impl From<ActionKind> for Topic {
    fn from(kind: ActionKind) -> Self {
        Topic::Kind(kind)
    }
}

/// A committed action and the state it produced.
#[derive(Debug, Clone, Copy)]
pub struct CartEvent<'a> {
    pub action: &'a Action,
    pub state: &'a CartState,
}

impl CartEvent<'_> {
    pub fn kind(&self) -> ActionKind {
        self.action.kind()
    }
}

/// Handle returned by [`EventBus::on`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(ActionKind, &CartEvent<'_>) + Send>;

struct Subscription {
    id: SubscriptionId,
    topic: Topic,
    handler: Handler,
}

/// Registry of event handlers.
#[derive(Default)]
pub struct EventBus {
    subscriptions: Vec<Subscription>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `topic`.
    pub fn on<F>(&mut self, topic: impl Into<Topic>, handler: F) -> SubscriptionId
    where
        F: FnMut(ActionKind, &CartEvent<'_>) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            id,
            topic: topic.into(),
            handler: Box::new(handler),
        });
        id
    }

    /// Removes a handler. Returns false if it was not registered.
    pub fn off(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|sub| sub.id != id);
        self.subscriptions.len() != before
    }

    /// Calls every handler whose topic matches the event's kind.
    pub fn emit(&mut self, event: &CartEvent<'_>) {
        let kind = event.kind();
        for sub in self.subscriptions.iter_mut() {
            if sub.topic.matches(kind) {
                (sub.handler)(kind, event);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
