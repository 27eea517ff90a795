//! # Error Types
//!
//! Domain-specific error types for cartstate.
//!
//! ## Error Taxonomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         CartError                                       │
//! │                                                                         │
//! │  Input failures (public API)                                           │
//! │  ├── MissingId          - add/update-quantity without an id            │
//! │  ├── MissingPrice       - new item added without a price               │
//! │  ├── ItemNotFound       - strict quantity update on absent item        │
//! │  └── DuplicateItem      - set/add would break id uniqueness            │
//! │                                                                         │
//! │  Limits (CartConfig)                                                   │
//! │  ├── CartTooLarge                                                      │
//! │  └── QuantityTooLarge                                                  │
//! │                                                                         │
//! │  Action decoding (envelopes)                                           │
//! │  ├── UnsupportedAction  - unknown `type` tag                           │
//! │  └── InvalidAction      - known tag, missing/undecodable fields        │
//! │                                                                         │
//! │  Config                                                                │
//! │  └── Config             - unreadable or invalid config                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error is returned before the reducer runs, so a failed call never
//! changes cart state.

use thiserror::Error;

// =============================================================================
// Cart Error
// =============================================================================

/// Errors returned by cart operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// An item was passed without an `id`.
    #[error("You must provide an `id` for items")]
    MissingId,

    /// A new item was added without a `price`.
    ///
    /// ## When This Occurs
    /// - `add_item` for an id not yet in the cart, with `price: None`
    ///
    /// Existing items keep their stored price, so re-adding them without a
    /// price is fine.
    #[error("You must pass a `price` for new item {id}")]
    MissingPrice { id: String },

    /// The strict quantity update targeted an item that is not in the cart.
    #[error("No such item to update: {0}")]
    ItemNotFound(String),

    /// An action would introduce a second item with the same id.
    #[error("Item {0} is already in the cart")]
    DuplicateItem(String),

    /// An action envelope carried a `type` the reducer does not know.
    #[error("Unsupported action: {0}")]
    UnsupportedAction(String),

    /// An action envelope had a known `type` but unusable fields.
    #[error("Invalid {kind} action: {reason}")]
    InvalidAction { kind: String, reason: String },

    /// Cart has reached its configured unique item limit.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Item quantity exceeds the configured maximum.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Configuration could not be loaded or is invalid.
    #[error("Invalid cart configuration: {0}")]
    Config(String),
}

impl From<std::io::Error> for CartError {
    fn from(err: std::io::Error) -> Self {
        CartError::Config(err.to_string())
    }
}

impl From<toml::de::Error> for CartError {
    fn from(err: toml::de::Error) -> Self {
        CartError::Config(err.to_string())
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CartError.
pub type CartResult<T> = Result<T, CartError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CartError::MissingId.to_string(),
            "You must provide an `id` for items"
        );
        assert_eq!(
            CartError::MissingPrice {
                id: "b".to_string()
            }
            .to_string(),
            "You must pass a `price` for new item b"
        );
        assert_eq!(
            CartError::QuantityTooLarge {
                requested: 1000,
                max: 999
            }
            .to_string(),
            "Quantity 1000 exceeds maximum allowed (999)"
        );
    }

    #[test]
    fn test_io_error_converts_to_config_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: CartError = io.into();
        assert!(matches!(err, CartError::Config(_)));
    }
}
