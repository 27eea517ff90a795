//! # Cart Configuration
//!
//! Optional limits applied by the public cart API.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     CARTSTATE_MAX_UNIQUE_ITEMS=100                                     │
//! │     CARTSTATE_MAX_ITEM_QUANTITY=999                                    │
//! │                                                                         │
//! │  2. TOML Config File (path passed to CartConfig::load)                 │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     No limits                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # cart.toml
//! [limits]
//! max_unique_items = 100
//! max_item_quantity = 999
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::{CartError, CartResult};

pub const ENV_MAX_UNIQUE_ITEMS: &str = "CARTSTATE_MAX_UNIQUE_ITEMS";
pub const ENV_MAX_ITEM_QUANTITY: &str = "CARTSTATE_MAX_ITEM_QUANTITY";

// =============================================================================
// Limits
// =============================================================================

/// Upper bounds enforced before an action is dispatched.
///
/// `None` means unlimited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitSettings {
    /// Maximum number of distinct lines in the cart.
    #[serde(default)]
    pub max_unique_items: Option<usize>,

    /// Maximum quantity of a single line.
    #[serde(default)]
    pub max_item_quantity: Option<i64>,
}

// =============================================================================
// Cart Config
// =============================================================================

/// Complete cart configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartConfig {
    #[serde(default)]
    pub limits: LimitSettings,
}

impl CartConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file, if `config_path` is given and exists
    /// 3. Environment variables
    pub fn load(config_path: Option<&Path>) -> CartResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path {
            if path.exists() {
                info!(?path, "Loading cart config from file");
                let contents = std::fs::read_to_string(path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads configuration, falling back to defaults on any error.
    pub fn load_or_default(config_path: Option<&Path>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load cart config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Checks that configured limits are usable.
    pub fn validate(&self) -> CartResult<()> {
        if self.limits.max_unique_items == Some(0) {
            return Err(CartError::Config(
                "max_unique_items must be at least 1".to_string(),
            ));
        }

        if let Some(max) = self.limits.max_item_quantity {
            if max <= 0 {
                return Err(CartError::Config(format!(
                    "max_item_quantity must be positive, got {}",
                    max
                )));
            }
        }

        Ok(())
    }

    /// Applies `CARTSTATE_*` environment variables.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup(ENV_MAX_UNIQUE_ITEMS) {
            match value.parse::<usize>() {
                Ok(max) => {
                    debug!(max, "Overriding max unique items from environment");
                    self.limits.max_unique_items = Some(max);
                }
                Err(_) => warn!(value = %value, "Invalid {} in environment", ENV_MAX_UNIQUE_ITEMS),
            }
        }

        if let Some(value) = lookup(ENV_MAX_ITEM_QUANTITY) {
            match value.parse::<i64>() {
                Ok(max) => {
                    debug!(max, "Overriding max item quantity from environment");
                    self.limits.max_item_quantity = Some(max);
                }
                Err(_) => warn!(value = %value, "Invalid {} in environment", ENV_MAX_ITEM_QUANTITY),
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
