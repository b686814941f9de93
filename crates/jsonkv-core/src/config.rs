//! Parser and table limits.
//!
//! Defaults are sized for small request bodies: 1 KiB per body, 1024 pairs
//! per object and 50 000 slots per table.
//! A config document is JSON; missing fields fall back to the defaults.
//!
//! ```
//! use jsonkv_core::ParseConfig;
//!
//! let config = ParseConfig::from_json(r#"{"slots": 64, "capacity": 64}"#).unwrap();
//! assert_eq!(config.slots, 64);
//! assert_eq!(config.max_kvp, 1024);
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Default number of primary slots in every table.
pub const CAPACITY: usize = 50_000;

/// Default maximum number of key/value fragments collected per object.
pub const MAX_KVP: usize = 1024;

/// Default maximum object nesting depth.
pub const MAX_DEPTH: usize = 32;

/// Default maximum body length in bytes.
pub const MAX_BODY_LEN: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParseConfig {
    /// Number of primary slots; the hash is taken modulo this value.
    pub slots: usize,
    /// Maximum number of occupied primary slots. Never larger than `slots`.
    pub capacity: usize,
    /// Fragments beyond this count are dropped from an object.
    pub max_kvp: usize,
    /// Nesting deeper than this is rejected with `TooDeep`.
    pub max_depth: usize,
    /// Bodies longer than this are rejected with `BodyTooLarge`.
    pub max_body_len: usize,
    /// Accept one leading `-` on numbers. Off by default: `-5` is then an
    /// unquoted string and fails the parse.
    pub signed_numbers: bool,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            slots: CAPACITY,
            capacity: CAPACITY,
            max_kvp: MAX_KVP,
            max_depth: MAX_DEPTH,
            max_body_len: MAX_BODY_LEN,
            signed_numbers: false,
        }
    }
}

impl ParseConfig {
    /// Load a config from a JSON document, filling missing fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ParseConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the limits are usable together.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let zero = [
            ("slots", self.slots),
            ("capacity", self.capacity),
            ("max_kvp", self.max_kvp),
            ("max_depth", self.max_depth),
            ("max_body_len", self.max_body_len),
        ]
        .into_iter()
        .find(|(_, v)| *v == 0);
        if let Some((name, _)) = zero {
            return Err(ConfigError::Invalid(format!("{name} must be greater than 0")));
        }
        if self.capacity > self.slots {
            return Err(ConfigError::Invalid(format!(
                "capacity ({}) exceeds slots ({})",
                self.capacity, self.slots
            )));
        }
        Ok(())
    }
}
