//! Flag-making options.
//!
//! Two axes control how member names become flag names:
//!
//! - **Flattening**: namespaced names (`network.tcp.readtimeout`) or only the
//!   leaf's own segment (`readtimeout`). Flattened names must be globally
//!   unique.
//! - **Tag key**: which field attribute supplies renames. With the default
//!   key `serde`, `#[serde(rename = "label")]` renames a member to `label`.
//!
//! Options can come from code, from [`FlagMaker::builder()`](crate::FlagMaker::builder)
//! or from a TOML table:
//!
//! ```toml
//! flatten = true
//! tag_key = "flag"
//! ```

use serde::{Deserialize, Serialize};

use crate::error::FlagError;

/// Attribute key consulted for renames when no other key is selected.
pub const DEFAULT_TAG_KEY: &str = "serde";

/// `#[flag(rename = "...")]` applies whatever the selected tag key is.
pub const FLAG_TAG_KEY: &str = "flag";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Use each leaf's own segment as its flag name.
    pub flatten: bool,
    /// Attribute key whose `rename` supplies name segments.
    pub tag_key: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            flatten: false,
            tag_key: DEFAULT_TAG_KEY.to_string(),
        }
    }
}

impl Options {
    /// Parse options from a TOML document. Missing keys keep their defaults.
    pub fn from_toml(source: &str) -> Result<Self, FlagError> {
        Ok(toml::from_str(source)?)
    }
}
