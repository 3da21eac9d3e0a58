//! Event schema types and loading.
//!
//! The schema is a JSON array of categories:
//!
//! ```json
//! [
//!   {
//!     "name": "onboarding",
//!     "events": [
//!       {
//!         "name": "view_welcome",
//!         "parameters": [{ "name": "screen_name", "value": "welcome" }]
//!       }
//!     ]
//!   }
//! ]
//! ```
//!
//! Only the shape is checked here. Naming and deduplication happen in
//! [`crate::resolve`].

use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::error::{Error, Result};

/// A named group of related analytics events (e.g. `"onboarding"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnalyticsCategory {
    /// Snake_case category name. Unique within a schema.
    pub name: String,

    /// Events in schema order.
    #[serde(default)]
    pub events: Vec<EventDef>,
}

/// A single trackable action within a category.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EventDef {
    /// Snake_case event name (e.g. `"view_welcome"`).
    pub name: String,

    /// Parameters in schema order. May repeat keys; the first one wins.
    #[serde(default)]
    pub parameters: Vec<ParamDef>,
}

/// One event parameter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ParamDef {
    /// Parameter key as sent to the analytics backend (e.g. `"screen_name"`).
    #[serde(rename = "name")]
    pub key: String,

    /// Predefined value. Empty or `"null"` means there is none.
    /// A JSON `null` or a missing value reads as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub value: String,
}

impl ParamDef {
    /// Whether this parameter carries a value worth hoisting into a constant.
    pub fn has_predefined_value(&self) -> bool {
        !self.value.is_empty() && self.value != "null"
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse schema text into categories, preserving schema order.
pub fn parse_schema(text: &str) -> Result<Vec<AnalyticsCategory>> {
    let categories: Vec<AnalyticsCategory> = serde_json::from_str(text)?;
    Ok(categories)
}

/// Load and parse a schema file from disk.
pub fn load_schema(path: &Path) -> Result<Vec<AnalyticsCategory>> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_schema(&content)
}
