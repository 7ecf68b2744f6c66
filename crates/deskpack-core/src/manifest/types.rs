//! Web-app manifest structures.
//!
//! Only the members this crate reads are typed; everything else is kept in
//! `extra` so a persisted manifest round-trips without losing data.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub icons: Vec<IconDescriptor>,
    /// Deprecated navigation whitelist (`[{ "url": pattern }]`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mjs_access_whitelist: Vec<AccessWhitelistEntry>,
    /// Additional navigation scope patterns.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mjs_extended_scope: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry of a manifest's `icons` list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IconDescriptor {
    pub src: String,
    /// Whitespace separated `WxH` tokens.
    #[serde(default)]
    pub sizes: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Marks a bundled fallback icon rather than one declared by the manifest author.
    #[serde(default, rename = "default", skip_serializing_if = "std::ops::Not::not")]
    pub is_default: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessWhitelistEntry {
    pub url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl IconDescriptor {
    pub fn new(src: impl Into<String>, sizes: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            sizes: sizes.into(),
            ..Self::default()
        }
    }

    /// Size tokens, lowercased.
    pub fn size_tokens(&self) -> impl Iterator<Item = String> + '_ {
        self.sizes.split_whitespace().map(str::to_ascii_lowercase)
    }
}

impl Manifest {
    /// Name used for the packaged app: `short_name`, else `name`.
    pub fn app_name(&self) -> Option<&str> {
        fn non_blank(v: &Option<String>) -> Option<&str> {
            v.as_deref().map(str::trim).filter(|s| !s.is_empty())
        }
        non_blank(&self.short_name).or_else(|| non_blank(&self.name))
    }
}
