//! String-encoded hierarchical resource addresses.
//!
//! A path names a location in the config/project/environment/resource
//! hierarchy. A leading `/` makes the path absolute; a `//config` prefix
//! additionally pins it to a named config. The segment `...` is a
//! placeholder for "the current default at this depth" and is resolved by
//! [`crate::completer::replace_defaults`].

use std::fmt;

/// Placeholder segment standing for the current default at its depth.
pub const DEFAULT_SEGMENT: &str = "...";

/// A path to a resource.
///
/// The raw string is the single source of truth; every accessor derives
/// its answer from it. Malformed input is never rejected and parses to
/// whatever the segment split yields.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResourcePath(String);

impl ResourcePath {
    /// Builds an absolute path from an optional config key and segments.
    pub fn new_abs(config: Option<&str>, keys: &[&str]) -> Self {
        let root = match config {
            Some(config) => format!("//{}/", config),
            None => "/".to_string(),
        };
        ResourcePath(root + &keys.join("/"))
    }

    /// The raw string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the path starts at the hierarchy root.
    pub fn is_abs(&self) -> bool {
        self.0.starts_with('/')
    }

    /// The config key, if the path is config-qualified.
    ///
    /// The key is the segment between the leading `//` and the next `/`,
    /// so `"//"` and `"///"` both carry the empty config key.
    pub fn config(&self) -> Option<&str> {
        if !self.0.starts_with("//") {
            return None;
        }
        self.0.split('/').nth(2)
    }

    /// The ordered segment keys, excluding any config qualifier.
    ///
    /// The bare root `/` has no keys, but a trailing separator always
    /// contributes an empty key: `"///"` has keys `[""]`. Callers that
    /// treat that lone empty key as the root compensate at their level.
    pub fn keys(&self) -> Vec<&str> {
        let parts: Vec<&str> = self.0.split('/').collect();
        if self.config().is_some() {
            return parts[3..].to_vec();
        }
        if self.is_abs() {
            if self.0.len() > 1 {
                return parts[1..].to_vec();
            }
            return Vec::new();
        }
        parts
    }

    /// Number of keys.
    pub fn depth(&self) -> usize {
        self.keys().len()
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourcePath {
    fn from(raw: &str) -> Self {
        ResourcePath(raw.to_string())
    }
}

impl From<String> for ResourcePath {
    fn from(raw: String) -> Self {
        ResourcePath(raw)
    }
}
