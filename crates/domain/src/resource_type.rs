//! Resource type identifiers.
//!
//! A resource type is the key under which a schema is registered. It is
//! derived from an endpoint path by singularizing the relevant segment
//! (`/servers/` -> `server`).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a resource type, used as the schema registry key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceType(String);

impl ResourceType {
    /// Creates a resource type from an already-singular name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Creates a resource type from a plural path segment.
    #[must_use]
    pub fn from_segment(segment: &str) -> Self {
        Self(singularize(segment))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Returns the singular form of a plural path segment.
///
/// `ies` becomes `y`, a single trailing `s` is dropped (`ss` is kept),
/// anything else is returned unchanged.
#[must_use]
pub fn singularize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{stem}y");
        }
    }
    if word.ends_with("ss") {
        return word.to_string();
    }
    match word.strip_suffix('s') {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => word.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singularize_plain_plural() {
        assert_eq!(singularize("servers"), "server");
        assert_eq!(singularize("sessions"), "session");
        assert_eq!(singularize("services"), "service");
        assert_eq!(singularize("monitors"), "monitor");
        assert_eq!(singularize("filters"), "filter");
    }

    #[test]
    fn test_singularize_ies() {
        assert_eq!(singularize("policies"), "policy");
    }

    #[test]
    fn test_singularize_leaves_other_words() {
        assert_eq!(singularize("access"), "access");
        assert_eq!(singularize("maxscale"), "maxscale");
        assert_eq!(singularize("s"), "s");
    }

    #[test]
    fn test_from_segment() {
        assert_eq!(ResourceType::from_segment("servers").as_str(), "server");
        assert_eq!(ResourceType::from_segment("servers").to_string(), "server");
    }
}
