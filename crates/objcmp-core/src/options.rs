use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Caller-supplied comparison policy
///
/// Deserializes from any serde format with every field optional, so a
/// configuration file only needs to name what it changes:
///
/// ```
/// use objcmp_core::ComparisonOptions;
///
/// let options: ComparisonOptions =
///     serde_json::from_str(r#"{ "ignore_names": ["updated_at"] }"#).unwrap();
/// assert!(options.ignores("updated_at"));
/// assert!(!options.include_deprecated);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonOptions {
    /// Compare fields marked deprecated as well
    pub include_deprecated: bool,
    /// Field names never compared, whatever record they appear on
    pub ignore_names: BTreeSet<String>,
}

impl ComparisonOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether deprecated fields take part in the comparison
    pub fn with_deprecated(mut self, include: bool) -> Self {
        self.include_deprecated = include;
        self
    }

    /// Add field names to the ignore list
    pub fn ignoring<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_names.extend(names.into_iter().map(Into::into));
        self
    }

    /// Check whether a field name is on the ignore list
    pub fn ignores(&self, name: &str) -> bool {
        self.ignore_names.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ComparisonOptions::new();
        assert!(!options.include_deprecated);
        assert!(options.ignore_names.is_empty());
    }

    #[test]
    fn test_builder() {
        let options = ComparisonOptions::new()
            .with_deprecated(true)
            .ignoring(["a", "b"])
            .ignoring(vec!["c".to_string()]);

        assert!(options.include_deprecated);
        assert!(options.ignores("a"));
        assert!(options.ignores("c"));
        assert!(!options.ignores("d"));
    }

    #[test]
    fn test_deserialize_partial_document() {
        let options: ComparisonOptions =
            serde_json::from_str(r#"{ "include_deprecated": true }"#).unwrap();
        assert!(options.include_deprecated);
        assert!(options.ignore_names.is_empty());
    }

    #[test]
    fn test_serialize_round_trip() {
        let options = ComparisonOptions::new().ignoring(["id"]);
        let json = serde_json::to_string(&options).unwrap();
        let back: ComparisonOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(options, back);
    }
}
