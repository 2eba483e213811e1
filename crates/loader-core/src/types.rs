use crate::CssLoaderError;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A theme as reported by the backend before enrichment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawThemeRecord {
    pub name: String,
    pub author: String,
    pub version: String,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Stylesheet file name mapped to the UI surfaces it is injected into.
    #[serde(default)]
    pub inject: BTreeMap<String, Vec<String>>,
}

impl RawThemeRecord {
    pub fn new(
        name: impl Into<String>,
        author: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            author: author.into(),
            version: version.into(),
            target: None,
            description: None,
            enabled: false,
            dependencies: Vec::new(),
            inject: BTreeMap::new(),
        }
    }

    pub fn with_inject<I, S>(mut self, file: impl Into<String>, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inject
            .insert(file.into(), targets.into_iter().map(Into::into).collect());
        self
    }
}

/// A remote, not yet installed theme listed in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseThemeEntry {
    pub id: String,
    pub name: String,
    pub author: String,
    pub version: String,
    pub target: String,
    pub preview_image: String,
    pub last_changed: DateTime<Utc>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Parses the untyped installed-theme payload delivered by the backend bridge.
///
/// The whole batch is rejected at the first element that does not match the
/// record shape.
pub fn parse_theme_records(values: Vec<Value>) -> Result<Vec<RawThemeRecord>, CssLoaderError> {
    parse_batch(values)
}

/// Parses the untyped catalog payload delivered by the backend bridge.
pub fn parse_catalog_entries(values: Vec<Value>) -> Result<Vec<BrowseThemeEntry>, CssLoaderError> {
    parse_batch(values)
}

fn parse_batch<T: DeserializeOwned>(values: Vec<Value>) -> Result<Vec<T>, CssLoaderError> {
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value(value)
                .map_err(|e| CssLoaderError::malformed(index, e.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_theme_records() {
        let records = parse_theme_records(vec![
            json!({"name": "Neon", "author": "x", "version": "1.0"}),
            json!({
                "name": "Clean Keyboard",
                "author": "suchmememanyskill",
                "version": "2.1",
                "target": "Keyboard",
                "inject": {"shared.css": ["SP", "QuickAccess"]},
                "enabled": true
            }),
        ])
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0], RawThemeRecord::new("Neon", "x", "1.0"));
        assert_eq!(records[1].target.as_deref(), Some("Keyboard"));
        assert!(records[1].enabled);
        assert_eq!(records[1].inject["shared.css"], vec!["SP", "QuickAccess"]);
    }

    #[test]
    fn test_parse_rejects_whole_batch() {
        let err = parse_theme_records(vec![
            json!({"name": "Neon", "author": "x", "version": "1.0"}),
            json!({"name": "Broken", "version": "1.0"}),
        ])
        .unwrap_err();

        match err {
            CssLoaderError::MalformedRecord { index, reason } => {
                assert_eq!(index, 1);
                assert!(reason.contains("author"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_catalog_entries() {
        let entries = parse_catalog_entries(vec![json!({
            "id": "abc",
            "name": "Neon",
            "author": "x",
            "version": "1.0",
            "target": "System-Wide",
            "preview_image": "https://example.com/neon.jpg",
            "last_changed": "2022-07-23T19:19:52Z"
        })])
        .unwrap();

        assert_eq!(entries[0].id, "abc");
        assert_eq!(entries[0].last_changed.to_rfc3339(), "2022-07-23T19:19:52+00:00");
        assert!(entries[0].description.is_none());
    }

    #[test]
    fn test_parse_catalog_bad_timestamp() {
        let err = parse_catalog_entries(vec![json!({
            "id": "abc",
            "name": "Neon",
            "author": "x",
            "version": "1.0",
            "target": "System-Wide",
            "preview_image": "",
            "last_changed": "yesterday"
        })])
        .unwrap_err();

        assert!(matches!(err, CssLoaderError::MalformedRecord { index: 0, .. }));
    }
}
