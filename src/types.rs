//! Common types used throughout pagewalk
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

// ============================================================================
// Query Parameters
// ============================================================================

/// Parameters of one listing request.
///
/// Holds whatever the endpoint needs to identify the collection
/// (`part`, `playlistId`, `mine`, ...) plus an optional identifier list.
/// The pager never touches `params`; it only replaces `ids` per batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    /// Named request parameters
    #[serde(default)]
    pub params: BTreeMap<String, String>,
    /// Identifiers to look up, sent as the `id` parameter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<String>>,
}

impl QueryParams {
    /// Create empty query parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named parameter
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Set the identifier list
    #[must_use]
    pub fn ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    /// Get a named parameter
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Number of identifiers, if an identifier list is present
    pub fn id_count(&self) -> Option<usize> {
        self.ids.as_ref().map(Vec::len)
    }

    /// Split off the identifier list, leaving the named parameters
    pub fn take_ids(mut self) -> (Self, Option<Vec<String>>) {
        let ids = self.ids.take();
        (self, ids)
    }

    /// Copy of these parameters with `ids` replaced
    #[must_use]
    pub fn with_ids(&self, ids: Vec<String>) -> Self {
        Self {
            params: self.params.clone(),
            ids: Some(ids),
        }
    }
}

// ============================================================================
// Backoff Type
// ============================================================================

/// Backoff strategy for transport-level retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params_builder() {
        let params = QueryParams::new()
            .param("part", "snippet")
            .param("mine", "true")
            .ids(["a", "b"]);

        assert_eq!(params.get("part"), Some("snippet"));
        assert_eq!(params.get("mine"), Some("true"));
        assert_eq!(params.get("missing"), None);
        assert_eq!(params.id_count(), Some(2));
    }

    #[test]
    fn test_query_params_take_and_replace_ids() {
        let params = QueryParams::new().param("part", "id").ids(["a", "b", "c"]);

        let (base, ids) = params.take_ids();
        assert!(base.ids.is_none());
        assert_eq!(ids, Some(vec!["a".into(), "b".into(), "c".into()]));

        let batch = base.with_ids(vec!["b".into()]);
        assert_eq!(batch.get("part"), Some("id"));
        assert_eq!(batch.ids, Some(vec!["b".to_string()]));
    }

    #[test]
    fn test_query_params_deserialize() {
        let params: QueryParams =
            serde_json::from_str(r#"{"params": {"playlistId": "UU1"}}"#).unwrap();
        assert_eq!(params.get("playlistId"), Some("UU1"));
        assert!(params.ids.is_none());
    }

    #[test]
    fn test_backoff_type_serde() {
        let backoff: BackoffType = serde_yaml::from_str("linear").unwrap();
        assert_eq!(backoff, BackoffType::Linear);
        assert_eq!(BackoffType::default(), BackoffType::Exponential);
    }
}
