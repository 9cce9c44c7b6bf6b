//! Provider descriptor types
//!
//! Declarative per-provider schema deserialized from the configuration file:
//! endpoint, auth scheme, request-body template, and response paths.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One step of a response path: a mapping key or a sequence index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathStep {
    /// Index into a JSON array
    Index(usize),
    /// Key lookup in a JSON object
    Key(String),
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::Key(k) => write!(f, "{}", k),
            PathStep::Index(i) => write!(f, "{}", i),
        }
    }
}

/// Render a path as `a.0.b` for error messages and logs
pub fn display_path(path: &[PathStep]) -> String {
    path.iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(".")
}

/// Location of a logical usage counter inside the response JSON
///
/// Providers either report a counter directly (single path) or only its
/// parts, in which case the descriptor lists the paths to sum (e.g.
/// `total_tokens` from input + output counts).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UsagePaths {
    /// Counter lives at one path
    Single(Vec<PathStep>),
    /// Counter is the sum of the values at several named paths
    Sum(BTreeMap<String, Vec<PathStep>>),
}

/// Response parsing rules for a provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseParsing {
    /// Path to the primary textual answer (required, resolution failure is fatal)
    pub content_path: Vec<PathStep>,

    /// Logical usage-field name to response path; fields vary by provider
    /// and missing paths are tolerated
    #[serde(default)]
    pub usage_mapping: BTreeMap<String, UsagePaths>,
}

/// Provider descriptor
///
/// Immutable once loaded by the registry; no code branches on the provider
/// name, both engines are generic over this value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderDescriptor {
    /// Absolute endpoint URL
    pub api_url: String,

    /// Header name carrying credentials; absent means no auth at all
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_header: Option<String>,

    /// Scheme token prepended to the credential (may be empty)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_prefix: Option<String>,

    /// Environment variable holding the credential
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,

    /// Content-Type header value (default: "application/json")
    #[serde(default = "default_content_type")]
    pub content_type: String,

    /// Optional static header pair, added only when both are present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version_header: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    /// Request-body template tree; scalar string leaves equal to "model" or
    /// "prompt" are placeholders, every other leaf is copied verbatim
    pub request_format: serde_json::Value,

    /// Response parsing rules
    pub response_parsing: ResponseParsing,
}

fn default_content_type() -> String {
    "application/json".to_string()
}
