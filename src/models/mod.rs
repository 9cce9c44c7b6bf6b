//! Data models module
//!
//! Defines the caller-facing request and normalized result structures

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Token-usage counters keyed by logical field name
///
/// Providers report different subsets (not all report `total_tokens`);
/// missing fields are simply absent from the map.
pub type UsageMap = BTreeMap<String, u64>;

/// Caller input: which provider/model to call and with what prompt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProduceRequest {
    /// Registered provider name
    pub provider: String,
    /// Model name passed through to the provider
    pub model: String,
    /// Prompt text
    pub prompt: String,
}

impl ProduceRequest {
    pub fn new(
        provider: impl Into<String>,
        model: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
            prompt: prompt.into(),
        }
    }
}

/// Normalized result of one provider call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderResult {
    /// Value found at the descriptor's content path, returned as-is
    pub content: serde_json::Value,

    /// Token-usage counters, absent when the provider reported none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<UsageMap>,

    /// Full unmodified response, populated only on request (verbose output)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<serde_json::Value>,
}
