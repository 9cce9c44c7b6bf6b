//! Response extraction engine
//!
//! Walks declared paths through an arbitrary nested JSON response to pull
//! out the normalized content value and optional token-usage counters.
//! Content-path failure is fatal; usage paths are resolved independently
//! and tolerate absence (providers report different counter subsets).

use crate::config::descriptor::{display_path, PathStep, UsagePaths};
use crate::config::registry::Provider;
use crate::models::UsageMap;
use crate::utils::error::{AppError, AppResult};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Path resolution failure, one variant per mismatch kind
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// Key step applied to an object that lacks the key
    #[error("key '{key}' not found")]
    MissingKey { key: String },

    /// Key step applied to a non-object value
    #[error("expected an object for key '{key}', found {found}")]
    NotAnObject { key: String, found: &'static str },

    /// Index step out of range
    #[error("index {index} out of range (array length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// Index step applied to a non-array value
    #[error("expected an array for index {index}, found {found}")]
    NotAnArray { index: usize, found: &'static str },
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Resolve a path against a JSON value, one step at a time
pub fn resolve_path<'a>(value: &'a Value, path: &[PathStep]) -> Result<&'a Value, PathError> {
    let mut current = value;
    for step in path {
        current = match (step, current) {
            (PathStep::Key(key), Value::Object(map)) => {
                map.get(key).ok_or_else(|| PathError::MissingKey {
                    key: key.clone(),
                })?
            }
            (PathStep::Key(key), other) => {
                return Err(PathError::NotAnObject {
                    key: key.clone(),
                    found: kind_of(other),
                })
            }
            (PathStep::Index(index), Value::Array(items)) => {
                items.get(*index).ok_or(PathError::IndexOutOfRange {
                    index: *index,
                    len: items.len(),
                })?
            }
            (PathStep::Index(index), other) => {
                return Err(PathError::NotAnArray {
                    index: *index,
                    found: kind_of(other),
                })
            }
        };
    }
    Ok(current)
}

/// Resolve one usage entry to an integer counter
///
/// Returns None when any involved path is missing or non-numeric; the
/// caller omits the field rather than failing the extraction.
fn resolve_usage(response: &Value, paths: &UsagePaths) -> Option<u64> {
    match paths {
        UsagePaths::Single(path) => resolve_path(response, path).ok()?.as_u64(),
        UsagePaths::Sum(parts) => {
            let mut total = 0u64;
            for path in parts.values() {
                total += resolve_path(response, path).ok()?.as_u64()?;
            }
            Some(total)
        }
    }
}

/// Top-level keys of a response, for extraction error messages
fn top_level_keys(response: &Value) -> String {
    match response {
        Value::Object(map) => map.keys().cloned().collect::<Vec<_>>().join(", "),
        other => format!("(non-object response: {})", kind_of(other)),
    }
}

/// Extract the normalized content and usage counters from a raw response
pub fn extract(
    provider_name: &str,
    provider: &Provider,
    response: &Value,
) -> AppResult<(Value, Option<UsageMap>)> {
    let parsing = &provider.descriptor.response_parsing;

    let content = resolve_path(response, &parsing.content_path)
        .map_err(|source| AppError::Extraction {
            provider: provider_name.to_string(),
            path: display_path(&parsing.content_path),
            response_keys: top_level_keys(response),
            source,
        })?
        .clone();

    let mut usage = UsageMap::new();
    for (field, paths) in &parsing.usage_mapping {
        match resolve_usage(response, paths) {
            Some(count) => {
                usage.insert(field.clone(), count);
            }
            None => {
                debug!(field = %field, "usage field not present in response, omitting");
            }
        }
    }

    let usage = if usage.is_empty() { None } else { Some(usage) };
    Ok((content, usage))
}
