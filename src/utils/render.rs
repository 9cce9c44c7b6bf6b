//! CLI output rendering
//!
//! Assembles the JSON envelope printed to stdout. The core returns the
//! extracted content verbatim; only this layer attempts a secondary JSON
//! parse of string content (providers are commonly prompted for JSON
//! output) and falls back to the raw string when that parse fails.

use crate::models::ProviderResult;
use serde_json::{json, Value};

/// Build the output envelope for one result
///
/// `token_usage` is included only when requested and reported; `raw` only
/// when verbose output is requested.
pub fn render_output(result: &ProviderResult, show_usage: bool, verbose: bool) -> Value {
    let mut output = json!({
        "content": reparse_content(&result.content),
    });

    if show_usage {
        if let Some(usage) = &result.usage {
            output["token_usage"] = json!(usage);
        }
    }

    if verbose {
        if let Some(raw) = &result.raw {
            output["raw"] = raw.clone();
        }
    }

    output
}

/// Build the error envelope printed when an invocation fails
pub fn render_error(error_type: &str, message: &str) -> Value {
    json!({
        "error": {
            "type": error_type,
            "message": message,
        }
    })
}

/// Re-parse string content as JSON when possible
fn reparse_content(content: &Value) -> Value {
    match content {
        Value::String(text) => {
            serde_json::from_str(text.trim()).unwrap_or_else(|_| content.clone())
        }
        other => other.clone(),
    }
}
