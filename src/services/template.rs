//! Request-body template engine
//!
//! Compiles a descriptor's `request_format` tree into a tagged template once
//! at registry-load time, so instantiation is a single structural pass with
//! no string re-scanning. A scalar string leaf equal to "model" or "prompt"
//! is a placeholder; every other leaf (booleans, numbers, nested literal
//! objects) passes through verbatim with its JSON type preserved.

use serde_json::{Map, Value};

/// Marker string identifying the model placeholder
pub const MODEL_MARKER: &str = "model";

/// Marker string identifying the prompt placeholder
pub const PROMPT_MARKER: &str = "prompt";

/// Caller-supplied value a placeholder resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Model,
    Prompt,
}

/// Compiled request template
///
/// Substitution happens exactly once: the compiled tree never re-inspects
/// substituted values, so a caller-supplied string equal to "model" or
/// "prompt" is inserted as-is.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestTemplate {
    /// JSON object node; keys kept in source order
    Object(Vec<(String, RequestTemplate)>),
    /// JSON array node
    Array(Vec<RequestTemplate>),
    /// Leaf replaced by a caller value at build time
    Placeholder(Placeholder),
    /// Any other leaf, copied verbatim
    Literal(Value),
}

impl RequestTemplate {
    /// Compile a raw `request_format` value into a template tree
    pub fn compile(format: &Value) -> Self {
        match format {
            Value::Object(map) => RequestTemplate::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), Self::compile(value)))
                    .collect(),
            ),
            Value::Array(items) => {
                RequestTemplate::Array(items.iter().map(Self::compile).collect())
            }
            Value::String(s) if s == MODEL_MARKER => {
                RequestTemplate::Placeholder(Placeholder::Model)
            }
            Value::String(s) if s == PROMPT_MARKER => {
                RequestTemplate::Placeholder(Placeholder::Prompt)
            }
            other => RequestTemplate::Literal(other.clone()),
        }
    }

    /// Instantiate the template with caller-supplied values
    pub fn instantiate(&self, model: &str, prompt: &str) -> Value {
        match self {
            RequestTemplate::Object(entries) => {
                let mut map = Map::with_capacity(entries.len());
                for (key, template) in entries {
                    map.insert(key.clone(), template.instantiate(model, prompt));
                }
                Value::Object(map)
            }
            RequestTemplate::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|template| template.instantiate(model, prompt))
                    .collect(),
            ),
            RequestTemplate::Placeholder(Placeholder::Model) => {
                Value::String(model.to_string())
            }
            RequestTemplate::Placeholder(Placeholder::Prompt) => {
                Value::String(prompt.to_string())
            }
            RequestTemplate::Literal(value) => value.clone(),
        }
    }

    /// Whether any placeholder occurs in the tree
    pub fn has_placeholders(&self) -> bool {
        match self {
            RequestTemplate::Object(entries) => {
                entries.iter().any(|(_, t)| t.has_placeholders())
            }
            RequestTemplate::Array(items) => items.iter().any(Self::has_placeholders),
            RequestTemplate::Placeholder(_) => true,
            RequestTemplate::Literal(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_openai_shaped_round_trip() {
        let format = json!({
            "model": "model",
            "messages": [{"role": "user", "content": "prompt"}],
            "stream": false
        });

        let template = RequestTemplate::compile(&format);
        let body = template.instantiate("gpt-x", "hello");

        assert_eq!(
            body,
            json!({
                "model": "gpt-x",
                "messages": [{"role": "user", "content": "hello"}],
                "stream": false
            })
        );
    }

    #[test]
    fn test_non_placeholder_leaves_keep_type() {
        let format = json!({
            "model": "model",
            "max_tokens": 1024,
            "temperature": 0.5,
            "stream": false,
            "response_format": {"type": "json_object"},
            "stop": null
        });

        let body = RequestTemplate::compile(&format).instantiate("m", "p");

        assert_eq!(body["max_tokens"], json!(1024));
        assert_eq!(body["temperature"], json!(0.5));
        assert_eq!(body["stream"], json!(false));
        assert_eq!(body["response_format"], json!({"type": "json_object"}));
        assert_eq!(body["stop"], Value::Null);
    }

    #[test]
    fn test_substitution_is_single_pass() {
        // Caller values equal to the markers must be inserted as-is, never
        // treated as placeholders themselves.
        let format = json!({"model": "model", "prompt": "prompt"});
        let template = RequestTemplate::compile(&format);

        let body = template.instantiate("prompt", "model");
        assert_eq!(body, json!({"model": "prompt", "prompt": "model"}));

        let body = template.instantiate("model", "prompt");
        assert_eq!(body, json!({"model": "model", "prompt": "prompt"}));
    }

    #[test]
    fn test_empty_caller_strings() {
        let format = json!({"model": "model", "input": "prompt"});
        let body = RequestTemplate::compile(&format).instantiate("", "");
        assert_eq!(body, json!({"model": "", "input": ""}));
    }

    #[test]
    fn test_placeholders_in_nested_arrays() {
        let format = json!({
            "contents": [{"parts": [{"text": "prompt"}]}],
            "model": "model"
        });
        let body = RequestTemplate::compile(&format).instantiate("gemini-pro", "hi");
        assert_eq!(body["contents"][0]["parts"][0]["text"], json!("hi"));
        assert_eq!(body["model"], json!("gemini-pro"));
    }

    #[test]
    fn test_non_marker_strings_pass_through() {
        let format = json!({"role": "user", "mode": "models"});
        let body = RequestTemplate::compile(&format).instantiate("m", "p");
        assert_eq!(body, json!({"role": "user", "mode": "models"}));
    }

    #[test]
    fn test_has_placeholders() {
        let with = RequestTemplate::compile(&json!({"messages": [{"content": "prompt"}]}));
        assert!(with.has_placeholders());

        let without = RequestTemplate::compile(&json!({"stream": false}));
        assert!(!without.has_placeholders());
    }

    #[test]
    fn test_instantiation_is_repeatable() {
        let template = RequestTemplate::compile(&json!({"model": "model"}));
        let first = template.instantiate("a", "b");
        let second = template.instantiate("a", "b");
        assert_eq!(first, second);
    }
}
