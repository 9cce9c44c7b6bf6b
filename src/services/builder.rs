//! Request builder service
//!
//! Instantiates a provider's request template with the caller's model and
//! prompt, and assembles the HTTP headers (content type, credential header
//! resolved from the environment, optional static version header).

use crate::config::registry::Provider;
use crate::utils::error::{AppError, AppResult};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// A ready-to-send request: JSON body plus HTTP headers
#[derive(Debug, Clone)]
pub struct BuiltRequest {
    pub body: Value,
    pub headers: HashMap<String, String>,
}

/// Build the provider-specific request for a caller's model and prompt
pub fn build_request(
    provider_name: &str,
    provider: &Provider,
    model: &str,
    prompt: &str,
) -> AppResult<BuiltRequest> {
    debug!(provider = %provider_name, model = %model, "building provider request");

    let body = provider.template.instantiate(model, prompt);
    let headers = build_headers(provider_name, provider)?;

    Ok(BuiltRequest { body, headers })
}

/// Assemble the header map for a provider
///
/// A descriptor without `auth_header` builds no auth header and performs no
/// environment lookup at all.
fn build_headers(provider_name: &str, provider: &Provider) -> AppResult<HashMap<String, String>> {
    let descriptor = &provider.descriptor;
    let mut headers = HashMap::new();

    headers.insert("Content-Type".to_string(), descriptor.content_type.clone());

    if let Some(auth_header) = &descriptor.auth_header {
        // Validated at registry load: auth_header implies api_key_env.
        let var = descriptor
            .api_key_env
            .as_deref()
            .unwrap_or_default()
            .to_string();

        let credential = match std::env::var(&var) {
            Ok(value) if !value.is_empty() => value,
            _ => {
                return Err(AppError::MissingApiKey {
                    provider: provider_name.to_string(),
                    var,
                })
            }
        };

        headers.insert(auth_header.clone(), auth_value(descriptor.auth_prefix.as_deref(), &credential));
    }

    if let (Some(header), Some(version)) =
        (&descriptor.api_version_header, &descriptor.api_version)
    {
        headers.insert(header.clone(), version.clone());
    }

    Ok(headers)
}

/// Join the scheme prefix and the credential
///
/// A non-empty prefix is separated from the credential by a single space;
/// an empty or absent prefix means the raw credential is used.
fn auth_value(prefix: Option<&str>, credential: &str) -> String {
    match prefix {
        Some(p) if !p.is_empty() => format!("{} {}", p, credential),
        _ => credential.to_string(),
    }
}
