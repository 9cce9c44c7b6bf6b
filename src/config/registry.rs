//! Provider registry
//!
//! Loads the provider configuration file into validated, immutable
//! descriptors with their request templates compiled once, and exposes
//! lookup by provider name.

use crate::config::descriptor::ProviderDescriptor;
use crate::services::template::RequestTemplate;
use crate::utils::error::{AppError, AppResult};
use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// A validated registry entry: the descriptor plus its compiled template
#[derive(Debug, Clone)]
pub struct Provider {
    /// Declarative schema as loaded from configuration
    pub descriptor: ProviderDescriptor,
    /// Request template compiled from `descriptor.request_format`
    pub template: RequestTemplate,
}

/// Mapping from provider name to validated descriptor
#[derive(Debug, Clone)]
pub struct ProviderRegistry {
    providers: BTreeMap<String, Provider>,
}

impl ProviderRegistry {
    /// Load the registry from a JSON configuration file
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading provider configuration from: {:?}", path);

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let registry = Self::from_json(&content)?;
        debug!("Loaded {} providers", registry.providers.len());
        Ok(registry)
    }

    /// Load the registry from default locations
    ///
    /// Searches in order:
    /// 1. ~/.config/llmcall/config.json
    /// 2. ./llmcall.json
    ///
    /// Returns an error if no configuration file is found.
    pub fn load_default() -> Result<Self> {
        if let Some(home) = dirs::home_dir() {
            let config_path = home.join(".config").join("llmcall").join("config.json");
            if config_path.exists() {
                return Self::load(&config_path);
            }
        }

        let local_path = Path::new("llmcall.json");
        if local_path.exists() {
            return Self::load(local_path);
        }

        anyhow::bail!(
            "Configuration file not found. Run `llmcall setup` to install the \
             default configuration at ~/.config/llmcall/config.json, or place \
             an llmcall.json in the current directory."
        )
    }

    /// Parse and validate a registry from a JSON string
    pub fn from_json(content: &str) -> Result<Self> {
        let raw: BTreeMap<String, Value> =
            serde_json::from_str(content).context("Failed to parse config JSON")?;

        if raw.is_empty() {
            anyhow::bail!("At least one provider must be configured");
        }

        let mut providers = BTreeMap::new();
        for (name, value) in raw {
            let descriptor: ProviderDescriptor = serde_json::from_value(value)
                .with_context(|| format!("Invalid descriptor for provider '{}'", name))?;

            validate_descriptor(&name, &descriptor)?;

            let template = RequestTemplate::compile(&descriptor.request_format);
            if !template.has_placeholders() {
                warn!(provider = %name, "request_format contains no placeholders; model and prompt will be ignored");
            }

            providers.insert(name, Provider { descriptor, template });
        }

        Ok(Self { providers })
    }

    /// Look up a provider by name
    pub fn get(&self, name: &str) -> AppResult<&Provider> {
        self.providers
            .get(name)
            .ok_or_else(|| AppError::UnknownProvider {
                name: name.to_string(),
                available: self.provider_names().join(", "),
            })
    }

    /// Registered provider names, sorted
    pub fn provider_names(&self) -> Vec<String> {
        self.providers.keys().cloned().collect()
    }

    /// Number of registered providers
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

/// Validate a single descriptor at load time
fn validate_descriptor(name: &str, descriptor: &ProviderDescriptor) -> Result<()> {
    if !descriptor.api_url.starts_with("http") {
        anyhow::bail!(
            "Invalid api_url for provider '{}': {} (must start with 'http')",
            name,
            descriptor.api_url
        );
    }

    if descriptor.response_parsing.content_path.is_empty() {
        anyhow::bail!(
            "Provider '{}' must declare a non-empty response_parsing.content_path",
            name
        );
    }

    if descriptor.auth_header.is_some() && descriptor.api_key_env.is_none() {
        anyhow::bail!(
            "Provider '{}' declares auth_header but no api_key_env to read the credential from",
            name
        );
    }

    Ok(())
}
