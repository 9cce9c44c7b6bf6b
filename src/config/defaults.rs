//! Default configuration and setup installer
//!
//! Embeds a starter provider configuration and installs it to the user's
//! config directory on `llmcall setup`. Never overwrites an existing file.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

/// Starter provider configuration installed by `llmcall setup`
pub const DEFAULT_CONFIG: &str = r#"{
  "openai": {
    "api_url": "https://api.openai.com/v1/chat/completions",
    "auth_header": "Authorization",
    "auth_prefix": "Bearer",
    "api_key_env": "OPENAI_API_KEY",
    "content_type": "application/json",
    "request_format": {
      "model": "model",
      "messages": [{"role": "user", "content": "prompt"}],
      "stream": false
    },
    "response_parsing": {
      "content_path": ["choices", 0, "message", "content"],
      "usage_mapping": {
        "prompt_tokens": ["usage", "prompt_tokens"],
        "completion_tokens": ["usage", "completion_tokens"],
        "total_tokens": ["usage", "total_tokens"]
      }
    }
  },
  "anthropic": {
    "api_url": "https://api.anthropic.com/v1/messages",
    "auth_header": "x-api-key",
    "auth_prefix": "",
    "api_key_env": "ANTHROPIC_API_KEY",
    "content_type": "application/json",
    "api_version_header": "anthropic-version",
    "api_version": "2023-06-01",
    "request_format": {
      "model": "model",
      "max_tokens": 1024,
      "messages": [{"role": "user", "content": "prompt"}]
    },
    "response_parsing": {
      "content_path": ["content", 0, "text"],
      "usage_mapping": {
        "prompt_tokens": ["usage", "input_tokens"],
        "completion_tokens": ["usage", "output_tokens"],
        "total_tokens": {
          "input": ["usage", "input_tokens"],
          "output": ["usage", "output_tokens"]
        }
      }
    }
  },
  "mistral": {
    "api_url": "https://api.mistral.ai/v1/chat/completions",
    "auth_header": "Authorization",
    "auth_prefix": "Bearer",
    "api_key_env": "MISTRAL_API_KEY",
    "content_type": "application/json",
    "request_format": {
      "model": "model",
      "messages": [{"role": "user", "content": "prompt"}],
      "stream": false
    },
    "response_parsing": {
      "content_path": ["choices", 0, "message", "content"],
      "usage_mapping": {
        "prompt_tokens": ["usage", "prompt_tokens"],
        "completion_tokens": ["usage", "completion_tokens"],
        "total_tokens": ["usage", "total_tokens"]
      }
    }
  },
  "ollama": {
    "api_url": "http://localhost:11434/api/generate",
    "content_type": "application/json",
    "request_format": {
      "model": "model",
      "prompt": "prompt",
      "stream": false
    },
    "response_parsing": {
      "content_path": ["response"],
      "usage_mapping": {
        "prompt_tokens": ["prompt_eval_count"],
        "completion_tokens": ["eval_count"]
      }
    }
  }
}
"#;

/// Path the default configuration is installed to
pub fn default_config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("llmcall").join("config.json"))
}

/// Install the default configuration file if it does not exist yet
///
/// Returns the config path and whether a file was written.
pub fn install_default_config() -> Result<(PathBuf, bool)> {
    let config_path = default_config_path()?;

    if config_path.exists() {
        info!("Config file already exists: {:?}", config_path);
        return Ok((config_path, false));
    }

    let config_dir = config_path
        .parent()
        .context("Config path has no parent directory")?;
    std::fs::create_dir_all(config_dir)
        .with_context(|| format!("Failed to create config directory: {:?}", config_dir))?;

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

    info!("Installed default config: {:?}", config_path);
    Ok((config_path, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::registry::ProviderRegistry;

    #[test]
    fn test_default_config_is_a_valid_registry() {
        let registry = ProviderRegistry::from_json(DEFAULT_CONFIG).unwrap();
        assert_eq!(
            registry.provider_names(),
            vec!["anthropic", "mistral", "ollama", "openai"]
        );
    }

    #[test]
    fn test_default_ollama_has_no_auth() {
        let registry = ProviderRegistry::from_json(DEFAULT_CONFIG).unwrap();
        let ollama = registry.get("ollama").unwrap();
        assert!(ollama.descriptor.auth_header.is_none());
        assert!(ollama.descriptor.api_key_env.is_none());
    }

    #[test]
    fn test_default_anthropic_has_version_header() {
        let registry = ProviderRegistry::from_json(DEFAULT_CONFIG).unwrap();
        let anthropic = registry.get("anthropic").unwrap();
        assert_eq!(
            anthropic.descriptor.api_version_header.as_deref(),
            Some("anthropic-version")
        );
        assert_eq!(anthropic.descriptor.api_version.as_deref(), Some("2023-06-01"));
    }
}
