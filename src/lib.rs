//! llmcall library
//!
//! Maps one `{provider, model, prompt}` request shape onto otherwise
//! incompatible LLM provider HTTP APIs via declarative descriptors:
//! a template-substitution engine builds the provider request body and a
//! path-based extraction engine normalizes the response.

pub mod config;
pub mod models;
pub mod services;
pub mod utils;

// Re-export common types
pub use config::{ProviderDescriptor, ProviderRegistry};
pub use models::{ProduceRequest, ProviderResult, UsageMap};
pub use services::LlmClient;
pub use utils::error::{AppError, AppResult};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get version information
pub fn version_info() -> String {
    format!("{} v{}", NAME, VERSION)
}
