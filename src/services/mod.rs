//! Service layer module
//!
//! Contains the request template engine, request builder, response
//! extractor, and HTTP dispatch client

pub mod builder;
pub mod client;
pub mod extractor;
pub mod template;

pub use builder::{build_request, BuiltRequest};
pub use client::LlmClient;
pub use extractor::{extract, resolve_path, PathError};
pub use template::RequestTemplate;
