//! Configuration management module
//!
//! Provider descriptors, the validated registry, and the default
//! configuration installer

pub mod defaults;
pub mod descriptor;
pub mod registry;

pub use descriptor::{PathStep, ProviderDescriptor, ResponseParsing, UsagePaths};
pub use registry::{Provider, ProviderRegistry};
