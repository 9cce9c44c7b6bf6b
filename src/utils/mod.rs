//! Utilities module
//!
//! Contains error handling and CLI output rendering

pub mod error;
pub mod render;
