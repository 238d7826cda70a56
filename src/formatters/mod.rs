//! Formatter implementations

pub mod delimited;
pub mod json;

pub use delimited::DelimitedFormatter;
pub use json::JsonFormatter;

// Re-export the trait for convenience
pub use crate::core::Formatter;
