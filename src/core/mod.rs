//! Core logger types and traits

pub mod config;
pub mod dispatch;
pub mod error;
pub mod field_value;
pub mod fields;
pub mod formatter;
pub mod log_level;
pub mod logger;
pub mod message;
pub mod metrics;
pub mod pool;

pub use config::{LoggerConfig, OutputFormat};
pub use dispatch::{DispatchState, EncodedBuffer, DEFAULT_QUEUE_CAPACITY};
pub use error::{LoggerError, Result};
pub use field_value::FieldValue;
pub use fields::FieldBuilder;
pub use formatter::Formatter;
pub use log_level::{Level, LEVEL_DEBUG, LEVEL_ERROR, LEVEL_INFO, LEVEL_WARN};
pub use logger::{Logger, LoggerBuilder, DEFAULT_SHUTDOWN_TIMEOUT};
pub use message::Message;
pub use metrics::LoggerMetrics;
pub use pool::{Pool, Pooled, Recycle};
