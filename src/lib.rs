//! # rust_logx
//!
//! A structured, leveled logging core with a bounded asynchronous dispatch
//! queue.
//!
//! ## Features
//!
//! - **Cheap when filtered**: the level check is one atomic load, taken before
//!   anything is allocated
//! - **Non-blocking**: records are encoded on the caller's thread and handed to
//!   a background writer; a full queue drops (and counts) instead of waiting
//! - **Structured context**: alternating key/value pairs rendered as JSON or as
//!   delimited `key="value"` tokens
//! - **Live reconfiguration**: swap sink, formatter or level while other threads
//!   are logging
//! - **Graceful shutdown**: `close()` drains everything already queued
//!
//! ## Example
//!
//! ```
//! use rust_logx::prelude::*;
//!
//! let sink = SharedBuffer::new();
//! let logger = Logger::builder()
//!     .level(Level::Info)
//!     .output(sink.clone())
//!     .build();
//!
//! logger.info("context1", &["ip".into(), "0.0.0.0".into()]);
//! logger.close();
//!
//! assert!(sink
//!     .to_string_lossy()
//!     .contains(r#""lvl":"INF","msg":"context1","ctx":{"ip":"0.0.0.0"}"#));
//! ```

pub mod core;
pub mod formatters;
pub mod global;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        DispatchState, FieldBuilder, FieldValue, Formatter, Level, Logger, LoggerBuilder,
        LoggerConfig, LoggerError, LoggerMetrics, Message, OutputFormat, Result,
        DEFAULT_SHUTDOWN_TIMEOUT, LEVEL_DEBUG, LEVEL_ERROR, LEVEL_INFO, LEVEL_WARN,
    };
    pub use crate::formatters::{DelimitedFormatter, JsonFormatter};
    pub use crate::sinks::{ConsoleSink, FileSink, SharedBuffer};
}

pub use crate::core::{
    DispatchState, EncodedBuffer, FieldBuilder, FieldValue, Formatter, Level, Logger,
    LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, Message, OutputFormat, Result,
    DEFAULT_QUEUE_CAPACITY, DEFAULT_SHUTDOWN_TIMEOUT, LEVEL_DEBUG, LEVEL_ERROR, LEVEL_INFO,
    LEVEL_WARN,
};
pub use formatters::{DelimitedFormatter, JsonFormatter};
pub use global::default_logger;
pub use sinks::{ConsoleSink, FileSink, SharedBuffer};
