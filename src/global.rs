//! Process-wide default logger
//!
//! The default logger is created on first use (JSON to stdout, `ERR`
//! threshold) and lives for the rest of the process. Statics are never
//! dropped, so call [`close`] before exiting to drain what is still queued.
//!
//! ```no_run
//! use rust_logx::global;
//!
//! global::set_level(rust_logx::LEVEL_INFO);
//! global::info("service started", &["port".into(), 8080.into()]);
//! global::close();
//! ```

use crate::core::{FieldValue, Formatter, Logger};
use std::io::Write;
use std::sync::OnceLock;

static DEFAULT_LOGGER: OnceLock<Logger> = OnceLock::new();

/// The shared default logger, initialised exactly once
pub fn default_logger() -> &'static Logger {
    DEFAULT_LOGGER.get_or_init(Logger::new)
}

pub fn set_output<W: Write + Send + 'static>(sink: W) {
    default_logger().set_output(sink);
}

pub fn set_formatter<F: Formatter + 'static>(formatter: F) {
    default_logger().set_formatter(formatter);
}

pub fn set_level(level: impl Into<u32>) {
    default_logger().set_level(level);
}

pub fn get_level() -> u32 {
    default_logger().get_level()
}

/// Drain and stop the default logger; later calls are dropped
pub fn close() {
    default_logger().close();
}

pub fn error(message: &str, context: &[FieldValue]) {
    default_logger().error(message, context);
}

pub fn warn(message: &str, context: &[FieldValue]) {
    default_logger().warn(message, context);
}

pub fn info(message: &str, context: &[FieldValue]) {
    default_logger().info(message, context);
}

pub fn debug(message: &str, context: &[FieldValue]) {
    default_logger().debug(message, context);
}

pub fn fatal(message: &str, context: &[FieldValue]) -> ! {
    default_logger().fatal(message, context)
}
