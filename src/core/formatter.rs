//! Formatter trait for turning messages into bytes

use super::{error::Result, message::Message};
use std::io::Write;

/// Line terminator closing every record
pub const NEW_LINE: u8 = b'\n';

/// `time` rendering shared by the built-in formatters (RFC 3339, seconds, `Z`)
pub(crate) const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Serializes a [`Message`] into a byte stream.
///
/// Implementations must write exactly one record terminated by a single
/// `\n`, and must not keep any reference to the message once `encode`
/// returns. The logger always passes an owned, pooled buffer as `out` and
/// hands the sink the finished record in one write, so formatters may write
/// in as many pieces as they like. On error the buffer is discarded.
///
/// # Example
///
/// ```
/// use rust_logx::core::{Formatter, Message, Result};
/// use std::io::Write;
///
/// struct TextOnly;
///
/// impl Formatter for TextOnly {
///     fn encode(&self, out: &mut dyn Write, message: &Message) -> Result<()> {
///         writeln!(out, "{} {}", message.level(), message.text())?;
///         Ok(())
///     }
/// }
/// ```
pub trait Formatter: Send + Sync {
    fn encode(&self, out: &mut dyn Write, message: &Message) -> Result<()>;
}

impl<F: Formatter + ?Sized> Formatter for Box<F> {
    fn encode(&self, out: &mut dyn Write, message: &Message) -> Result<()> {
        (**self).encode(out, message)
    }
}

impl<F: Formatter + ?Sized> Formatter for std::sync::Arc<F> {
    fn encode(&self, out: &mut dyn Write, message: &Message) -> Result<()> {
        (**self).encode(out, message)
    }
}
