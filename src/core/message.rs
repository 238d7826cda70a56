//! Pooled log message

use super::field_value::FieldValue;
use super::log_level::Level;
use super::pool::Recycle;
use chrono::{DateTime, Utc};

/// Number of records a logger keeps on its free list
pub const MESSAGE_POOL_SIZE: usize = 1024;

static NULL: FieldValue = FieldValue::Null;

/// A single log record on its way to a formatter.
///
/// Loggers hand these out from a pool; the fields are set at emission time
/// and wiped by [`Recycle::reset`] once the record has been encoded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Message {
    timestamp: DateTime<Utc>,
    level: &'static str,
    text: String,
    context: Vec<FieldValue>,
}

impl Message {
    /// Build a standalone (non-pooled) message stamped with the current time
    pub fn new(level: Level, text: &str, context: &[FieldValue]) -> Self {
        let mut message = Self::default();
        message.populate(level, text, context);
        message
    }

    /// Fill the record for one log call.
    ///
    /// An odd-length context is padded with [`FieldValue::Null`] so every key
    /// has a value.
    pub(crate) fn populate(&mut self, level: Level, text: &str, context: &[FieldValue]) {
        self.timestamp = Utc::now();
        self.level = level.code();
        self.text.push_str(text);
        self.context.extend_from_slice(context);
        if self.context.len() % 2 != 0 {
            self.context.push(FieldValue::Null);
        }
    }

    /// Replace the emission time (mainly useful for deterministic output)
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn timestamp(&self) -> &DateTime<Utc> {
        &self.timestamp
    }

    pub fn level(&self) -> &'static str {
        self.level
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Raw alternating key/value entries
    pub fn context(&self) -> &[FieldValue] {
        &self.context
    }

    /// Key/value pairs in call-site order
    pub fn pairs(&self) -> impl Iterator<Item = (&FieldValue, &FieldValue)> + '_ {
        self.context.chunks(2).map(|pair| match pair {
            [key, value] => (key, value),
            [key] => (key, &NULL),
            _ => unreachable!("chunks(2) yields one or two entries"),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.level.is_empty() && self.text.is_empty() && self.context.is_empty()
    }
}

impl Recycle for Message {
    fn reset(&mut self) {
        self.timestamp = DateTime::default();
        self.level = "";
        self.text.clear();
        self.context.clear();
    }
}
