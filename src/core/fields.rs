//! Chained key/value context for a single record

use super::field_value::FieldValue;
use super::log_level::Level;
use super::logger::Logger;

/// Accumulates context pairs and emits them with the next leveled call.
///
/// Created by [`Logger::with_field`], [`Logger::with_fields`] or
/// [`Logger::with_error`]. Pairs keep their insertion order; a repeated key
/// is kept as well and resolved by the formatter.
#[must_use = "a FieldBuilder does nothing until a level method is called"]
#[derive(Debug)]
pub struct FieldBuilder<'a> {
    logger: &'a Logger,
    context: Vec<FieldValue>,
}

impl<'a> FieldBuilder<'a> {
    pub(crate) fn new(logger: &'a Logger) -> Self {
        Self {
            logger,
            context: Vec::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<FieldValue>, value: impl Into<FieldValue>) -> Self {
        self.context.push(key.into());
        self.context.push(value.into());
        self
    }

    pub fn with_fields<K, V, I>(mut self, fields: I) -> Self
    where
        K: Into<FieldValue>,
        V: Into<FieldValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in fields {
            self.context.push(key.into());
            self.context.push(value.into());
        }
        self
    }

    /// `None` is recorded as an explicit null
    pub fn with_error<E: std::error::Error + ?Sized>(
        mut self,
        key: impl Into<FieldValue>,
        err: Option<&E>,
    ) -> Self {
        self.context.push(key.into());
        self.context
            .push(err.map_or(FieldValue::Null, FieldValue::error));
        self
    }

    /// Context collected so far, as alternating keys and values
    pub fn context(&self) -> &[FieldValue] {
        &self.context
    }

    pub fn log(self, level: Level, message: &str) {
        self.logger.log(level, message, &self.context);
    }

    pub fn error(self, message: &str) {
        self.log(Level::Error, message);
    }

    pub fn warn(self, message: &str) {
        self.log(Level::Warn, message);
    }

    pub fn info(self, message: &str) {
        self.log(Level::Info, message);
    }

    pub fn debug(self, message: &str) {
        self.log(Level::Debug, message);
    }

    pub fn fatal(self, message: &str) -> ! {
        self.logger.fatal(message, &self.context)
    }
}
