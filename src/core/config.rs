//! Declarative logger configuration
//!
//! `LoggerConfig` can be deserialized from any serde format, validated, and
//! turned into a running [`Logger`]:
//!
//! ```
//! use rust_logx::{LoggerConfig, OutputFormat, SharedBuffer, Level};
//!
//! let config: LoggerConfig = serde_json::from_str(
//!     r#"{"level":"inf","format":"delimited","delimiter":" "}"#,
//! ).unwrap();
//! assert_eq!(config.level, Level::Info);
//! assert_eq!(config.format, OutputFormat::Delimited);
//!
//! let sink = SharedBuffer::new();
//! let logger = config.into_logger(sink.clone()).unwrap();
//! logger.info("configured", &[]);
//! logger.close();
//! assert!(sink.to_string_lossy().contains(" lvl=INF msg=\"configured\""));
//! ```

use super::{
    dispatch::DEFAULT_QUEUE_CAPACITY,
    error::{LoggerError, Result},
    formatter::Formatter,
    log_level::Level,
    logger::Logger,
};
use crate::formatters::{DelimitedFormatter, JsonFormatter};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Record encoding selected by a [`LoggerConfig`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One JSON object per line (default)
    ///
    /// Example: `{"time":"2025-01-08T10:30:45Z","lvl":"INF","msg":"Request processed"}`
    #[default]
    Json,

    /// `key="value"` tokens separated by the configured delimiter
    ///
    /// Example: `time=2025-01-08T10:30:45Z	lvl=INF	msg="Request processed"`
    Delimited,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub level: Level,
    pub queue_capacity: usize,
    pub format: OutputFormat,
    /// Token separator for [`OutputFormat::Delimited`]; must be ASCII
    pub delimiter: char,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: Level::Error,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            format: OutputFormat::Json,
            delimiter: '\t',
        }
    }
}

impl LoggerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.queue_capacity == 0 {
            return Err(LoggerError::config(
                "queue_capacity",
                "queue capacity must be at least 1",
            ));
        }
        if !self.delimiter.is_ascii() {
            return Err(LoggerError::config(
                "delimiter",
                format!("delimiter {:?} is not a single ASCII byte", self.delimiter),
            ));
        }
        Ok(())
    }

    /// Formatter described by `format` and `delimiter`
    pub fn formatter(&self) -> Result<Box<dyn Formatter>> {
        self.validate()?;
        Ok(match self.format {
            OutputFormat::Json => Box::new(JsonFormatter::new()),
            OutputFormat::Delimited => {
                Box::new(DelimitedFormatter::new().with_delimiter(self.delimiter as u8))
            }
        })
    }

    /// Validate and start a logger writing to `sink`
    pub fn into_logger<W: Write + Send + 'static>(self, sink: W) -> Result<Logger> {
        let formatter = self.formatter()?;
        Ok(Logger::from_parts(
            self.level.into(),
            self.queue_capacity,
            Box::new(sink),
            formatter,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::SharedBuffer;

    #[test]
    fn test_defaults() {
        let config = LoggerConfig::default();
        assert_eq!(config.level, Level::Error);
        assert_eq!(config.queue_capacity, 100_000);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.delimiter, '\t');
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: LoggerConfig = serde_json::from_str(r#"{"queue_capacity":16}"#).unwrap();
        assert_eq!(config.queue_capacity, 16);
        assert_eq!(config.level, Level::Error);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_unknown_level_rejected() {
        let result: std::result::Result<LoggerConfig, _> =
            serde_json::from_str(r#"{"level":"TRACE"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = LoggerConfig {
            queue_capacity: 0,
            ..LoggerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LoggerError::InvalidConfiguration { .. })
        ));

        let config = LoggerConfig {
            delimiter: '→',
            ..LoggerConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(config.into_logger(SharedBuffer::new()).is_err());
    }

    #[test]
    fn test_into_logger_uses_level_and_format() {
        let config = LoggerConfig {
            level: Level::Warn,
            format: OutputFormat::Delimited,
            delimiter: '|',
            ..LoggerConfig::default()
        };
        let sink = SharedBuffer::new();
        let logger = config.into_logger(sink.clone()).unwrap();

        logger.info("skipped", &[]);
        logger.warn("kept", &["k".into(), "v".into()]);
        logger.close();

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("|lvl=WRN|msg=\"kept\"|k=\"v\""));
    }
}
