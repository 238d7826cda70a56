//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A formatter could not serialize a message
    #[error("Encoding error ({format_type}): {message}")]
    Encoding {
        format_type: String,
        message: String,
    },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Writer error (generic)
    #[error("Writer error: {0}")]
    Writer(String),
}

impl LoggerError {
    /// Create an encoding error for the given formatter
    pub fn encoding(format_type: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::Encoding {
            format_type: format_type.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LoggerError::Writer(msg.into())
    }

    /// Whether the error was raised while serializing a message
    pub fn is_encoding(&self) -> bool {
        matches!(self, LoggerError::Encoding { .. })
    }
}
