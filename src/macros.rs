//! Logging macros with inline key/value context.
//!
//! Each macro takes a logger, a message and an alternating list of keys and
//! values. The level is checked first, so the context arguments are neither
//! evaluated nor converted when the record would be filtered out.
//!
//! # Examples
//!
//! ```
//! use rust_logx::prelude::*;
//! use rust_logx::info;
//!
//! let logger = Logger::new();
//! logger.set_level(Level::Info);
//!
//! // Message only
//! info!(logger, "Server started");
//!
//! // With context
//! let port = 8080;
//! info!(logger, "Server listening", "port", port, "tls", true);
//! logger.close();
//! ```

/// Log at an explicit level.
///
/// # Examples
///
/// ```
/// # use rust_logx::prelude::*;
/// # let logger = Logger::new();
/// use rust_logx::log;
/// log!(logger, Level::Error, "Simple message");
/// log!(logger, Level::Error, "Request failed", "status", 500);
/// # logger.close();
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $msg:expr $(, $ctx:expr)* $(,)?) => {{
        let logger = &$logger;
        let level: $crate::Level = $level;
        if logger.enabled(level) {
            logger.log(level, $msg, &[$($crate::FieldValue::from($ctx)),*]);
        }
    }};
}

/// Log a debug-level record.
///
/// # Examples
///
/// ```
/// # use rust_logx::prelude::*;
/// # let logger = Logger::new();
/// # logger.set_level(Level::Debug);
/// use rust_logx::debug;
/// debug!(logger, "Cache state", "entries", 10u64);
/// # logger.close();
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Debug, $($arg)+)
    };
}

/// Log an info-level record.
///
/// # Examples
///
/// ```
/// # use rust_logx::prelude::*;
/// # let logger = Logger::new();
/// use rust_logx::info;
/// info!(logger, "Processing batch", "items", 100);
/// # logger.close();
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Info, $($arg)+)
    };
}

/// Log a warning-level record.
///
/// # Examples
///
/// ```
/// # use rust_logx::prelude::*;
/// # let logger = Logger::new();
/// use rust_logx::warn;
/// warn!(logger, "Retrying", "attempt", 3, "of", 5);
/// # logger.close();
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Warn, $($arg)+)
    };
}

/// Log an error-level record.
///
/// # Examples
///
/// ```
/// # use rust_logx::prelude::*;
/// # let logger = Logger::new();
/// use rust_logx::error;
/// let err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
/// error!(logger, "Open failed", "path", "/tmp/x", "err", FieldValue::error(&err));
/// # logger.close();
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Error, $($arg)+)
    };
}

/// Log a fatal record, drain the logger and exit the process with status 1.
///
/// # Examples
///
/// ```no_run
/// # use rust_logx::prelude::*;
/// # let logger = Logger::new();
/// use rust_logx::fatal;
/// fatal!(logger, "Unrecoverable state", "code", 7);
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $msg:expr $(, $ctx:expr)* $(,)?) => {
        $logger.fatal($msg, &[$($crate::FieldValue::from($ctx)),*])
    };
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use std::cell::Cell;

    fn capture(level: Level) -> (Logger, SharedBuffer) {
        let sink = SharedBuffer::new();
        let logger = Logger::builder().level(level).output(sink.clone()).build();
        (logger, sink)
    }

    #[test]
    fn test_macros_emit_context() {
        let (logger, sink) = capture(Level::Debug);

        crate::info!(logger, "context1", "ip", "0.0.0.0");
        crate::warn!(logger, "numbers", "n", 3, "ok", true,);
        crate::debug!(&logger, "plain");
        crate::error!(logger, "odd", "lonely");
        logger.close();

        let lines = sink.lines();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains(r#""lvl":"INF","msg":"context1","ctx":{"ip":"0.0.0.0"}"#));
        assert!(lines[1].contains(r#""ctx":{"n":3,"ok":true}"#));
        assert!(lines[2].contains(r#""lvl":"DBG","msg":"plain"}"#));
        assert!(lines[3].contains(r#""ctx":{"lonely":null}"#));
    }

    #[test]
    fn test_filtered_macro_skips_arguments() {
        let (logger, sink) = capture(Level::Error);
        let evaluated = Cell::new(0);
        let expensive = || {
            evaluated.set(evaluated.get() + 1);
            "value"
        };

        crate::debug!(logger, "hidden", "key", expensive());
        crate::error!(logger, "shown", "key", expensive());
        logger.close();

        assert_eq!(evaluated.get(), 1);
        assert_eq!(sink.lines().len(), 1);
    }
}
