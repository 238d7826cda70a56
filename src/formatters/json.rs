//! Structured JSON formatter
//!
//! Writes one object per line:
//!
//! ```text
//! {"time":"2025-01-08T10:30:45Z","lvl":"INF","msg":"Request processed","ctx":{"ip":"0.0.0.0"}}
//! ```
//!
//! `ctx` is omitted when the record carries no context. Duplicate keys within
//! one record keep the last value.

use crate::core::formatter::{NEW_LINE, TIME_FORMAT};
use crate::core::{Formatter, LoggerError, Message, Result};
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::io::Write;

#[derive(Serialize)]
struct JsonRecord<'a> {
    #[serde(serialize_with = "serialize_time")]
    time: &'a DateTime<Utc>,
    lvl: &'a str,
    msg: &'a str,
    // Map, not a streamed sequence: a repeated key must keep its last value.
    // An empty map does not allocate.
    #[serde(skip_serializing_if = "serde_json::Map::is_empty")]
    ctx: serde_json::Map<String, serde_json::Value>,
}

fn serialize_time<S: Serializer>(
    time: &&DateTime<Utc>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(&time.format(TIME_FORMAT))
}

/// JSON lines formatter (the default)
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }

    fn context_map(message: &Message) -> Result<serde_json::Map<String, serde_json::Value>> {
        let mut ctx = serde_json::Map::new();
        for (key, value) in message.pairs() {
            let key = key.coerce().into_owned();
            let json = value.to_json_value().ok_or_else(|| {
                LoggerError::encoding(
                    "json",
                    format!("value for key '{}' has no JSON representation: {}", key, value),
                )
            })?;
            ctx.insert(key, json);
        }
        Ok(ctx)
    }
}

impl Formatter for JsonFormatter {
    fn encode(&self, out: &mut dyn Write, message: &Message) -> Result<()> {
        let record = JsonRecord {
            time: message.timestamp(),
            lvl: message.level(),
            msg: message.text(),
            ctx: Self::context_map(message)?,
        };

        serde_json::to_writer(&mut *out, &record)
            .map_err(|e| LoggerError::encoding("json", e.to_string()))?;
        out.write_all(&[NEW_LINE])?;
        Ok(())
    }
}
