//! Log level definitions
//!
//! Levels are ordered by verbosity: lower numbers are less verbose. A logger
//! configured with threshold `t` emits a record at level `s` only when
//! `s <= t`. `Fatal` sits below everything and is never filtered.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[repr(u32)]
pub enum Level {
    /// Internal level used only by `Logger::fatal`
    Fatal = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
}

/// Numeric threshold that lets only errors through
pub const LEVEL_ERROR: u32 = Level::Error as u32;
/// Numeric threshold that lets warnings and errors through
pub const LEVEL_WARN: u32 = Level::Warn as u32;
/// Numeric threshold that lets info, warnings and errors through
pub const LEVEL_INFO: u32 = Level::Info as u32;
/// Numeric threshold that lets everything through
pub const LEVEL_DEBUG: u32 = Level::Debug as u32;

impl Level {
    /// The levels accepted from the outside world, least verbose first
    pub const PUBLIC: [Level; 4] = [Level::Error, Level::Warn, Level::Info, Level::Debug];

    /// Short tag written into every record
    pub fn code(&self) -> &'static str {
        match self {
            Level::Fatal => "FAT",
            Level::Error => "ERR",
            Level::Warn => "WRN",
            Level::Info => "INF",
            Level::Debug => "DBG",
        }
    }

    /// Numeric value compared against the logger threshold
    #[inline]
    pub fn as_u32(self) -> u32 {
        self as u32
    }

    /// Map a numeric ordinal back to a level
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Level::Fatal),
            1 => Some(Level::Error),
            2 => Some(Level::Warn),
            3 => Some(Level::Info),
            4 => Some(Level::Debug),
            _ => None,
        }
    }

    /// Whether a record at this level passes the given threshold
    #[inline]
    pub fn passes(self, threshold: u32) -> bool {
        self == Level::Fatal || self.as_u32() <= threshold
    }
}

impl From<Level> for u32 {
    fn from(level: Level) -> Self {
        level.as_u32()
    }
}

impl From<Level> for String {
    fn from(level: Level) -> Self {
        level.code().to_string()
    }
}

impl TryFrom<String> for Level {
    type Error = String;

    fn try_from(value: String) -> Result<Self, String> {
        value.parse()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ERR" => Ok(Level::Error),
            "WRN" => Ok(Level::Warn),
            "INF" => Ok(Level::Info),
            "DBG" => Ok(Level::Debug),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}
