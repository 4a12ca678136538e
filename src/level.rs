//! Severity levels.
//!
//! Lower numeric value = more severe. The numeric value doubles as the index
//! into a logger's dispatch table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Severity of a log record, ordered from most to least severe.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Fatal = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
    Log = 5,
    Trace = 6,
}

impl Level {
    /// Number of severity levels (size of a dispatch table).
    pub const COUNT: usize = 7;

    /// Every level, most severe first.
    pub const ALL: [Level; Level::COUNT] = [
        Level::Fatal,
        Level::Error,
        Level::Warn,
        Level::Info,
        Level::Debug,
        Level::Log,
        Level::Trace,
    ];

    /// Dispatch table slot for this level.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Numeric value handed to sinks (0..=6).
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Fatal => "FATAL",
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Log => "LOG",
            Level::Trace => "TRACE",
        }
    }

    /// Three-letter tag used by the line renderers.
    pub const fn prefix(self) -> &'static str {
        match self {
            Level::Fatal => "FTL",
            Level::Error => "ERR",
            Level::Warn => "WRN",
            Level::Info => "INF",
            Level::Debug => "DBG",
            Level::Log => "LOG",
            Level::Trace => "TRC",
        }
    }

    /// Returns true if a route with threshold `self` lets `level` through.
    pub fn admits(self, level: Level) -> bool {
        level <= self
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidLevel(s.to_string()))
    }
}

impl TryFrom<u8> for Level {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Error> {
        Level::ALL
            .get(usize::from(value))
            .copied()
            .ok_or_else(|| Error::InvalidLevel(value.to_string()))
    }
}
