//! Season value object and the calendar-to-season resolver.

use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// One of the four fixed buckets that partition maintenance tasks.
///
/// Serialized with the capitalized names the backend uses in paths and bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    /// All seasons in calendar order starting from spring.
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    /// Maps a zero-indexed month (January = 0) to its season.
    ///
    /// Mar-May is spring, Jun-Aug summer, Sep-Nov fall, Dec-Feb winter.
    /// Values past 11 wrap modulo 12.
    pub fn from_month0(month0: u32) -> Self {
        match month0 % 12 {
            2..=4 => Season::Spring,
            5..=7 => Season::Summer,
            8..=10 => Season::Fall,
            _ => Season::Winter,
        }
    }

    /// Resolves the season for any calendar date or datetime.
    pub fn of<D: Datelike>(date: &D) -> Self {
        Self::from_month0(date.month0())
    }

    /// Resolves the season for the current local time.
    pub fn current() -> Self {
        Self::of(&Local::now())
    }

    /// Capitalized name, as used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        }
    }

    /// Lowercase key used by summary mappings.
    pub fn key(&self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Fall => "fall",
            Season::Winter => "winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = ValidationError;

    /// Accepts any casing; "autumn" is an alias for fall.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spring" => Ok(Season::Spring),
            "summer" => Ok(Season::Summer),
            "fall" | "autumn" => Ok(Season::Fall),
            "winter" => Ok(Season::Winter),
            _ => Err(ValidationError::invalid_format(
                "season",
                format!("'{}' is not one of Spring, Summer, Fall, Winter", s),
            )),
        }
    }
}
