//! Completion percentage, a whole number from 0 to 100.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Share of completed items, rounded to the nearest whole percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Percentage(u8);

impl Percentage {
    pub const ZERO: Self = Self(0);
    pub const HUNDRED: Self = Self(100);

    /// `round(part / whole * 100)` with halves rounded up; zero when `whole` is zero.
    ///
    /// Integer arithmetic only, so there is no NaN path. `part` above `whole`
    /// counts as complete.
    pub fn of(part: usize, whole: usize) -> Self {
        if whole == 0 {
            return Self::ZERO;
        }
        let part = part.min(whole) as u64;
        let whole = whole as u64;
        Self(((part * 200 + whole) / (whole * 2)) as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn is_complete(&self) -> bool {
        *self == Self::HUNDRED
    }
}

impl TryFrom<u8> for Percentage {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > 100 {
            return Err(ValidationError::invalid_format(
                "completion_percentage",
                format!("{} is above 100", value),
            ));
        }
        Ok(Self(value))
    }
}

impl From<Percentage> for u8 {
    fn from(p: Percentage) -> Self {
        p.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
