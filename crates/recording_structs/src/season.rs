//! Season buckets derived from recording dates.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// Coarse season bucket for a recording, derived from the month of its date.
///
/// Month buckets follow the northern-hemisphere convention used by the
/// dataset: Dec/Jan/Feb are winter, and so on in three-month blocks.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumCount,
)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    /// Derives the season from a recording date string.
    ///
    /// The date is expected in `YYYY-MM-DD` form; only the month segment is
    /// inspected. Returns `None` when no valid month (1-12) can be
    /// extracted, including the API's `00` placeholder for unknown months.
    #[must_use]
    pub fn from_date(date: &str) -> Option<Self> {
        let month: u32 = date.split('-').nth(1)?.parse().ok()?;

        match month {
            12 | 1 | 2 => Some(Self::Winter),
            3..=5 => Some(Self::Spring),
            6..=8 => Some(Self::Summer),
            9..=11 => Some(Self::Fall),
            _ => None,
        }
    }

    /// Returns the canonical string representation for this season.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Winter => "Winter",
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Fall => "Fall",
        }
    }

    /// Returns an iterator over all seasons in calendar order.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error type for season parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSeasonError {
    /// The invalid input string.
    pub input: String,
}

impl fmt::Display for ParseSeasonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid season: '{}'", self.input)
    }
}

impl core::error::Error for ParseSeasonError {}

impl FromStr for Season {
    type Err = ParseSeasonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "winter" => Ok(Self::Winter),
            "spring" => Ok(Self::Spring),
            "summer" => Ok(Self::Summer),
            "fall" | "autumn" => Ok(Self::Fall),
            _ => Err(ParseSeasonError {
                input: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winter_date() {
        assert_eq!(Season::from_date("2020-02-15"), Some(Season::Winter));
        assert_eq!(Season::from_date("2019-12-01"), Some(Season::Winter));
    }

    #[test]
    fn test_summer_date() {
        assert_eq!(Season::from_date("2020-07-01"), Some(Season::Summer));
    }

    #[test]
    fn test_spring_and_fall_dates() {
        assert_eq!(Season::from_date("2021-04-30"), Some(Season::Spring));
        assert_eq!(Season::from_date("2021-10-09"), Some(Season::Fall));
    }

    #[test]
    fn test_unknown_month_placeholder() {
        // xeno-canto uses 00 for unknown month
        assert_eq!(Season::from_date("2020-00-00"), None);
    }

    #[test]
    fn test_malformed_dates() {
        assert_eq!(Season::from_date("2020"), None);
        assert_eq!(Season::from_date(""), None);
        assert_eq!(Season::from_date("not a date"), None);
        assert_eq!(Season::from_date("2020-13-01"), None);
    }

    #[test]
    fn test_parse_round_trip() {
        for season in Season::all() {
            assert_eq!(season.as_str().parse::<Season>(), Ok(season));
        }
    }
}
