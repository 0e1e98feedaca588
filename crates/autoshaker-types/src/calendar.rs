//! In-world calendar: seasons and dates.
//!
//! The eligibility window for every dedupe set and counter is one in-world
//! day. The host owns the calendar and hands the current [`WorldDate`] to the
//! core each tick and at day end; the core only reads it for the bloom
//! predicate and the summary prefix.
//!
//! A year is four seasons of [`DAYS_PER_SEASON`] days each.

use serde::{Deserialize, Serialize};

/// Number of days in each season.
pub const DAYS_PER_SEASON: u32 = 28;

/// Errors that can occur when building or parsing calendar values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// A season name did not match any known season.
    #[error("unknown season: {0}")]
    UnknownSeason(String),

    /// Day of season outside `1..=DAYS_PER_SEASON`.
    #[error("day {0} is outside the 28-day season")]
    DayOutOfRange(u32),

    /// Year must be at least 1.
    #[error("year must be at least 1")]
    InvalidYear,

    /// Advancing the calendar overflowed the year counter.
    #[error("calendar overflow")]
    Overflow,
}

/// One of the four seasons of the in-world year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    /// First season of the year.
    Spring,
    /// Second season.
    Summer,
    /// Third season.
    Fall,
    /// Last season of the year.
    Winter,
}

impl Season {
    /// All seasons in calendar order.
    pub const ALL: [Self; 4] = [Self::Spring, Self::Summer, Self::Fall, Self::Winter];

    /// The season that follows this one, wrapping from winter to spring.
    pub const fn next(self) -> Self {
        match self {
            Self::Spring => Self::Summer,
            Self::Summer => Self::Fall,
            Self::Fall => Self::Winter,
            Self::Winter => Self::Spring,
        }
    }

    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Fall => "Fall",
            Self::Winter => "Winter",
        }
    }
}

impl core::fmt::Display for Season {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl core::str::FromStr for Season {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "spring" => Ok(Self::Spring),
            "summer" => Ok(Self::Summer),
            "fall" | "autumn" => Ok(Self::Fall),
            "winter" => Ok(Self::Winter),
            other => Err(CalendarError::UnknownSeason(other.to_owned())),
        }
    }
}

/// A calendar date in the host world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WorldDate {
    /// Year, starting at 1.
    year: u32,
    /// Current season.
    season: Season,
    /// Day of the season, `1..=DAYS_PER_SEASON`.
    day: u32,
}

impl WorldDate {
    /// The first day of the first year.
    pub const START: Self = Self {
        year: 1,
        season: Season::Spring,
        day: 1,
    };

    /// Create a date, validating the day and year.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::DayOutOfRange`] or
    /// [`CalendarError::InvalidYear`] for out-of-range components.
    pub fn new(year: u32, season: Season, day: u32) -> Result<Self, CalendarError> {
        if year == 0 {
            return Err(CalendarError::InvalidYear);
        }
        if day == 0 || day > DAYS_PER_SEASON {
            return Err(CalendarError::DayOutOfRange(day));
        }
        Ok(Self { year, season, day })
    }

    /// Year, starting at 1.
    pub const fn year(&self) -> u32 {
        self.year
    }

    /// Current season.
    pub const fn season(&self) -> Season {
        self.season
    }

    /// Day of the season.
    pub const fn day(&self) -> u32 {
        self.day
    }

    /// The following day, rolling over seasons and years.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::Overflow`] if the year counter would exceed
    /// `u32::MAX`.
    pub fn next_day(self) -> Result<Self, CalendarError> {
        if self.day < DAYS_PER_SEASON {
            let day = self.day.checked_add(1).ok_or(CalendarError::Overflow)?;
            return Ok(Self { day, ..self });
        }
        let season = self.season.next();
        let year = if season == Season::Spring {
            self.year.checked_add(1).ok_or(CalendarError::Overflow)?
        } else {
            self.year
        };
        Ok(Self {
            year,
            season,
            day: 1,
        })
    }
}

impl Default for WorldDate {
    fn default() -> Self {
        Self::START
    }
}

impl core::fmt::Display for WorldDate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {}, Year {}", self.season, self.day, self.year)
    }
}
