//! Week key - canonical Monday-anchored date identifying a pairing cycle
//!
//! All "this week" queries (pool eligibility, match de-duplication, sit-out
//! fairness) join on this key, so it is normalized in exactly one place.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical Monday (UTC) of an ISO week
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct WeekKey(NaiveDate);

impl WeekKey {
    /// Week key for the current UTC week
    pub fn current() -> Self {
        Self::for_datetime(Utc::now())
    }

    /// Week key for the week containing the given instant
    pub fn for_datetime(at: DateTime<Utc>) -> Self {
        Self::for_date(at.date_naive())
    }

    /// Week key for the week containing the given date
    pub fn for_date(date: NaiveDate) -> Self {
        let monday = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
        Self(monday)
    }

    /// The anchored Monday date
    #[inline]
    pub const fn as_date(self) -> NaiveDate {
        self.0
    }

    /// Week key of the following week
    pub fn next(self) -> Self {
        Self(self.0 + Duration::weeks(1))
    }
}

/// Error when parsing a WeekKey from string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WeekKeyParseError {
    #[error("invalid week key date format (expected YYYY-MM-DD)")]
    InvalidFormat,
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // NaiveDate renders ISO-8601 (YYYY-MM-DD)
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for WeekKey {
    type Err = WeekKeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date = s
            .parse::<NaiveDate>()
            .map_err(|_| WeekKeyParseError::InvalidFormat)?;
        // Normalize: any date in the week maps to its Monday
        Ok(Self::for_date(date))
    }
}
