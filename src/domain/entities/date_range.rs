use chrono::NaiveDate;
use serde::Serialize;

use crate::app_error::{AppError, AppResult};

/// Inclusive calendar range `[start, end]` used by every report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Rejects ranges whose start falls after their end.
    pub fn new(start: NaiveDate, end: NaiveDate) -> AppResult<Self> {
        if start > end {
            return Err(AppError::InvalidInput(format!(
                "start date {start} is after end date {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Parse `YYYY-MM-DD` bounds.
    pub fn parse(start: &str, end: &str) -> AppResult<Self> {
        Self::new(parse_day(start, "start")?, parse_day(end, "end")?)
    }

    /// Rejects ranges covering more than `max_days` calendar days.
    pub fn within_days(self, max_days: u64) -> AppResult<Self> {
        let days = self.num_days() as u64;
        if days > max_days {
            return Err(AppError::InvalidInput(format!(
                "range covers {days} days, at most {max_days} are allowed"
            )));
        }
        Ok(self)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Number of calendar days in the range, both ends included.
    pub fn num_days(&self) -> usize {
        ((self.end - self.start).num_days() + 1) as usize
    }

    /// Distance between the bounds in days (0 for a single-day range).
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Position of `day` in the range, if it falls inside it.
    pub fn index_of(&self, day: NaiveDate) -> Option<usize> {
        if self.contains(day) {
            Some((day - self.start).num_days() as usize)
        } else {
            None
        }
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        self.start.iter_days().take(self.num_days())
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Parse one `YYYY-MM-DD` bound; `field` names it in the error message.
pub fn parse_day(raw: &str, field: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        AppError::InvalidInput(format!("{field} must be a date in YYYY-MM-DD format"))
    })
}
