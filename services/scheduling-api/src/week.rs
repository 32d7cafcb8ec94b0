//! Monday-based week arithmetic for the calendar.

use chrono::{Datelike, Duration, NaiveDate};

/// A calendar week, identified by its Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Week {
    start: NaiveDate,
}

impl Week {
    /// The week containing `date`. Weeks run Monday through Sunday, so a
    /// Sunday still belongs to the week that began six days earlier.
    pub fn containing(date: NaiveDate) -> Self {
        let offset = date.weekday().num_days_from_monday() as i64;
        Week {
            start: date - Duration::days(offset),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.start + Duration::days(6)
    }

    /// The seven days of the week in order, Monday first.
    pub fn days(&self) -> [NaiveDate; 7] {
        std::array::from_fn(|i| self.start + Duration::days(i as i64))
    }

    pub fn prev(&self) -> Self {
        Week {
            start: self.start - Duration::days(7),
        }
    }

    pub fn next(&self) -> Self {
        Week {
            start: self.start + Duration::days(7),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end()
    }

    /// Header label, e.g. `Jan 6, 2025 - Jan 12, 2025`.
    pub fn range_label(&self) -> String {
        format!(
            "{} - {}",
            self.start.format("%b %-d, %Y"),
            self.end().format("%b %-d, %Y")
        )
    }
}

/// Whether `date` is the reference day, usually today. Split out so callers
/// pin "today" once per request instead of re-reading the clock.
pub fn is_current_day(date: NaiveDate, today: NaiveDate) -> bool {
    date == today
}
