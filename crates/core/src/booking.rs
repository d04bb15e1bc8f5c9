//! Date range accepted by the reservation form.

use chrono::{Days, Duration, Local, NaiveDate};

/// Number of days after today that can still be booked.
pub const DEFAULT_WINDOW_DAYS: u32 = 2;

/// Inclusive range of bookable play dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingWindow {
    first: NaiveDate,
    last: NaiveDate,
}

impl BookingWindow {
    /// Window from `today` through `today + days`, capped at the last representable date.
    pub fn starting(today: NaiveDate, days: u32) -> Self {
        let last = today
            .checked_add_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MAX);
        Self { first: today, last }
    }

    /// Window anchored on the local calendar date.
    pub fn from_today(days: u32) -> Self {
        Self::starting(Local::now().date_naive(), days)
    }

    /// Earliest bookable date.
    pub fn first(&self) -> NaiveDate {
        self.first
    }

    /// Latest bookable date.
    pub fn last(&self) -> NaiveDate {
        self.last
    }

    /// Whether `date` may be booked.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first && date <= self.last
    }

    /// Pull `date` back inside the window.
    pub fn clamp(&self, date: NaiveDate) -> NaiveDate {
        date.clamp(self.first, self.last)
    }

    /// Move `date` by `delta` days, stopping at the window edges.
    pub fn step(&self, date: NaiveDate, delta: i64) -> NaiveDate {
        let moved = date
            .checked_add_signed(Duration::days(delta))
            .unwrap_or(date);
        self.clamp(moved)
    }
}
