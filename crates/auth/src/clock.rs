use chrono::{NaiveDate, Utc};

/// Source of "today" for derived claim fields (age).
///
/// Injectable so tests can pin the date instead of depending on wall time.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall-clock implementation (UTC calendar date).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}
