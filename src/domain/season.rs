use chrono::{Datelike, Local, NaiveDate};
use std::fmt;

/// Month in which a new season starts
const SEASON_START_MONTH: u32 = 10;

/// NBA season identified by the calendar year it starts in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Season {
    start_year: i32,
}

impl Season {
    pub fn starting_in(start_year: i32) -> Self {
        Self { start_year }
    }

    /// Season in progress on the given date
    pub fn for_date(date: NaiveDate) -> Self {
        let year = date.year();
        if date.month() < SEASON_START_MONTH {
            Self::starting_in(year - 1)
        } else {
            Self::starting_in(year)
        }
    }

    pub fn current() -> Self {
        Self::for_date(Local::now().date_naive())
    }

    pub fn previous(&self) -> Self {
        Self::starting_in(self.start_year - 1)
    }
}

impl fmt::Display for Season {
    /// Formats as the two-year label used by the stats API, e.g. "2024-25"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let end = (self.start_year + 1).rem_euclid(100);
        write!(f, "{}-{:02}", self.start_year, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_season_switches_in_october() {
        assert_eq!(Season::for_date(date(2025, 9, 30)).to_string(), "2024-25");
        assert_eq!(Season::for_date(date(2025, 10, 1)).to_string(), "2025-26");
        assert_eq!(Season::for_date(date(2026, 1, 15)).to_string(), "2025-26");
    }

    #[test]
    fn test_previous_season() {
        let season = Season::for_date(date(2025, 3, 1));
        assert_eq!(season.previous().to_string(), "2023-24");
    }

    #[test]
    fn test_century_rollover() {
        assert_eq!(Season::starting_in(1999).to_string(), "1999-00");
    }
}
