use std::fmt;
use std::str::FromStr;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, PrimitiveDateTime};

/// Simple "YYYY-MM" key with chronological ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: u16,
    pub month: u8, // 1..=12
}

impl YearMonth {
    pub fn new(year: u16, month: u8) -> Self {
        assert!((1..=12).contains(&month), "Month must be 1..=12");
        Self { year, month }
    }

    fn from_date(date: Date) -> Option<Self> {
        let year = u16::try_from(date.year()).ok()?;
        Some(Self { year, month: date.month() as u8 })
    }

    /// Month of a stored `published` value. Accepts the timestamps this crate
    /// writes (`T` or space separator, optional fraction) and bare dates.
    /// Anything else yields `None` and is left out of monthly counts.
    pub fn from_published(s: &str) -> Option<Self> {
        const DATETIME_T: &[BorrowedFormatItem<'static>] = format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"
        );
        const DATETIME_SPACE: &[BorrowedFormatItem<'static>] = format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second][optional [.[subsecond]]]"
        );
        const DATE_ONLY: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

        let s = s.trim();
        if let Ok(dt) = PrimitiveDateTime::parse(s, DATETIME_T).or_else(|_| PrimitiveDateTime::parse(s, DATETIME_SPACE)) {
            return Self::from_date(dt.date());
        }
        Date::parse(s, DATE_ONLY).ok().and_then(Self::from_date)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<_> = s.split('-').collect();
        if parts.len() != 2 {
            return Err("expected YYYY-MM".into());
        }
        let year: u16 = parts[0].parse().map_err(|_| "invalid year")?;
        let month: u8 = parts[1].parse().map_err(|_| "invalid month")?;
        if !(1..=12).contains(&month) {
            return Err("month must be 01..12".into());
        }
        Ok(Self { year, month })
    }
}
