use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::fmt::{Display, Formatter};

/// A calendar year, usable wherever an [`crate::AnyDate`] is accepted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash, Serialize)]
pub struct Year(pub i32);

impl Display for Year {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// A calendar month of a specific year: `Month(year, month)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash, Serialize)]
pub struct Month(pub i32, pub u32);
impl Month {
    pub fn year(self) -> i32 {
        self.0
    }
    pub fn month(self) -> u32 {
        self.1
    }
}

impl Display for Month {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.0, self.1)
    }
}

/// Inclusive date range produced by resolving an [`crate::AnyDate`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct StartEndDate {
    pub start: NaiveDate,
    pub end: NaiveDate,
}
