//! The fixed, ordered set of calendar-month buckets.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// One of the twelve calendar months a ledger is partitioned into.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Period {
    #[default]
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Period {
    /// Every period in calendar order.
    pub const ALL: [Period; 12] = [
        Period::January,
        Period::February,
        Period::March,
        Period::April,
        Period::May,
        Period::June,
        Period::July,
        Period::August,
        Period::September,
        Period::October,
        Period::November,
        Period::December,
    ];

    /// Zero-based position of the period within the year.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Period::January => "January",
            Period::February => "February",
            Period::March => "March",
            Period::April => "April",
            Period::May => "May",
            Period::June => "June",
            Period::July => "July",
            Period::August => "August",
            Period::September => "September",
            Period::October => "October",
            Period::November => "November",
            Period::December => "December",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a string does not name a calendar month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPeriod(pub String);

impl fmt::Display for UnknownPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown month `{}`", self.0)
    }
}

impl std::error::Error for UnknownPeriod {}

impl FromStr for Period {
    type Err = UnknownPeriod;

    /// Accepts full month names or their three-letter abbreviations, ignoring case.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim().to_ascii_lowercase();
        Period::ALL
            .into_iter()
            .find(|period| {
                let label = period.label().to_ascii_lowercase();
                label == needle || (needle.len() == 3 && label.starts_with(&needle))
            })
            .ok_or_else(|| UnknownPeriod(value.to_string()))
    }
}
