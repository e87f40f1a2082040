//! The twelve-period ledger and its per-period slices.

use std::fmt;

use serde::{
    de::{self, MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::{category::Category, period::Period};

/// Categories recorded against a single period, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodLedger {
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl PeriodLedger {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn category(&self, index: usize) -> Option<&Category> {
        self.categories.get(index)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Mapping from every [`Period`] to its [`PeriodLedger`].
///
/// All twelve periods are always present: the only way to build a ledger is
/// from a full set of slices, and deserialization rejects partial input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    periods: [PeriodLedger; 12],
}

impl Ledger {
    /// Builds a ledger where every period is empty.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_periods(periods: [PeriodLedger; 12]) -> Self {
        Self { periods }
    }

    pub fn period(&self, period: Period) -> &PeriodLedger {
        &self.periods[period.index()]
    }

    pub fn period_mut(&mut self, period: Period) -> &mut PeriodLedger {
        &mut self.periods[period.index()]
    }

    pub fn categories(&self, period: Period) -> &[Category] {
        &self.period(period).categories
    }

    /// Iterates periods in calendar order.
    pub fn iter(&self) -> impl Iterator<Item = (Period, &PeriodLedger)> {
        Period::ALL.into_iter().zip(self.periods.iter())
    }

    /// Number of categories across every period.
    pub fn category_count(&self) -> usize {
        self.periods.iter().map(PeriodLedger::len).sum()
    }
}

impl Serialize for Ledger {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.periods.len()))?;
        for (period, slice) in self.iter() {
            map.serialize_entry(&period, slice)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Ledger {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(LedgerVisitor)
    }
}

struct LedgerVisitor;

impl<'de> Visitor<'de> for LedgerVisitor {
    type Value = Ledger;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map from every month name to its categories")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut slots: [Option<PeriodLedger>; 12] = Default::default();
        while let Some(period) = access.next_key::<Period>()? {
            let slot = &mut slots[period.index()];
            if slot.is_some() {
                return Err(de::Error::duplicate_field(period.label()));
            }
            *slot = Some(access.next_value()?);
        }

        let mut periods: [PeriodLedger; 12] = Default::default();
        for period in Period::ALL {
            match slots[period.index()].take() {
                Some(slice) => periods[period.index()] = slice,
                None => return Err(de::Error::missing_field(period.label())),
            }
        }
        Ok(Ledger { periods })
    }
}
