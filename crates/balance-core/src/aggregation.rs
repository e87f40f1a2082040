//! Derived totals computed from ledger snapshots.
//!
//! Sums are exact `f64` additions in ledger order; rounding for display is
//! left to the presentation layer.

use std::sync::Arc;

use balance_domain::{CategoryType, Ledger, Period};

/// Income and expense sums for one period.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub total_income: f64,
    pub total_expense: f64,
}

impl Totals {
    /// Income minus expense.
    pub fn net(&self) -> f64 {
        self.total_income - self.total_expense
    }
}

/// Sums every section in `period`, partitioned by its category type.
pub fn period_totals(ledger: &Ledger, period: Period) -> Totals {
    let mut totals = Totals::default();
    for category in ledger.categories(period) {
        let sum: f64 = category.sections.iter().map(|section| section.value).sum();
        match category.kind {
            CategoryType::Income => totals.total_income += sum,
            CategoryType::Expense => totals.total_expense += sum,
        }
    }
    totals
}

/// Per-period totals for the whole year, in calendar order.
pub fn yearly_breakdown(ledger: &Ledger) -> Vec<(Period, Totals)> {
    Period::ALL
        .into_iter()
        .map(|period| (period, period_totals(ledger, period)))
        .collect()
}

/// Sum over all periods of income minus expense.
pub fn annual_net(ledger: &Ledger) -> f64 {
    Period::ALL
        .into_iter()
        .map(|period| period_totals(ledger, period).net())
        .sum()
}

/// Memoizes totals for the most recent ledger snapshot.
///
/// Entries are keyed by snapshot identity: handing in a different `Arc`
/// (even one that compares equal) discards everything cached so far.
#[derive(Debug, Default)]
pub struct TotalsCache {
    source: Option<Arc<Ledger>>,
    periods: [Option<Totals>; 12],
    annual_net: Option<f64>,
    computations: usize,
}

impl TotalsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn totals(&mut self, ledger: &Arc<Ledger>, period: Period) -> Totals {
        self.sync(ledger);
        if let Some(cached) = self.periods[period.index()] {
            return cached;
        }
        self.computations += 1;
        let totals = period_totals(ledger, period);
        self.periods[period.index()] = Some(totals);
        totals
    }

    pub fn annual_net(&mut self, ledger: &Arc<Ledger>) -> f64 {
        self.sync(ledger);
        if let Some(cached) = self.annual_net {
            return cached;
        }
        self.computations += 1;
        let net = annual_net(ledger);
        self.annual_net = Some(net);
        net
    }

    /// How many times a value had to be computed rather than served from cache.
    pub fn computations(&self) -> usize {
        self.computations
    }

    fn sync(&mut self, ledger: &Arc<Ledger>) {
        let current = self
            .source
            .as_ref()
            .is_some_and(|source| Arc::ptr_eq(source, ledger));
        if !current {
            self.source = Some(Arc::clone(ledger));
            self.periods = Default::default();
            self.annual_net = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use balance_domain::{Category, Section};

    fn ledger() -> Ledger {
        let mut ledger = Ledger::empty();
        ledger.period_mut(Period::January).categories = vec![
            Category::new("Salary", CategoryType::Income).with_sections([
                Section::with_value("Base", 5000.0),
                Section::with_value("Bonus", 250.0),
            ]),
            Category::new("Rent", CategoryType::Expense)
                .with_sections([Section::with_value("Flat", 1500.0)]),
            Category::new("Refunds", CategoryType::Expense)
                .with_sections([Section::with_value("Deposit", -100.0)]),
        ];
        ledger.period_mut(Period::February).categories =
            vec![Category::new("Rent", CategoryType::Expense)
                .with_sections([Section::with_value("Flat", 1500.0)])];
        ledger
    }

    #[test]
    fn period_totals_partition_by_type() {
        let totals = period_totals(&ledger(), Period::January);
        assert_eq!(totals.total_income, 5250.0);
        assert_eq!(totals.total_expense, 1400.0);
        assert_eq!(totals.net(), 3850.0);
    }

    #[test]
    fn empty_period_has_zero_totals() {
        assert_eq!(period_totals(&ledger(), Period::August), Totals::default());
    }

    #[test]
    fn annual_net_sums_period_nets() {
        let ledger = ledger();
        let expected: f64 = yearly_breakdown(&ledger)
            .iter()
            .map(|(_, totals)| totals.net())
            .sum();
        assert_eq!(annual_net(&ledger), expected);
        assert_eq!(annual_net(&ledger), 2350.0);
    }

    #[test]
    fn cache_serves_repeat_lookups_for_the_same_snapshot() {
        let snapshot = Arc::new(ledger());
        let mut cache = TotalsCache::new();
        let first = cache.totals(&snapshot, Period::January);
        let second = cache.totals(&snapshot, Period::January);
        assert_eq!(first, second);
        cache.annual_net(&snapshot);
        cache.annual_net(&snapshot);
        assert_eq!(cache.computations(), 2);
    }

    #[test]
    fn cache_invalidates_on_new_snapshot() {
        let mut cache = TotalsCache::new();
        let first = Arc::new(ledger());
        assert_eq!(cache.totals(&first, Period::February).total_expense, 1500.0);

        let mut changed = (*first).clone();
        changed.period_mut(Period::February).categories.clear();
        let second = Arc::new(changed);
        assert_eq!(cache.totals(&second, Period::February), Totals::default());
        assert_eq!(cache.computations(), 2);
    }
}
