//! Working set of categories chosen for bulk copy and spread.
//!
//! Membership is decided by category name alone, so two different
//! categories that share a name are treated as the same entry.

use serde::{Deserialize, Serialize};

use balance_domain::{Category, Ledger, Period};

use crate::reducer::{apply_all, Action};

/// Copies of selected categories, in selection order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionSet {
    categories: Vec<Category>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_categories(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.categories.iter().any(|category| category.name == name)
    }

    /// Removes every entry named like `category`, or appends a copy of it when
    /// none is present.
    pub fn toggle(&self, category: &Category) -> SelectionSet {
        let mut categories = self.categories.clone();
        if self.contains(&category.name) {
            categories.retain(|selected| selected.name != category.name);
        } else {
            categories.push(category.clone());
        }
        SelectionSet { categories }
    }

    pub fn clear(&self) -> SelectionSet {
        SelectionSet::new()
    }

    /// One `AddCategories` action per period, origin period included.
    pub fn spread_actions(&self) -> Vec<Action> {
        Period::ALL
            .into_iter()
            .map(|period| Action::AddCategories {
                period,
                categories: self.categories.clone(),
            })
            .collect()
    }

    /// Appends copies of every selected category to every period of `ledger`.
    pub fn spread(&self, ledger: Ledger) -> Ledger {
        apply_all(ledger, self.spread_actions())
    }
}
