//! Pure state transitions over [`Ledger`] snapshots.
//!
//! Categories and sections are addressed by position within their parent
//! sequence. An index that does not exist in the snapshot being reduced turns
//! the action into a no-op, so actions built against a stale snapshot never
//! fail.

use serde::{Deserialize, Serialize};

use balance_domain::{Category, CategoryType, Ledger, Period, Section};

/// Every transition the reducer understands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum Action {
    /// Replaces the whole ledger, discarding the previous one.
    #[serde(alias = "SET_MONTHLY_BALANCE")]
    SetLedger { ledger: Ledger },
    AddCategory {
        period: Period,
        category_type: CategoryType,
        name: String,
    },
    /// Appends already-formed categories, keeping their order.
    AddCategories {
        period: Period,
        categories: Vec<Category>,
    },
    DeleteCategory {
        period: Period,
        index: usize,
    },
    ChangeCategoryName {
        period: Period,
        index: usize,
        name: String,
    },
    AddCategoryItem {
        period: Period,
        index: usize,
        name: String,
    },
    ChangeCategoryItemName {
        period: Period,
        index: usize,
        item_index: usize,
        name: String,
    },
    ChangeCategoryItemValue {
        period: Period,
        index: usize,
        item_index: usize,
        value: f64,
    },
    DeleteCategoryItem {
        period: Period,
        index: usize,
        item_index: usize,
    },
    /// Any action kind this build does not know about. Reduces to identity.
    #[serde(other)]
    Unrecognized,
}

/// Maps `(ledger, action)` to the next ledger snapshot.
pub fn apply(ledger: Ledger, action: Action) -> Ledger {
    match action {
        Action::SetLedger { ledger } => ledger,
        Action::AddCategory {
            period,
            category_type,
            name,
        } => edit_period(ledger, period, |categories| {
            categories.push(Category::new(name, category_type));
        }),
        Action::AddCategories { period, categories } => {
            edit_period(ledger, period, |existing| existing.extend(categories))
        }
        Action::DeleteCategory { period, index } => edit_period(ledger, period, |categories| {
            if index < categories.len() {
                categories.remove(index);
            }
        }),
        Action::ChangeCategoryName {
            period,
            index,
            name,
        } => edit_category(ledger, period, index, |category| category.name = name),
        Action::AddCategoryItem {
            period,
            index,
            name,
        } => edit_category(ledger, period, index, |category| {
            category.sections.push(Section::new(name));
        }),
        Action::ChangeCategoryItemName {
            period,
            index,
            item_index,
            name,
        } => edit_section(ledger, period, index, item_index, |section| {
            section.name = name;
        }),
        Action::ChangeCategoryItemValue {
            period,
            index,
            item_index,
            value,
        } => edit_section(ledger, period, index, item_index, |section| {
            section.value = value;
        }),
        Action::DeleteCategoryItem {
            period,
            index,
            item_index,
        } => edit_category(ledger, period, index, |category| {
            if item_index < category.sections.len() {
                category.sections.remove(item_index);
            }
        }),
        Action::Unrecognized => ledger,
    }
}

/// Folds a sequence of actions over `ledger` in order.
pub fn apply_all(ledger: Ledger, actions: impl IntoIterator<Item = Action>) -> Ledger {
    actions.into_iter().fold(ledger, apply)
}

fn edit_period<F>(mut ledger: Ledger, period: Period, edit: F) -> Ledger
where
    F: FnOnce(&mut Vec<Category>),
{
    edit(&mut ledger.period_mut(period).categories);
    ledger
}

fn edit_category<F>(ledger: Ledger, period: Period, index: usize, edit: F) -> Ledger
where
    F: FnOnce(&mut Category),
{
    edit_period(ledger, period, |categories| {
        if let Some(category) = categories.get_mut(index) {
            edit(category);
        }
    })
}

fn edit_section<F>(ledger: Ledger, period: Period, index: usize, item_index: usize, edit: F) -> Ledger
where
    F: FnOnce(&mut Section),
{
    edit_category(ledger, period, index, |category| {
        if let Some(section) = category.sections.get_mut(item_index) {
            edit(section);
        }
    })
}
