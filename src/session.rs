//! Application-state store.
//!
//! Owns the current ledger snapshot, the selected period, the user key and the
//! selection set. Every change goes through here so it can be persisted to the
//! injected [`KeyValueStore`] and reported through the injected [`Notifier`].
//! Persistence is best-effort: read failures fall back to defaults and write
//! failures are logged and otherwise ignored.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use balance_config::Config;
use balance_core::{
    apply,
    codec::{categories_from_text, categories_to_text, ledger_from_text, ledger_to_text},
    storage::{
        ledger_key, load_value, save_value, CURRENT_PERIOD_KEY, SELECTION_KEY, USER_KEY,
    },
    Action, CoreError, KeyValueStore, SelectionSet, Totals, TotalsCache,
};
use balance_domain::{Category, Ledger, Period};
use balance_storage_json::{export_ledger_to_dir, import_ledger_from_path};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use crate::notify::{Notification, Notifier, Severity};

/// Values used when nothing usable is stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDefaults {
    pub user: String,
    pub period: Period,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for SessionDefaults {
    fn from(config: &Config) -> Self {
        Self {
            user: config.default_user.clone(),
            period: config.default_period,
        }
    }
}

pub struct AppStore {
    ledger: Arc<Ledger>,
    period: Period,
    user: String,
    selection: SelectionSet,
    totals: TotalsCache,
    defaults: SessionDefaults,
    store: Box<dyn KeyValueStore>,
    notifier: Box<dyn Notifier>,
}

impl AppStore {
    /// Restores the last session from `store`, defaulting anything absent or unreadable.
    pub fn open(
        store: Box<dyn KeyValueStore>,
        notifier: Box<dyn Notifier>,
        defaults: SessionDefaults,
    ) -> Self {
        let user = read_or_none(store.as_ref(), USER_KEY).unwrap_or_else(|| defaults.user.clone());
        let period = read_or_none(store.as_ref(), CURRENT_PERIOD_KEY).unwrap_or(defaults.period);
        let selection = read_or_none(store.as_ref(), SELECTION_KEY).unwrap_or_default();
        let ledger = read_or_none(store.as_ref(), &ledger_key(&user)).unwrap_or_else(Ledger::empty);
        info!(
            user = %user,
            period = %period,
            categories = ledger.category_count(),
            "session opened"
        );
        Self {
            ledger: Arc::new(ledger),
            period,
            user,
            selection,
            totals: TotalsCache::new(),
            defaults,
            store,
            notifier,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Shared handle to the current snapshot; never mutated after publication.
    pub fn snapshot(&self) -> Arc<Ledger> {
        Arc::clone(&self.ledger)
    }

    pub fn current_period(&self) -> Period {
        self.period
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn current_categories(&self) -> &[Category] {
        self.ledger.categories(self.period)
    }

    /// Reduces `action` against the current snapshot and persists the result.
    pub fn dispatch(&mut self, action: Action) {
        let next = apply(Ledger::clone(&self.ledger), action);
        self.publish(next);
    }

    pub fn set_current_period(&mut self, period: Period) {
        self.period = period;
        self.persist(CURRENT_PERIOD_KEY, &period);
    }

    /// Switches the persistence partition to `user` and loads that user's ledger.
    pub fn set_user(&mut self, user: impl Into<String>) {
        let user = user.into();
        if user == self.user {
            return;
        }
        let ledger =
            read_or_none(self.store.as_ref(), &ledger_key(&user)).unwrap_or_else(Ledger::empty);
        info!(user = %user, "switched user");
        self.user = user;
        self.persist(USER_KEY, &self.user);
        self.ledger = Arc::new(ledger);
    }

    /// Returns to the placeholder identity and drops the selection.
    pub fn sign_out(&mut self) {
        let user = self.defaults.user.clone();
        self.set_user(user);
        self.clear_selection();
        self.notify(Severity::Info, "Signed out.");
    }

    /// Toggles the category at `index` of the current period. Returns `false`
    /// when no such category exists.
    pub fn toggle_selection(&mut self, index: usize) -> bool {
        let Some(category) = self.current_categories().get(index).cloned() else {
            return false;
        };
        self.toggle_category(&category);
        true
    }

    pub fn toggle_category(&mut self, category: &Category) {
        self.selection = self.selection.toggle(category);
        self.persist(SELECTION_KEY, &self.selection);
    }

    pub fn clear_selection(&mut self) {
        self.selection = self.selection.clear();
        self.persist(SELECTION_KEY, &self.selection);
    }

    /// Appends the selection to every period, including the one it came from.
    pub fn spread_selection(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        let next = self.selection.spread(Ledger::clone(&self.ledger));
        self.publish(next);
        let count = self.selection.len();
        self.notify(
            Severity::Success,
            format!("Spread {count} categories to all months!"),
        );
    }

    /// Encodes the selection for the clipboard.
    pub fn copy_selection(&self) -> Result<String, CoreError> {
        let text = categories_to_text(self.selection.categories())?;
        self.notify(Severity::Success, "Categories copied to clipboard!");
        Ok(text)
    }

    /// Appends clipboard categories to the current period. Returns how many
    /// were added; invalid text is reported and leaves the ledger untouched.
    pub fn paste_categories(&mut self, text: &str) -> usize {
        let categories = match categories_from_text(text) {
            Ok(categories) => categories,
            Err(err) => {
                debug!(error = %err, "clipboard text rejected");
                self.notify(Severity::Error, "Invalid JSON format in clipboard!");
                return 0;
            }
        };
        let count = categories.len();
        if count == 0 {
            return 0;
        }
        self.notify(
            Severity::Info,
            format!("Pasting {count} categories from clipboard!"),
        );
        self.dispatch(Action::AddCategories {
            period: self.period,
            categories,
        });
        count
    }

    pub fn export_text(&self) -> Result<String, CoreError> {
        ledger_to_text(&self.ledger)
    }

    /// Writes the ledger to `dir/file_name` and reports the outcome.
    pub fn export_to_dir(&self, dir: &Path, file_name: &str) -> Option<PathBuf> {
        match export_ledger_to_dir(&self.ledger, dir, file_name) {
            Ok(path) => {
                info!(path = %path.display(), "ledger exported");
                self.notify(Severity::Success, "Exported monthly balances!");
                Some(path)
            }
            Err(err) => {
                warn!(error = %err, "ledger export failed");
                self.notify(Severity::Error, format!("Export failed: {err}"));
                None
            }
        }
    }

    /// Replaces the whole ledger with one parsed from `text`.
    pub fn import_text(&mut self, text: &str) -> bool {
        let parsed = ledger_from_text(text);
        self.finish_import(parsed)
    }

    pub fn import_from_path(&mut self, path: &Path) -> bool {
        let parsed = import_ledger_from_path(path);
        self.finish_import(parsed)
    }

    /// Totals for the current period, memoized per snapshot.
    pub fn totals(&mut self) -> Totals {
        self.totals.totals(&self.ledger, self.period)
    }

    pub fn totals_for(&mut self, period: Period) -> Totals {
        self.totals.totals(&self.ledger, period)
    }

    pub fn annual_net(&mut self) -> f64 {
        self.totals.annual_net(&self.ledger)
    }

    fn finish_import(&mut self, parsed: Result<Ledger, CoreError>) -> bool {
        match parsed {
            Ok(ledger) => {
                self.dispatch(Action::SetLedger { ledger });
                self.notify(Severity::Success, "Imported monthly balances!");
                true
            }
            Err(err) => {
                warn!(error = %err, "ledger import rejected");
                self.notify(Severity::Error, "Invalid JSON file!");
                false
            }
        }
    }

    fn publish(&mut self, ledger: Ledger) {
        self.ledger = Arc::new(ledger);
        let key = ledger_key(&self.user);
        self.persist(&key, self.ledger.as_ref());
    }

    fn persist<T>(&self, key: &str, value: &T)
    where
        T: Serialize + ?Sized,
    {
        if let Err(err) = save_value(self.store.as_ref(), key, value) {
            warn!(key, error = %err, "failed to persist value");
        }
    }

    fn notify(&self, severity: Severity, message: impl Into<String>) {
        self.notifier.notify(Notification::new(severity, message));
    }
}

fn read_or_none<T>(store: &dyn KeyValueStore, key: &str) -> Option<T>
where
    T: DeserializeOwned,
{
    match load_value(store, key) {
        Ok(value) => value,
        Err(err) => {
            warn!(key, error = %err, "falling back to default value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;
    use balance_core::MemoryStore;
    use balance_domain::CategoryType;

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>, CoreError> {
            Err(CoreError::Storage("offline".into()))
        }

        fn put(&self, _key: &str, _value: &str) -> Result<(), CoreError> {
            Err(CoreError::Storage("offline".into()))
        }
    }

    fn open_with(store: Box<dyn KeyValueStore>) -> (AppStore, RecordingNotifier) {
        let notifier = RecordingNotifier::new();
        let app = AppStore::open(store, Box::new(notifier.clone()), SessionDefaults::default());
        (app, notifier)
    }

    #[test]
    fn opens_with_defaults_when_store_is_empty() {
        let (app, notifier) = open_with(Box::new(MemoryStore::new()));
        assert_eq!(app.ledger(), &Ledger::empty());
        assert_eq!(app.current_period(), Period::January);
        assert_eq!(app.user(), "default_user@gmail.com");
        assert!(app.selection().is_empty());
        assert!(notifier.notifications().is_empty());
    }

    #[test]
    fn unreachable_store_degrades_to_defaults() {
        let (mut app, _) = open_with(Box::new(FailingStore));
        assert_eq!(app.ledger(), &Ledger::empty());

        app.dispatch(Action::AddCategory {
            period: Period::January,
            category_type: CategoryType::Income,
            name: "Salary".into(),
        });
        assert_eq!(app.current_categories().len(), 1);
    }

    #[test]
    fn dispatch_publishes_a_new_snapshot() {
        let (mut app, _) = open_with(Box::new(MemoryStore::new()));
        let before = app.snapshot();
        app.dispatch(Action::AddCategory {
            period: Period::January,
            category_type: CategoryType::Expense,
            name: "Rent".into(),
        });
        assert!(!Arc::ptr_eq(&before, &app.snapshot()));
        assert_eq!(before.as_ref(), &Ledger::empty());
    }

    #[test]
    fn totals_are_recomputed_after_dispatch() {
        let (mut app, _) = open_with(Box::new(MemoryStore::new()));
        assert_eq!(app.totals(), Totals::default());
        app.dispatch(Action::AddCategory {
            period: Period::January,
            category_type: CategoryType::Income,
            name: "Salary".into(),
        });
        app.dispatch(Action::AddCategoryItem {
            period: Period::January,
            index: 0,
            name: "Base".into(),
        });
        app.dispatch(Action::ChangeCategoryItemValue {
            period: Period::January,
            index: 0,
            item_index: 0,
            value: 5000.0,
        });
        assert_eq!(app.totals().total_income, 5000.0);
        assert_eq!(app.annual_net(), 5000.0);
    }

    #[test]
    fn toggle_selection_ignores_missing_index() {
        let (mut app, _) = open_with(Box::new(MemoryStore::new()));
        assert!(!app.toggle_selection(0));
        assert!(app.selection().is_empty());
    }

    #[test]
    fn spread_with_empty_selection_is_silent() {
        let (mut app, notifier) = open_with(Box::new(MemoryStore::new()));
        let before = app.snapshot();
        app.spread_selection();
        assert!(Arc::ptr_eq(&before, &app.snapshot()));
        assert!(notifier.notifications().is_empty());
    }
}
