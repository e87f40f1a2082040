#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use balance_storage_json::JsonKeyValueStore;
use monthly_balance::{
    notify::RecordingNotifier,
    session::{AppStore, SessionDefaults},
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub const SCRIPT_ENV: &str = "MONTHLY_BALANCE_CLI_SCRIPT";
pub const HOME_ENV: &str = "MONTHLY_BALANCE_HOME";

/// Returns a fresh directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Opens a store persisted under `base/state`, recording its notifications.
pub fn open_store(base: &Path) -> (AppStore, RecordingNotifier) {
    let store = JsonKeyValueStore::new(base.join("state")).expect("create json store");
    let notifier = RecordingNotifier::new();
    let app = AppStore::open(
        Box::new(store),
        Box::new(notifier.clone()),
        SessionDefaults::default(),
    );
    (app, notifier)
}

/// Creates an isolated store for tests that do not need to reopen it.
pub fn setup_test_env() -> (AppStore, RecordingNotifier) {
    let base = temp_base();
    open_store(&base)
}
