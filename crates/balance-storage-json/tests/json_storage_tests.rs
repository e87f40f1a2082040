use balance_core::{
    storage::{ledger_key, load_value, save_value, CURRENT_PERIOD_KEY},
    CoreError, KeyValueStore,
};
use balance_domain::{Category, CategoryType, Ledger, Period, Section};
use balance_storage_json::{
    export_ledger_to_dir, import_ledger_from_path, JsonKeyValueStore, DEFAULT_EXPORT_FILE,
};
use std::fs;
use tempfile::tempdir;

fn sample_ledger() -> Ledger {
    let mut ledger = Ledger::empty();
    ledger.period_mut(Period::June).categories.push(
        Category::new("Salary", CategoryType::Income)
            .with_sections([Section::with_value("Base", 5000.0)]),
    );
    ledger
}

#[test]
fn json_store_reads_absent_keys_as_none() {
    let dir = tempdir().expect("tempdir");
    let store = JsonKeyValueStore::new(dir.path().join("state")).expect("create store");

    assert_eq!(store.get("never-written").expect("read"), None);
}

#[test]
fn json_store_persists_values_across_instances() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path().join("state");
    let store = JsonKeyValueStore::new(root.clone()).expect("create store");
    save_value(&store, CURRENT_PERIOD_KEY, &Period::June).expect("save period");
    save_value(&store, &ledger_key("someone@example.com"), &sample_ledger())
        .expect("save ledger");

    let reopened = JsonKeyValueStore::new(root).expect("reopen store");
    let period: Option<Period> = load_value(&reopened, CURRENT_PERIOD_KEY).expect("load period");
    let ledger: Option<Ledger> =
        load_value(&reopened, &ledger_key("someone@example.com")).expect("load ledger");

    assert_eq!(period, Some(Period::June));
    assert_eq!(ledger, Some(sample_ledger()));
    assert!(reopened.value_path(CURRENT_PERIOD_KEY).exists());
}

#[test]
fn json_store_overwrites_without_leaving_temp_files() {
    let dir = tempdir().expect("tempdir");
    let store = JsonKeyValueStore::new(dir.path().to_path_buf()).expect("create store");
    store.put("currentMonth", "\"May\"").expect("first write");
    store.put("currentMonth", "\"June\"").expect("second write");

    assert_eq!(store.get("currentMonth").unwrap().as_deref(), Some("\"June\""));
    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|entry| entry.path().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn export_writes_pretty_json_that_imports_back() {
    let dir = tempdir().expect("tempdir");
    let ledger = sample_ledger();

    let path = export_ledger_to_dir(&ledger, dir.path(), DEFAULT_EXPORT_FILE).expect("export");
    assert_eq!(
        path.file_name().and_then(|name| name.to_str()),
        Some("monthlyBalances.json")
    );
    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\n  \"January\""));

    let imported = import_ledger_from_path(&path).expect("import");
    assert_eq!(imported, ledger);
}

#[test]
fn import_reports_invalid_files() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("broken.json");
    fs::write(&path, "this is not a ledger").unwrap();

    let err = import_ledger_from_path(&path).expect_err("invalid ledger");
    assert!(matches!(err, CoreError::Serde(_)), "unexpected error: {err:?}");

    let missing = import_ledger_from_path(&dir.path().join("missing.json"))
        .expect_err("missing file");
    assert!(matches!(missing, CoreError::Io(_)));
}

#[test]
fn ledgers_of_similar_user_names_stay_isolated() {
    let dir = tempdir().expect("tempdir");
    let store = JsonKeyValueStore::new(dir.path().to_path_buf()).expect("create store");
    let users = ["Alice@x.com", "alice@x.com", "a+b@x.com", "a_b@x.com"];

    for user in users {
        store
            .put(&ledger_key(user), &format!("\"{user}-ledger\""))
            .expect("write ledger");
    }

    for user in users {
        assert_eq!(
            store.get(&ledger_key(user)).expect("read ledger"),
            Some(format!("\"{user}-ledger\"")),
            "{user}"
        );
    }
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), users.len());
}
