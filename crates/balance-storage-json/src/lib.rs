//! balance-storage-json
//!
//! Filesystem-backed implementation of the key-value persistence port, plus
//! ledger export/import as standalone JSON files.

use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use balance_core::{
    codec::{ledger_from_text, ledger_to_text},
    CoreError, KeyValueStore,
};
use balance_domain::Ledger;
use tracing::debug;

const VALUE_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";
/// File name offered for ledger exports.
pub const DEFAULT_EXPORT_FILE: &str = "monthlyBalances.json";

/// Stores each key as its own JSON document under a root directory.
#[derive(Debug, Clone)]
pub struct JsonKeyValueStore {
    root: PathBuf,
}

impl JsonKeyValueStore {
    pub fn new(root: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn value_path(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_key(key), VALUE_EXTENSION))
    }
}

impl KeyValueStore for JsonKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        match fs::read_to_string(self.value_path(key)) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn put(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let path = self.value_path(key);
        let tmp = tmp_path(&path);
        write_atomic(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        debug!(key, path = %path.display(), "stored value");
        Ok(())
    }
}

/// Writes `ledger` as indented JSON to `dir/file_name`, returning the path.
pub fn export_ledger_to_dir(
    ledger: &Ledger,
    dir: &Path,
    file_name: &str,
) -> Result<PathBuf, CoreError> {
    let path = dir.join(file_name);
    save_ledger_to_path(ledger, &path)?;
    Ok(path)
}

/// Saves a ledger to an arbitrary path on disk.
pub fn save_ledger_to_path(ledger: &Ledger, path: &Path) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = tmp_path(path);
    write_atomic(&tmp, &ledger_to_text(ledger)?)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Reads the file at `path` and parses it as a complete ledger.
pub fn import_ledger_from_path(path: &Path) -> Result<Ledger, CoreError> {
    let data = fs::read_to_string(path)?;
    ledger_from_text(&data)
}

/// Maps a key to a file stem, one-to-one. Lowercase ASCII letters, digits,
/// `@`, `-` and non-leading `.` pass through; every other byte becomes `_xx`
/// (lowercase hex), so stems differ whenever keys differ, even on
/// case-insensitive filesystems.
fn canonical_key(key: &str) -> String {
    if key.is_empty() {
        return "_".into();
    }
    let mut stem = String::with_capacity(key.len());
    for (position, byte) in key.bytes().enumerate() {
        match byte {
            b'a'..=b'z' | b'0'..=b'9' | b'@' | b'-' => stem.push(char::from(byte)),
            b'.' if position > 0 => stem.push('.'),
            _ => stem.push_str(&format!("_{byte:02x}")),
        }
    }
    stem
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_key_escapes_separators_and_capitals() {
        assert_eq!(
            canonical_key("monthlyBalance/someone@example.com"),
            "monthly_42alance_2fsomeone@example.com"
        );
        assert_eq!(canonical_key("../.."), "_2e._2f..");
        assert_eq!(canonical_key(" "), "_20");
        assert_eq!(canonical_key(""), "_");
    }

    #[test]
    fn canonical_key_keeps_distinct_keys_apart() {
        let keys = [
            "Alice@x.com",
            "alice@x.com",
            "a+b@x.com",
            "a_b@x.com",
            "a_2bb@x.com",
            "",
            "_",
        ];
        let stems: std::collections::HashSet<_> = keys.iter().map(|k| canonical_key(k)).collect();
        assert_eq!(stems.len(), keys.len());
    }

    #[test]
    fn tmp_path_appends_suffix() {
        let tmp = tmp_path(Path::new("/data/currentmonth.json"));
        assert_eq!(tmp, PathBuf::from("/data/currentmonth.json.tmp"));
    }
}
