use std::{
    fmt::Write as _,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{
    errors::Result,
    utils::paths::{ensure_dir, write_atomic},
};

use super::KeyValueStore;

const VALUE_EXTENSION: &str = "json";

/// Filesystem-backed store keeping one file per key under `root`.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Result<Self> {
        ensure_dir(&root)?;
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

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.value_path(key)) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        write_atomic(&self.value_path(key), value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.value_path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Maps an arbitrary key onto a safe file stem, one stem per key.
///
/// `a-z`, `0-9` and `-` pass through; every other byte becomes `_xx` (lowercase
/// hex), so `Transactions`, `a.b` and `a_b` all land in different files. The
/// empty key maps to `_`, which no escaped key can produce.
fn canonical_key(key: &str) -> String {
    if key.is_empty() {
        return "_".into();
    }
    let mut stem = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'a'..=b'z' | b'0'..=b'9' | b'-' => stem.push(char::from(byte)),
            _ => {
                let _ = write!(stem, "_{byte:02x}");
            }
        }
    }
    stem
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::paths::tmp_path;
    use tempfile::TempDir;

    fn store_with_temp_dir() -> (FileStore, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let store = FileStore::new(temp.path().join("data")).expect("file store");
        (store, temp)
    }

    #[test]
    fn set_get_remove_roundtrip() {
        let (store, _guard) = store_with_temp_dir();
        assert_eq!(store.get("transactions").unwrap(), None);

        store.set("transactions", "[1,2]").unwrap();
        assert_eq!(store.get("transactions").unwrap().as_deref(), Some("[1,2]"));
        assert!(store.value_path("transactions").exists());

        store.remove("transactions").unwrap();
        assert_eq!(store.get("transactions").unwrap(), None);
        store.remove("transactions").expect("missing key removal is a no-op");
    }

    #[test]
    fn set_leaves_no_temp_file_behind() {
        let (store, _guard) = store_with_temp_dir();
        store.set("transactions", "[]").unwrap();
        let path = store.value_path("transactions");
        assert!(!tmp_path(&path).exists());
    }

    #[test]
    fn keys_are_sanitized_into_file_names() {
        assert_eq!(canonical_key("transactions"), "transactions");
        assert_eq!(canonical_key("../etc/passwd"), "_2e_2e_2fetc_2fpasswd");
        assert_eq!(canonical_key("   "), "_20_20_20");
        assert_eq!(canonical_key(""), "_");
        assert_eq!(tmp_path(Path::new("a/b.json")), PathBuf::from("a/b.json.tmp"));
    }

    #[test]
    fn distinct_keys_never_share_a_file() {
        let keys = [
            "Transactions",
            "transactions",
            "a.b",
            "a_b",
            "a b",
            "",
            "_",
            "ç",
            "_c3_a7",
        ];
        let stems: std::collections::HashSet<_> =
            keys.iter().map(|key| canonical_key(key)).collect();
        assert_eq!(stems.len(), keys.len());

        let (store, _guard) = store_with_temp_dir();
        store.set("Transactions", "[1]").unwrap();
        store.set("transactions", "[2]").unwrap();
        assert_eq!(store.get("Transactions").unwrap().as_deref(), Some("[1]"));
        assert_eq!(store.get("transactions").unwrap().as_deref(), Some("[2]"));
    }
}
