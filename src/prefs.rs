//! `PreferenceStore` implementations.

use crate::trace::PreferenceStore;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A `PreferenceStore` which only lives as long as the process.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryPreferences {
    values: HashMap<String, String>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// A `PreferenceStore` backed by a JSON object in a file. The file is read
/// once when opened and rewritten on every `set`. A value only becomes
/// visible through `get` once it has been written to the file.
#[derive(Debug)]
pub struct FilePreferences {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl FilePreferences {
    /// Open the preferences stored at `path`. A missing file is treated as
    /// an empty store and is only created by the first `set`.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let values = if path.exists() {
            let data = fs::read_to_string(&path)?;
            serde_json::from_str(&data)?
        } else {
            HashMap::new()
        };
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self, values: &HashMap<String, String>) -> io::Result<()> {
        let data = serde_json::to_string_pretty(values)?;
        fs::write(&self.path, data)
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        let mut values = self.values.clone();
        values.insert(key.to_owned(), value.to_owned());
        self.save(&values)?;
        self.values = values;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::{FilePreferences, MemoryPreferences};
    use crate::coord::Coordinate;
    use crate::trace::{ensure_home, HomeOrigin, PreferenceStore, HOME_KEY};

    #[test]
    fn memory_get_and_set() {
        let mut prefs = MemoryPreferences::new();
        assert_eq!(prefs.get(HOME_KEY), None);
        prefs.set(HOME_KEY, "-101.189,20.126").unwrap();
        assert_eq!(prefs.get(HOME_KEY).as_deref(), Some("-101.189,20.126"));
    }

    #[test]
    fn file_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        let mut prefs = FilePreferences::open(&path).unwrap();
        assert_eq!(prefs.path(), path.as_path());
        assert_eq!(prefs.get(HOME_KEY), None);
        assert!(!path.exists());
        prefs.set(HOME_KEY, "-101.189,20.126").unwrap();

        let reopened = FilePreferences::open(&path).unwrap();
        assert_eq!(
            reopened.get(HOME_KEY).as_deref(),
            Some("-101.189,20.126")
        );
    }

    #[test]
    fn file_with_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "not json").unwrap();

        let err = FilePreferences::open(&path).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }

    #[test]
    fn failed_write_is_not_visible() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("prefs.json");

        let mut prefs = FilePreferences::open(&path).unwrap();
        assert!(prefs.set(HOME_KEY, "-101.189,20.126").is_err());
        assert_eq!(prefs.get(HOME_KEY), None);

        let location = || Coordinate::new(-101.189, 20.126).ok();
        assert!(ensure_home(&mut prefs, &location).is_err());
        assert!(ensure_home(&mut prefs, &location).is_err());
        assert!(!path.exists());

        std::fs::create_dir(dir.path().join("missing")).unwrap();
        let home = ensure_home(&mut prefs, &location).unwrap();
        assert!(matches!(home, HomeOrigin::Stored(_)));
        assert_eq!(
            FilePreferences::open(&path).unwrap().get(HOME_KEY).as_deref(),
            Some("-101.189,20.126")
        );
    }
}
