use crate::error::Result;
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

/// Key used for the persisted language preference
pub const LANG_KEY: &str = "lang";

/// Key-value persistence for user preferences, the stand-in for the
/// browser's local storage
pub trait PreferenceStorage: Send + Sync {
    /// Returns the stored value for a key, or `None` if unset
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Stores a value under a key, replacing any previous value
    fn save(&self, key: &str, value: &str) -> Result<()>;
}

/// In-memory preference storage for tests and demos
#[derive(Default)]
pub struct MemoryPreferences {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStorage for MemoryPreferences {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        Ok(values.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed preference storage: one JSON object per file
pub struct FilePreferences {
    path: PathBuf,
}

impl FilePreferences {
    /// Creates preference storage backed by the given file; the file is
    /// created on first save
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn read_all(&self) -> Result<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        let values: HashMap<String, String> = serde_json::from_str(&contents)?;
        Ok(values)
    }
}

impl PreferenceStorage for FilePreferences {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&values)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
