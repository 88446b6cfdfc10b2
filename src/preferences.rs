//! Durable per-origin preference storage (the page's `localStorage`).

use crate::i18n::Language;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Storage key holding the selected language code.
pub const SELECTED_LANGUAGE_KEY: &str = "selectedLanguage";

/// String key/value storage scoped to one site origin.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// Stored language, if a supported one is stored.
///
/// Unknown or missing values yield `None`; callers fall back to the default.
pub fn stored_language(store: &impl PreferenceStore) -> Option<Language> {
    let raw = store.get(SELECTED_LANGUAGE_KEY)?;
    let language = Language::from_code(&raw);
    if language.is_none() {
        debug!("Ignoring unsupported stored language '{}'", raw);
    }
    language
}

pub fn save_language(store: &mut impl PreferenceStore, language: Language) {
    store.set(SELECTED_LANGUAGE_KEY, language.code());
}

/// Preferences held in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: BTreeMap<String, String>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// Preferences persisted as a flat JSON object on disk.
///
/// A missing or unreadable file starts empty. Write failures are logged and
/// otherwise ignored, mirroring how browser storage quota errors are treated.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FilePreferences {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!(
                    "Preferences file {} is not valid JSON ({}), starting empty",
                    path.display(),
                    e
                );
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                warn!("Failed to read preferences {}: {}", path.display(), e);
                BTreeMap::new()
            }
        };

        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, json)
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        if let Err(e) = self.persist() {
            warn!("Failed to write preferences {}: {}", self.path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // ==================== Language Helpers ====================

    #[test]
    fn test_stored_language_roundtrip() {
        let mut store = MemoryPreferences::new();
        assert_eq!(stored_language(&store), None);

        save_language(&mut store, Language::ARABIC);
        assert_eq!(store.get(SELECTED_LANGUAGE_KEY).as_deref(), Some("ar"));
        assert_eq!(stored_language(&store), Some(Language::ARABIC));
    }

    #[test]
    fn test_stored_language_ignores_unknown_code() {
        let store = MemoryPreferences::new().with(SELECTED_LANGUAGE_KEY, "klingon");
        assert_eq!(stored_language(&store), None);
    }

    // ==================== File Store ====================

    #[test]
    fn test_file_preferences_persist_across_instances() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        let mut first = FilePreferences::open(&path);
        assert_eq!(first.get(SELECTED_LANGUAGE_KEY), None);
        save_language(&mut first, Language::TURKISH);

        let second = FilePreferences::open(&path);
        assert_eq!(stored_language(&second), Some(Language::TURKISH));
    }

    #[test]
    fn test_file_preferences_corrupt_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "not json").unwrap();

        let mut store = FilePreferences::open(&path);
        assert_eq!(store.get(SELECTED_LANGUAGE_KEY), None);

        store.set(SELECTED_LANGUAGE_KEY, "en");
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"selectedLanguage\": \"en\""));
    }
}
