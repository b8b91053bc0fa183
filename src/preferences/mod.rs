// Process-wide key -> string preference store (theme, language).

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use log::{debug, info, warn};
use thiserror::Error;

pub mod settings;

pub const THEME_KEY: &str = "theme";
pub const LANGUAGE_KEY: &str = "language";

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("failed to access preference file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("preference file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid value '{value}' for preference '{key}'")]
    InvalidValue { key: String, value: String },
}

pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError>;
    fn all(&self) -> HashMap<String, String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Reject values the views cannot interpret. Unknown keys are stored as-is.
pub fn validate(key: &str, value: &str) -> Result<(), PreferenceError> {
    let ok = match key {
        THEME_KEY => Theme::parse(value).is_some(),
        LANGUAGE_KEY => crate::advisor::language::find(value).is_some(),
        _ => true,
    };
    if ok {
        Ok(())
    } else {
        Err(PreferenceError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

pub fn current_theme(store: &dyn PreferenceStore) -> Theme {
    store
        .get(THEME_KEY)
        .and_then(|v| Theme::parse(&v))
        .unwrap_or(Theme::Light)
}

pub fn toggle_theme(store: &dyn PreferenceStore) -> Result<Theme, PreferenceError> {
    let next = current_theme(store).toggled();
    store.set(THEME_KEY, next.as_str())?;
    info!("Theme changed to: {}", next.as_str());
    Ok(next)
}

#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: RwLock<HashMap<String, String>>,
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        validate(key, value)?;
        if let Ok(mut values) = self.values.write() {
            values.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }

    fn all(&self) -> HashMap<String, String> {
        self.values.read().map(|v| v.clone()).unwrap_or_default()
    }
}

/// JSON file backed store. Read once at startup, rewritten on every change.
#[derive(Debug)]
pub struct JsonFilePreferenceStore {
    path: PathBuf,
    values: RwLock<HashMap<String, String>>,
}

impl JsonFilePreferenceStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PreferenceError> {
        let path = path.as_ref().to_path_buf();
        let values = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => HashMap::new(),
            Ok(raw) => serde_json::from_str(&raw).map_err(|source| PreferenceError::Parse {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No preference file at {}, starting empty", path.display());
                HashMap::new()
            }
            Err(source) => return Err(PreferenceError::Io { path, source }),
        };
        info!("Loaded {} preferences from {}", values.len(), path.display());
        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    fn persist(&self, values: &HashMap<String, String>) -> Result<(), PreferenceError> {
        let io_err = |source| PreferenceError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }
        let json = serde_json::to_string_pretty(values).map_err(|source| PreferenceError::Parse {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, json).map_err(io_err)
    }
}

impl PreferenceStore for JsonFilePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        validate(key, value)?;
        let mut values = match self.values.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!("Preference lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        values.insert(key.to_string(), value.to_string());
        self.persist(&values)
    }

    fn all(&self) -> HashMap<String, String> {
        self.values.read().map(|v| v.clone()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_validates_known_keys() {
        let store = MemoryPreferenceStore::default();
        store.set(LANGUAGE_KEY, "hi").unwrap();
        assert_eq!(store.get(LANGUAGE_KEY).as_deref(), Some("hi"));
        assert!(matches!(
            store.set(THEME_KEY, "purple"),
            Err(PreferenceError::InvalidValue { .. })
        ));
        store.set("font", "large").unwrap();
        assert_eq!(store.all().len(), 2);
    }

    #[test]
    fn theme_toggle_flips_and_persists() {
        let store = MemoryPreferenceStore::default();
        assert_eq!(current_theme(&store), Theme::Light);
        assert_eq!(toggle_theme(&store).unwrap(), Theme::Dark);
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("dark"));
        assert_eq!(toggle_theme(&store).unwrap(), Theme::Light);
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        let store = JsonFilePreferenceStore::open(&path).unwrap();
        assert!(store.all().is_empty());
        store.set(THEME_KEY, "dark").unwrap();
        store.set(LANGUAGE_KEY, "mr").unwrap();

        let reopened = JsonFilePreferenceStore::open(&path).unwrap();
        assert_eq!(reopened.get(THEME_KEY).as_deref(), Some("dark"));
        assert_eq!(reopened.get(LANGUAGE_KEY).as_deref(), Some("mr"));
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            JsonFilePreferenceStore::open(&path),
            Err(PreferenceError::Parse { .. })
        ));
    }
}
