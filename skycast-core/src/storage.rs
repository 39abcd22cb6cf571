//! Persisted key-value state: favorites and display preferences.
//!
//! Everything the dashboard remembers between runs goes through the
//! [`KeyValueStore`] port as plain strings, one entry per concern:
//! `favorites` (a JSON array of city names), `unit`, and `theme`. Every
//! mutation rewrites the whole entry.

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use std::{collections::BTreeMap, fs, path::PathBuf};

use crate::model::{TemperatureUnit, Theme};

pub const FAVORITES_KEY: &str = "favorites";
pub const UNIT_KEY: &str = "unit";
pub const THEME_KEY: &str = "theme";

/// String key-value persistence port.
///
/// Implementations persist on every `set`; `set` itself cannot fail, a
/// backend that hits an I/O error logs it and keeps the in-memory value.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// [`KeyValueStore`] backed by a TOML map in the platform data directory.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at the default platform location, loading any
    /// previously persisted entries.
    pub fn open() -> Result<Self> {
        Self::open_at(Self::state_file_path()?)
    }

    /// Open a store at an explicit path.
    pub fn open_at(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            return Ok(Self { path, entries: BTreeMap::new() });
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read state file: {}", path.display()))?;

        let entries: BTreeMap<String, String> = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse state file: {}", path.display()))?;

        Ok(Self { path, entries })
    }

    /// Path to the state file.
    pub fn state_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform data directory"))?;

        Ok(dirs.data_dir().join("state.toml"))
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create state directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(&self.entries).context("Failed to serialize state to TOML")?;

        fs::write(&self.path, toml)
            .with_context(|| format!("Failed to write state file: {}", self.path.display()))?;

        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
        if let Err(err) = self.persist() {
            tracing::warn!("could not persist state: {err:#}");
        }
    }
}

/// In-memory [`KeyValueStore`] for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

/// Current favorites, oldest first. A missing or malformed entry reads as
/// an empty list.
pub fn favorites<S: KeyValueStore + ?Sized>(store: &S) -> Vec<String> {
    store
        .get(FAVORITES_KEY)
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default()
}

/// Append a city unless it is already present (case-sensitive exact match).
pub fn add_favorite<S: KeyValueStore + ?Sized>(store: &mut S, city: &str) {
    let mut favorites = favorites(store);
    if favorites.iter().any(|c| c == city) {
        return;
    }

    favorites.push(city.to_string());
    save_favorites(store, &favorites);
}

/// Remove the first exact match of a city; no-op when absent.
pub fn remove_favorite<S: KeyValueStore + ?Sized>(store: &mut S, city: &str) {
    let mut favorites = favorites(store);
    let Some(index) = favorites.iter().position(|c| c == city) else {
        return;
    };

    favorites.remove(index);
    save_favorites(store, &favorites);
}

fn save_favorites<S: KeyValueStore + ?Sized>(store: &mut S, favorites: &[String]) {
    match serde_json::to_string(favorites) {
        Ok(raw) => store.set(FAVORITES_KEY, &raw),
        Err(err) => tracing::warn!("could not serialize favorites: {err}"),
    }
}

pub fn load_unit<S: KeyValueStore + ?Sized>(store: &S) -> TemperatureUnit {
    match store.get(UNIT_KEY).as_deref() {
        Some("fahrenheit") => TemperatureUnit::Fahrenheit,
        _ => TemperatureUnit::Celsius,
    }
}

pub fn save_unit<S: KeyValueStore + ?Sized>(store: &mut S, unit: TemperatureUnit) {
    store.set(UNIT_KEY, unit.as_str());
}

pub fn load_theme<S: KeyValueStore + ?Sized>(store: &S) -> Theme {
    match store.get(THEME_KEY).as_deref() {
        Some("dark") => Theme::Dark,
        _ => Theme::Light,
    }
}

pub fn save_theme<S: KeyValueStore + ?Sized>(store: &mut S, theme: Theme) {
    store.set(THEME_KEY, theme.as_str());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_favorites_read_as_empty() {
        let store = MemoryStore::new();
        assert!(favorites(&store).is_empty());
    }

    #[test]
    fn malformed_favorites_recover_as_empty() {
        let mut store = MemoryStore::new();
        store.set(FAVORITES_KEY, "not json at all {");

        assert!(favorites(&store).is_empty());
    }

    #[test]
    fn add_is_idempotent() {
        let mut store = MemoryStore::new();
        add_favorite(&mut store, "Paris");
        add_favorite(&mut store, "Paris");

        assert_eq!(favorites(&store), vec!["Paris".to_string()]);
    }

    #[test]
    fn remove_absent_is_a_noop() {
        let mut store = MemoryStore::new();
        remove_favorite(&mut store, "Tokyo");

        assert!(favorites(&store).is_empty());
    }

    #[test]
    fn remove_preserves_survivor_order() {
        let mut store = MemoryStore::new();
        add_favorite(&mut store, "A");
        add_favorite(&mut store, "B");
        remove_favorite(&mut store, "A");

        assert_eq!(favorites(&store), vec!["B".to_string()]);
    }

    #[test]
    fn listing_twice_without_mutation_is_stable() {
        let mut store = MemoryStore::new();
        add_favorite(&mut store, "Lisbon");
        add_favorite(&mut store, "Oslo");

        assert_eq!(favorites(&store), favorites(&store));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let mut store = MemoryStore::new();
        add_favorite(&mut store, "paris");
        add_favorite(&mut store, "Paris");

        assert_eq!(favorites(&store), vec!["paris".to_string(), "Paris".to_string()]);
    }

    #[test]
    fn preferences_default_and_roundtrip() {
        let mut store = MemoryStore::new();

        assert_eq!(load_unit(&store), TemperatureUnit::Celsius);
        assert_eq!(load_theme(&store), Theme::Light);

        save_unit(&mut store, TemperatureUnit::Fahrenheit);
        save_theme(&mut store, Theme::Dark);

        assert_eq!(load_unit(&store), TemperatureUnit::Fahrenheit);
        assert_eq!(load_theme(&store), Theme::Dark);
    }

    #[test]
    fn unknown_preference_values_fall_back_to_defaults() {
        let mut store = MemoryStore::new();
        store.set(UNIT_KEY, "kelvin");
        store.set(THEME_KEY, "sepia");

        assert_eq!(load_unit(&store), TemperatureUnit::Celsius);
        assert_eq!(load_theme(&store), Theme::Light);
    }

    #[test]
    fn file_store_roundtrips_through_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("state.toml");

        let mut store = FileStore::open_at(path.clone()).expect("open");
        add_favorite(&mut store, "London");
        save_unit(&mut store, TemperatureUnit::Fahrenheit);

        let reopened = FileStore::open_at(path).expect("reopen");
        assert_eq!(favorites(&reopened), vec!["London".to_string()]);
        assert_eq!(load_unit(&reopened), TemperatureUnit::Fahrenheit);
    }

    #[test]
    fn file_store_starts_empty_when_file_is_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::open_at(dir.path().join("absent.toml")).expect("open");

        assert!(favorites(&store).is_empty());
    }
}
