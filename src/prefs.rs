//! Browser-profile style settings: theme, notes and contact counters.
//!
//! Values live in a [`Storage`] as JSON text under fixed names and are read
//! and written through typed [`Key`]s. Components receive the store they use
//! instead of reaching for global state.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

pub trait Storage {
    fn get_raw(&self, name: &str) -> Option<String>;
    fn set_raw(&mut self, name: &str, value: String) -> Result<(), String>;
    fn remove(&mut self, name: &str) -> Result<(), String>;
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_raw(&self, name: &str) -> Option<String> {
        self.entries.get(name).cloned()
    }

    fn set_raw(&mut self, name: &str, value: String) -> Result<(), String> {
        self.entries.insert(name.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, name: &str) -> Result<(), String> {
        self.entries.remove(name);
        Ok(())
    }
}

/// A JSON object on disk, rewritten on every change.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStorage {
    /// Open `path`. A missing or unreadable file starts out empty.
    pub fn open(path: &Path) -> Self {
        let entries = std::fs::read_to_string(path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        FileStorage {
            path: path.to_path_buf(),
            entries,
        }
    }

    fn flush(&self) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
            }
        }
        let raw = serde_json::to_string_pretty(&self.entries).map_err(|e| e.to_string())?;
        std::fs::write(&self.path, raw)
            .map_err(|e| format!("Cannot write {}: {}", self.path.display(), e))
    }
}

impl Storage for FileStorage {
    fn get_raw(&self, name: &str) -> Option<String> {
        self.entries.get(name).cloned()
    }

    fn set_raw(&mut self, name: &str, value: String) -> Result<(), String> {
        self.entries.insert(name.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, name: &str) -> Result<(), String> {
        self.entries.remove(name);
        self.flush()
    }
}

/// Storage name bound to the type stored under it.
#[derive(Debug)]
pub struct Key<T> {
    pub name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Key<T> {
    pub const fn new(name: &'static str) -> Self {
        Key {
            name,
            _marker: PhantomData,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Icon for the toggle button: the sun offers light, the moon offers dark.
    pub fn icon(self) -> &'static str {
        match self {
            Theme::Dark => "☀️",
            Theme::Light => "🌙",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// Accepted contact submissions for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContactStats {
    pub date: Option<NaiveDate>,
    pub count: u32,
}

impl ContactStats {
    /// Counters from another day read as zero.
    pub fn for_day(self, today: NaiveDate) -> Self {
        if self.date == Some(today) {
            self
        } else {
            ContactStats {
                date: Some(today),
                count: 0,
            }
        }
    }
}

pub const THEME: Key<Theme> = Key::new("theme");
pub const NOTES: Key<String> = Key::new("guca-notes");
pub const CONTACT_STATS: Key<ContactStats> = Key::new("gucaContactStats");

pub const NOTES_SAVED_MESSAGE: &str = "Notas guardadas en este navegador.";

pub struct PersistentSettings<S: Storage> {
    storage: S,
}

impl<S: Storage> PersistentSettings<S> {
    pub fn new(storage: S) -> Self {
        PersistentSettings { storage }
    }

    /// Missing and unreadable values both come back as `None`.
    pub fn get<T: DeserializeOwned>(&self, key: &Key<T>) -> Option<T> {
        let raw = self.storage.get_raw(key.name)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("[prefs] Ignoring unreadable value for {}: {}", key.name, e);
                None
            }
        }
    }

    pub fn get_or_default<T: DeserializeOwned + Default>(&self, key: &Key<T>) -> T {
        self.get(key).unwrap_or_default()
    }

    pub fn set<T: Serialize>(&mut self, key: &Key<T>, value: &T) -> Result<(), String> {
        let raw = serde_json::to_string(value).map_err(|e| e.to_string())?;
        self.storage.set_raw(key.name, raw)
    }

    pub fn remove<T>(&mut self, key: &Key<T>) -> Result<(), String> {
        self.storage.remove(key.name)
    }

    pub fn theme(&self) -> Theme {
        self.get_or_default(&THEME)
    }

    /// Flip the theme, persist it and return the new one.
    pub fn toggle_theme(&mut self) -> Result<Theme, String> {
        let next = self.theme().toggled();
        self.set(&THEME, &next)?;
        Ok(next)
    }

    pub fn notes(&self) -> String {
        self.get_or_default(&NOTES)
    }

    pub fn save_notes(&mut self, text: &str) -> Result<&'static str, String> {
        self.set(&NOTES, &text.to_string())?;
        Ok(NOTES_SAVED_MESSAGE)
    }

    pub fn contact_stats(&self, today: NaiveDate) -> ContactStats {
        self.get_or_default(&CONTACT_STATS).for_day(today)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn test_theme_defaults_and_toggles() {
        let mut settings = PersistentSettings::new(MemoryStorage::new());
        assert_eq!(settings.theme(), Theme::Light);
        assert_eq!(settings.theme().icon(), "🌙");
        assert_eq!(settings.toggle_theme().unwrap(), Theme::Dark);
        assert_eq!(settings.theme(), Theme::Dark);
        assert_eq!(settings.theme().icon(), "☀️");
        assert_eq!(settings.storage().get_raw("theme").as_deref(), Some("\"dark\""));
    }

    #[test]
    fn test_notes_round_trip() {
        let mut settings = PersistentSettings::new(MemoryStorage::new());
        assert_eq!(settings.notes(), "");
        assert_eq!(settings.save_notes("Revisar losa").unwrap(), NOTES_SAVED_MESSAGE);
        assert_eq!(settings.notes(), "Revisar losa");
    }

    #[test]
    fn test_corrupt_value_reads_as_absent() {
        let mut storage = MemoryStorage::new();
        storage.set_raw("gucaContactStats", "{not json".into()).unwrap();
        let settings = PersistentSettings::new(storage);
        assert_eq!(settings.contact_stats(day(1)), ContactStats { date: Some(day(1)), count: 0 });
    }

    #[test]
    fn test_contact_stats_reset_on_new_day() {
        let stats = ContactStats {
            date: Some(day(1)),
            count: 4,
        };
        assert_eq!(stats.clone().for_day(day(1)).count, 4);
        assert_eq!(stats.for_day(day(2)), ContactStats { date: Some(day(2)), count: 0 });
    }

    #[test]
    fn test_file_storage_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile").join("settings.json");
        {
            let mut settings = PersistentSettings::new(FileStorage::open(&path));
            settings.toggle_theme().unwrap();
            settings.save_notes("pendiente").unwrap();
        }
        let settings = PersistentSettings::new(FileStorage::open(&path));
        assert_eq!(settings.theme(), Theme::Dark);
        assert_eq!(settings.notes(), "pendiente");
    }

    #[test]
    fn test_remove() {
        let mut settings = PersistentSettings::new(MemoryStorage::new());
        settings.set(&THEME, &Theme::Dark).unwrap();
        settings.remove(&THEME).unwrap();
        assert_eq!(settings.theme(), Theme::Light);
    }
}
