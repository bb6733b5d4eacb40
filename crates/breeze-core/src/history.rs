//! Newest-first JSON history files.
//!
//! Each file holds one pretty-printed JSON array. Appends read the whole
//! array, put the new entry at the front and rewrite the file. There is no
//! locking: the program is single-process and interactive.

use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Outcome of reading a history file for display.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryRead<T> {
    /// The file does not exist yet.
    Missing,
    /// The file exists but is not a JSON array of entries.
    Corrupt(String),
    /// The file holds an empty array.
    Empty,
    /// Stored entries, newest first.
    Entries(Vec<T>),
}

impl<T> HistoryRead<T> {
    /// Entries if any were read, otherwise an empty vec.
    pub fn into_entries(self) -> Vec<T> {
        match self {
            HistoryRead::Entries(entries) => entries,
            _ => Vec::new(),
        }
    }
}

/// Append-only store for one history file, generic over the entry type.
pub struct HistoryStore<T> {
    path: PathBuf,
    _entry: PhantomData<fn() -> T>,
}

impl<T> HistoryStore<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _entry: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all stored entries, newest first.
    pub fn read_all(&self) -> HistoryRead<T> {
        let raw = match self.read_raw() {
            Ok(Some(raw)) => raw,
            Ok(None) => return HistoryRead::Missing,
            Err(reason) => return HistoryRead::Corrupt(reason),
        };
        if raw.is_empty() {
            return HistoryRead::Empty;
        }
        match raw
            .into_iter()
            .map(serde_json::from_value::<T>)
            .collect::<serde_json::Result<Vec<T>>>()
        {
            Ok(entries) => HistoryRead::Entries(entries),
            Err(e) => HistoryRead::Corrupt(e.to_string()),
        }
    }

    /// Insert `entry` at the front and rewrite the file.
    ///
    /// Stored elements are carried over untouched, so a valid array keeps
    /// every earlier element and any extra fields. A missing file starts a
    /// new history. A file that is not a JSON array is discarded and replaced
    /// by a history holding only `entry`.
    pub fn append(&self, entry: T) -> Result<()> {
        let mut entries = match self.read_raw() {
            Ok(Some(raw)) => raw,
            Ok(None) => Vec::new(),
            Err(reason) => {
                tracing::warn!(
                    "History file {} is unreadable ({reason}); starting a new history",
                    self.path.display()
                );
                Vec::new()
            }
        };
        let entry = serde_json::to_value(&entry).context("serialize history entry")?;
        entries.insert(0, entry);
        self.write(&entries)?;
        tracing::debug!(
            "Appended entry to {} ({} total)",
            self.path.display(),
            entries.len()
        );
        Ok(())
    }

    /// The stored array as raw JSON. `Ok(None)` when the file does not exist,
    /// `Err` with a reason when it cannot be read or is not a JSON array.
    fn read_raw(&self) -> std::result::Result<Option<Vec<Value>>, String> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.to_string()),
        };
        serde_json::from_str::<Vec<Value>>(&contents)
            .map(Some)
            .map_err(|e| e.to_string())
    }

    fn write(&self, entries: &[Value]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create '{}'", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(entries).context("serialize history")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("failed to write history '{}'", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{ChatEntry, WeatherEntry};
    use tempfile::TempDir;

    fn weather(city: &str, temperature: &str) -> WeatherEntry {
        WeatherEntry {
            timestamp: "2026-01-01 10:00:00".into(),
            name: "Ana".into(),
            city: city.into(),
            temperature: temperature.into(),
            weather: "Sunny".into(),
            advice: "Drink water.".into(),
            joke: String::new(),
        }
    }

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let store: HistoryStore<WeatherEntry> = HistoryStore::new(dir.path().join("h.json"));
        assert_eq!(store.read_all(), HistoryRead::Missing);
    }

    #[test]
    fn test_read_empty_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("h.json");
        std::fs::write(&path, "[]").unwrap();
        let store: HistoryStore<WeatherEntry> = HistoryStore::new(&path);
        assert_eq!(store.read_all(), HistoryRead::Empty);
    }

    #[test]
    fn test_read_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("h.json");
        std::fs::write(&path, "[{\"city\": ").unwrap();
        let store: HistoryStore<WeatherEntry> = HistoryStore::new(&path);
        assert!(matches!(store.read_all(), HistoryRead::Corrupt(_)));
    }

    #[test]
    fn test_read_object_instead_of_array_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("h.json");
        std::fs::write(&path, "{\"city\": \"Paris\"}").unwrap();
        let store: HistoryStore<WeatherEntry> = HistoryStore::new(&path);
        assert!(matches!(store.read_all(), HistoryRead::Corrupt(_)));
    }

    #[test]
    fn test_append_to_missing_file_creates_singleton() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("h.json");
        let store = HistoryStore::new(&path);
        store.append(weather("Paris", "10°C")).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw.as_array().unwrap().len(), 1);
        assert_eq!(store.read_all(), HistoryRead::Entries(vec![weather("Paris", "10°C")]));
    }

    #[test]
    fn test_append_reads_back_newest_first() {
        let dir = TempDir::new().unwrap();
        let store = HistoryStore::new(dir.path().join("h.json"));
        for city in ["Oslo", "Lima", "Kyiv"] {
            store.append(weather(city, "1°C")).unwrap();
        }

        let cities: Vec<String> = store
            .read_all()
            .into_entries()
            .into_iter()
            .map(|e| e.city)
            .collect();
        assert_eq!(cities, vec!["Kyiv", "Lima", "Oslo"]);
    }

    #[test]
    fn test_append_to_empty_array_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("h.json");
        std::fs::write(&path, "[]").unwrap();
        let store = HistoryStore::new(&path);
        store.append(weather("Paris", "10°C")).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["city"], "Paris");
        assert_eq!(value[0]["temperature"], "10°C");
        // Non-ASCII kept literal, two-space indent.
        assert!(raw.contains("10°C"));
        assert!(raw.starts_with("[\n  {\n    \"timestamp\""));
    }

    #[test]
    fn test_append_to_corrupt_file_starts_fresh() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("h.json");
        std::fs::write(&path, "this is not json").unwrap();
        let store = HistoryStore::new(&path);
        store.append(weather("Rome", "20°C")).unwrap();

        let entries = store.read_all().into_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].city, "Rome");
    }

    #[test]
    fn test_lenient_entries_with_missing_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("h.json");
        std::fs::write(&path, r#"[{"city": "Paris"}]"#).unwrap();
        let store: HistoryStore<WeatherEntry> = HistoryStore::new(&path);
        let entries = store.read_all().into_entries();
        assert_eq!(entries[0].city, "Paris");
        assert_eq!(entries[0].timestamp, "");
        assert_eq!(entries[0].joke, "");
    }

    #[test]
    fn test_chat_history_is_independent() {
        let dir = TempDir::new().unwrap();
        let chats = HistoryStore::new(dir.path().join("chat.json"));
        let weathers: HistoryStore<WeatherEntry> =
            HistoryStore::new(dir.path().join("weather.json"));

        chats
            .append(ChatEntry {
                timestamp: "2026-01-01 10:00:00".into(),
                user: "Ana".into(),
                user_message: "hi".into(),
                ai_response: "hello".into(),
            })
            .unwrap();

        assert_eq!(weathers.read_all(), HistoryRead::Missing);
        let entries = chats.read_all().into_entries();
        assert_eq!(entries[0].ai_response, "hello");
    }
    #[test]
    fn test_append_keeps_entries_with_null_and_number_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("h.json");
        std::fs::write(
            &path,
            r#"[{"timestamp": "t", "city": "Oslo", "joke": null, "mood": "calm"},
                {"city": "Lima", "temperature": 12}]"#,
        )
        .unwrap();
        let store: HistoryStore<WeatherEntry> = HistoryStore::new(&path);

        let before = store.read_all().into_entries();
        assert_eq!(before.len(), 2);
        assert_eq!(before[0].joke, "");
        assert_eq!(before[1].temperature, "12");

        store.append(weather("Paris", "10°C")).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw.as_array().unwrap().len(), 3);
        assert_eq!(raw[0]["city"], "Paris");
        assert_eq!(raw[1]["city"], "Oslo");
        // Stored elements are not rewritten through the entry type.
        assert_eq!(raw[1]["mood"], "calm");
        assert!(raw[1]["joke"].is_null());
        assert_eq!(raw[2]["temperature"], 12);

        let cities: Vec<String> = store
            .read_all()
            .into_entries()
            .into_iter()
            .map(|e| e.city)
            .collect();
        assert_eq!(cities, vec!["Paris", "Oslo", "Lima"]);
    }

    #[test]
    fn test_append_keeps_array_with_non_object_elements() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("h.json");
        std::fs::write(&path, r#"[{"city": "Oslo"}, 7]"#).unwrap();
        let store: HistoryStore<WeatherEntry> = HistoryStore::new(&path);
        assert!(matches!(store.read_all(), HistoryRead::Corrupt(_)));

        store.append(weather("Paris", "10°C")).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw.as_array().unwrap().len(), 3);
        assert_eq!(raw[2], 7);
    }
}
