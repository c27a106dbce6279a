//! Transcript persistence.
//!
//! Each finished debate becomes one pretty-printed JSON document under the
//! debates directory, keyed by its creation timestamp. The engine only sees
//! the [`TranscriptStore`] trait; tests substitute an in-memory store.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Human-readable timestamp stored inside the record.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Compact timestamp used for record file names.
const FILE_KEY_FORMAT: &str = "%Y%m%d_%H%M%S";

/// The unit of persistence: one debate, created exactly once at session
/// termination and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebateRecord {
    pub topic: String,

    /// Creation time, `YYYY-MM-DD HH:MM:SS`. Doubles as the record key.
    pub timestamp: String,

    /// Ordered `"Role: text"` entries; the sole source of turn order.
    pub debate_history: Vec<String>,

    /// Present only when the judge call succeeded.
    pub judge_analysis: Option<String>,
}

impl DebateRecord {
    /// Build a record stamped with the current local time.
    pub fn new(topic: &str, debate_history: Vec<String>, judge_analysis: Option<String>) -> Self {
        Self {
            topic: topic.to_string(),
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            debate_history,
            judge_analysis,
        }
    }
}

/// Persistence contract consumed by the debate engine.
pub trait TranscriptStore: Send + Sync {
    /// Persist a full record; returns a handle to where it landed.
    fn save(&self, record: &DebateRecord) -> Result<PathBuf>;

    /// All saved records, newest first. An empty store is not an error.
    fn list_all(&self) -> Result<Vec<DebateRecord>>;
}

/// One JSON file per debate in a flat directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory this store writes into.
    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    /// File name derived from the record's timestamp key.
    fn file_name(record: &DebateRecord) -> String {
        let key = NaiveDateTime::parse_from_str(&record.timestamp, TIMESTAMP_FORMAT)
            .map(|dt| dt.format(FILE_KEY_FORMAT).to_string())
            .unwrap_or_else(|_| Local::now().format(FILE_KEY_FORMAT).to_string());
        format!("debate_{key}.json")
    }
}

impl TranscriptStore for FileStore {
    fn save(&self, record: &DebateRecord) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create debates directory: {:?}", self.dir))?;

        let mut path = self.dir.join(Self::file_name(record));
        // Two debates ending within the same second get distinct keys.
        let mut suffix = 1;
        while path.exists() {
            let name = Self::file_name(record).replace(".json", &format!("_{suffix}.json"));
            path = self.dir.join(name);
            suffix += 1;
        }

        let json = serde_json::to_string_pretty(record).context("Failed to serialize record")?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write debate record: {:?}", path))?;

        tracing::info!("Saved debate record: {:?}", path);
        Ok(path)
    }

    fn list_all(&self) -> Result<Vec<DebateRecord>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut records: Vec<DebateRecord> = Vec::new();
        for entry in fs::read_dir(&self.dir)
            .with_context(|| format!("Failed to read debates directory: {:?}", self.dir))?
        {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let content = match fs::read_to_string(&path) {
                Ok(c) => c,
                Err(e) => {
                    tracing::warn!("Skipping unreadable record {:?}: {}", path, e);
                    continue;
                }
            };
            match serde_json::from_str::<DebateRecord>(&content) {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!("Skipping bad record JSON {:?}: {}", path, e),
            }
        }

        // Newest first. The timestamp format sorts lexicographically.
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(topic: &str, timestamp: &str, analysis: Option<&str>) -> DebateRecord {
        DebateRecord {
            topic: topic.to_string(),
            timestamp: timestamp.to_string(),
            debate_history: vec![
                "Positive: We support it.".to_string(),
                "Negative: We oppose it.".to_string(),
            ],
            judge_analysis: analysis.map(String::from),
        }
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());

        let original = record("AI is net positive", "2025-03-01 10:30:00", Some("Verdict"));
        store.save(&original).unwrap();

        let loaded = store.list_all().unwrap();
        assert_eq!(loaded, vec![original]);
    }

    #[test]
    fn round_trips_absent_judge_analysis() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());

        let original = record("Topic", "2025-03-01 10:30:00", None);
        let path = store.save(&original).unwrap();

        // The field is serialized as an explicit null.
        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(raw["judge_analysis"].is_null());

        assert_eq!(store.list_all().unwrap(), vec![original]);
    }

    #[test]
    fn empty_store_lists_empty_not_error() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("never-created"));
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn lists_newest_first() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());

        store.save(&record("old", "2025-01-01 08:00:00", None)).unwrap();
        store.save(&record("new", "2025-06-01 08:00:00", None)).unwrap();
        store.save(&record("mid", "2025-03-01 08:00:00", None)).unwrap();

        let topics: Vec<String> = store
            .list_all()
            .unwrap()
            .into_iter()
            .map(|r| r.topic)
            .collect();
        assert_eq!(topics, vec!["new", "mid", "old"]);
    }

    #[test]
    fn same_second_records_get_distinct_files() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());

        let a = record("first", "2025-03-01 10:30:00", None);
        let b = record("second", "2025-03-01 10:30:00", None);
        let path_a = store.save(&a).unwrap();
        let path_b = store.save(&b).unwrap();

        assert_ne!(path_a, path_b);
        assert_eq!(store.list_all().unwrap().len(), 2);
    }

    #[test]
    fn bad_json_is_skipped_not_fatal() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());

        store.save(&record("good", "2025-03-01 10:30:00", None)).unwrap();
        std::fs::write(dir.path().join("debate_corrupt.json"), "{not json").unwrap();

        let loaded = store.list_all().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].topic, "good");
    }
}
