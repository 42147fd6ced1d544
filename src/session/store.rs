//! Durable session storage.
//!
//! Sessions are kept behind a small string key-value interface so the medium
//! (memory, a directory of JSON files, anything else) can change without
//! touching session logic. Writes are last-write-wins; two processes playing
//! the same quiz against the same store race without conflict detection.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use log::{debug, warn};
use thiserror::Error;

use crate::models::SessionRecord;

const KEY_PREFIX: &str = "wizi:quiz-session:";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage io error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode session: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Minimal string key-value medium.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn delete(&self, key: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        (**self).delete(key)
    }
}

/// In-process store; contents are lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.remove(key);
        Ok(())
    }
}

/// One JSON file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens the store, creating the directory if needed.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Keeps ASCII alphanumerics and `-`; every other byte becomes `_XX` (hex),
    /// so distinct keys always map to distinct files.
    fn path_for(&self, key: &str) -> PathBuf {
        let mut file_name = String::with_capacity(key.len());
        for byte in key.bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' {
                file_name.push(char::from(byte));
            } else {
                file_name.push_str(&format!("_{:02X}", byte));
            }
        }
        self.dir.join(format!("{}.json", file_name))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        // Write-then-rename: readers never observe a partial record.
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Session records on top of a [`KeyValueStore`], one entry per quiz id.
#[derive(Debug, Clone)]
pub struct SessionStore<S> {
    kv: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    pub fn key(quiz_id: &str) -> String {
        format!("{}{}", KEY_PREFIX, quiz_id)
    }

    /// Overwrites the whole record, stamping `last_updated`.
    pub fn save(&self, quiz_id: &str, record: &SessionRecord) -> Result<(), StoreError> {
        let mut record = record.clone();
        record.last_updated = Utc::now();
        let json = serde_json::to_string(&record)?;
        self.kv.set(&Self::key(quiz_id), &json)
    }

    /// Reads the record for a quiz. A malformed entry reads as absent.
    pub fn load(&self, quiz_id: &str) -> Result<Option<SessionRecord>, StoreError> {
        let Some(json) = self.kv.get(&Self::key(quiz_id))? else {
            return Ok(None);
        };
        match serde_json::from_str(&json) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                warn!("Discarding unreadable session for quiz {}: {}", quiz_id, e);
                Ok(None)
            }
        }
    }

    pub fn clear(&self, quiz_id: &str) -> Result<(), StoreError> {
        debug!("Clearing stored session for quiz {}", quiz_id);
        self.kv.delete(&Self::key(quiz_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnswerValue;

    fn record() -> SessionRecord {
        let mut record = SessionRecord::new(vec!["q1".into(), "q2".into()]);
        record.answers.insert("q1".into(), AnswerValue::many(["a"]));
        record.current_index = 1;
        record.time_spent = 17;
        record
    }

    #[test]
    fn test_save_then_load() {
        let store = SessionStore::new(MemoryStore::new());
        let saved = record();
        store.save("42", &saved).unwrap();

        let loaded = store.load("42").unwrap().unwrap();
        assert_eq!(loaded.question_ids, saved.question_ids);
        assert_eq!(loaded.answers, saved.answers);
        assert_eq!(loaded.current_index, saved.current_index);
        assert_eq!(loaded.time_spent, saved.time_spent);
    }

    #[test]
    fn test_clear_and_malformed() {
        let kv = Arc::new(MemoryStore::new());
        let store = SessionStore::new(Arc::clone(&kv));
        store.save("1", &record()).unwrap();
        store.clear("1").unwrap();
        assert!(store.load("1").unwrap().is_none());
        assert!(kv.is_empty());

        kv.set(&SessionStore::<MemoryStore>::key("1"), "{not json").unwrap();
        assert!(store.load("1").unwrap().is_none());
    }

    #[test]
    fn test_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(FileStore::open(dir.path()).unwrap());
        store.save("quiz/7", &record()).unwrap();

        assert!(dir.path().join("wizi_3Aquiz-session_3Aquiz_2F7.json").exists());
        assert_eq!(store.load("quiz/7").unwrap().unwrap().time_spent, 17);

        store.clear("quiz/7").unwrap();
        assert!(store.load("quiz/7").unwrap().is_none());
        store.clear("quiz/7").unwrap();
    }

    #[test]
    fn test_file_store_keeps_similar_ids_apart() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(FileStore::open(dir.path()).unwrap());
        let ids = ["a/b", "a.b", "a_b", "a_2Fb"];
        for (i, id) in ids.iter().enumerate() {
            let mut saved = record();
            saved.time_spent = i as u64;
            store.save(id, &saved).unwrap();
        }

        for (i, id) in ids.iter().enumerate() {
            assert_eq!(store.load(id).unwrap().unwrap().time_spent, i as u64);
        }
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), ids.len());
    }
}
