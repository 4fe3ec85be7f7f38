//! Durable store: one JSON-lines file per conversation id.
//!
//! Each appended turn becomes one line holding the turn plus a UTC timestamp.
//! Appends open the file in append mode, so the file itself is the ordered
//! log; reads parse it line by line.  The store is opened once at startup and
//! shared by handle—dropping it releases nothing beyond ordinary file
//! descriptors, so shutdown needs no special hook.

use std::fs::{self, OpenOptions};
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use promptline_core::generic::Turn;
use serde::{Deserialize, Serialize};

use crate::{ConversationStore, StoreError};

/// On-disk record: the turn itself plus when it was appended.
#[derive(Debug, Serialize, Deserialize)]
struct StoredTurn {
    #[serde(flatten)]
    turn: Turn,
    created_at: DateTime<Utc>,
}

/// File-backed conversation store rooted at a directory.
pub struct JsonlStore {
    dir: PathBuf,
    // Serialises in-process writers so interleaved appends keep call order.
    write_lock: Mutex<()>,
}

impl JsonlStore {
    /// Open (and create, if needed) the store directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        tracing::debug!(dir = %dir.display(), "opened jsonl conversation store");
        Ok(Self {
            dir,
            write_lock: Mutex::new(()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_for(&self, conversation_id: &str) -> Result<PathBuf, StoreError> {
        let valid = !conversation_id.is_empty()
            && conversation_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
        if !valid {
            return Err(StoreError::InvalidId(conversation_id.to_owned()));
        }
        Ok(self.dir.join(format!("{conversation_id}.jsonl")))
    }
}

impl ConversationStore for JsonlStore {
    fn append(&self, conversation_id: &str, turn: Turn) -> Result<(), StoreError> {
        let path = self.file_for(conversation_id)?;
        let record = StoredTurn {
            turn,
            created_at: Utc::now(),
        };
        let line = serde_json::to_string(&record)?;

        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        writeln!(file, "{line}")?;
        Ok(())
    }

    fn read(&self, conversation_id: &str) -> Result<Vec<Turn>, StoreError> {
        let path = self.file_for(conversation_id)?;
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        raw.lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                let record: StoredTurn = serde_json::from_str(line)?;
                Ok(record.turn)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptline_core::generic::Role;

    #[test]
    fn unseen_id_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonlStore::open(dir.path()).unwrap();
        assert!(store.read("fresh").unwrap().is_empty());
    }

    #[test]
    fn appended_turns_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = JsonlStore::open(dir.path()).unwrap();
            store.append("1", Turn::user("hello")).unwrap();
            store.append("1", Turn::assistant("hi there")).unwrap();
        }

        let store = JsonlStore::open(dir.path()).unwrap();
        let turns = store.read("1").unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, Role::User);
        assert_eq!(turns[0].text(), Some("hello"));
        assert_eq!(turns[1].role, Role::Assistant);
    }

    #[test]
    fn conversations_are_isolated_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonlStore::open(dir.path()).unwrap();
        store.append("a", Turn::user("for a")).unwrap();
        store.append("b", Turn::user("for b")).unwrap();

        assert_eq!(store.read("a").unwrap().len(), 1);
        assert_eq!(store.read("b").unwrap().len(), 1);
        assert_eq!(store.read("a").unwrap()[0].text(), Some("for a"));
    }

    #[test]
    fn hostile_ids_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonlStore::open(dir.path()).unwrap();
        let err = store.append("../escape", Turn::user("x")).unwrap_err();
        assert!(matches!(err, StoreError::InvalidId(_)));
        let err = store.read("").unwrap_err();
        assert!(matches!(err, StoreError::InvalidId(_)));
    }
}
