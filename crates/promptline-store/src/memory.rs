//! Process-local store, useful for tests and single-session CLIs.

use std::collections::HashMap;
use std::sync::Mutex;

use promptline_core::generic::Turn;

use crate::{ConversationStore, StoreError};

/// Conversations held in a mutex-guarded map.
///
/// The mutex is what serialises concurrent appends to the same id; read and
/// append both take the lock, so read-after-append visibility is immediate.
#[derive(Debug, Default)]
pub struct MemoryStore {
    conversations: Mutex<HashMap<String, Vec<Turn>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConversationStore for MemoryStore {
    fn append(&self, conversation_id: &str, turn: Turn) -> Result<(), StoreError> {
        let mut conversations = self
            .conversations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        conversations
            .entry(conversation_id.to_owned())
            .or_default()
            .push(turn);
        Ok(())
    }

    fn read(&self, conversation_id: &str) -> Result<Vec<Turn>, StoreError> {
        let conversations = self
            .conversations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(conversations
            .get(conversation_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unseen_id_reads_empty() {
        let store = MemoryStore::new();
        assert!(store.read("nope").unwrap().is_empty());
    }

    #[test]
    fn append_then_read_yields_the_turn() {
        let store = MemoryStore::new();
        store.append("1", Turn::user("hello")).unwrap();
        let turns = store.read("1").unwrap();
        assert_eq!(turns, vec![Turn::user("hello")]);
    }

    #[test]
    fn interleaved_appends_preserve_call_order() {
        let store = MemoryStore::new();
        store.append("1", Turn::user("hello")).unwrap();
        store.append("2", Turn::user("other conversation")).unwrap();
        store.append("1", Turn::assistant("hi there")).unwrap();
        store.append("1", Turn::user("how are you")).unwrap();

        let turns = store.read("1").unwrap();
        assert_eq!(
            turns,
            vec![
                Turn::user("hello"),
                Turn::assistant("hi there"),
                Turn::user("how are you"),
            ]
        );
        assert_eq!(store.read("2").unwrap().len(), 1);
    }
}
