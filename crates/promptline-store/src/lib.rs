//! Append-only conversation persistence.
//!
//! A [`ConversationStore`] groups [`Turn`]s under a caller-supplied
//! conversation id.  The contract is deliberately small:
//!
//! * `append` adds one turn at the end of the conversation; turns are
//!   immutable once written and never deleted by this crate (deletion is an
//!   operational concern of the backing storage).
//! * `read` returns all turns **in the exact order appended**; an id that has
//!   never been seen reads as an empty sequence, not an error.
//! * An append is visible to a `read` issued afterwards by the same process.
//!
//! Serialisation of concurrent appends to the *same* id is **delegated to the
//! backing store** (here: the `Mutex` guarding the process-local map or file
//! handle).  The store performs no cross-process locking of its own; two
//! processes appending to one JSONL file coordinate through the operating
//! system’s append semantics, nothing more.
//!
//! Two implementations ship with the crate: [`MemoryStore`] for tests and
//! short-lived CLI sessions, and [`JsonlStore`] for durable, file-backed
//! history.

pub mod jsonl;
pub mod memory;

use promptline_core::generic::Turn;
use thiserror::Error;

pub use jsonl::JsonlStore;
pub use memory::MemoryStore;

/// Errors a store can surface.  These are the “truly unexpected faults” of
/// the error policy: unlike provider failures they may propagate to the
/// request handler, which turns them into a user-visible error response.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt stored record: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// The conversation id contains characters the backend cannot map to a
    /// storage key (for the JSONL store: anything outside `[A-Za-z0-9._-]`).
    #[error("invalid conversation id `{0}`")]
    InvalidId(String),
}

/// Ordered, append-only turn storage keyed by conversation id.
pub trait ConversationStore: Send + Sync {
    fn append(&self, conversation_id: &str, turn: Turn) -> Result<(), StoreError>;

    fn read(&self, conversation_id: &str) -> Result<Vec<Turn>, StoreError>;
}
