//! In-memory conversation thread storage.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use anyhow::Result;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::llm::Message;

use super::ThreadStore;

/// In-memory [`ThreadStore`] backed by a `HashMap`.
///
/// Thread ids are `thread_<n>` where `n` starts at the process boot time in
/// epoch milliseconds and increments atomically per created thread, so ids
/// stay distinct even when two threads are created inside the same
/// millisecond.
///
/// Reads and writes on one thread id are not transactional: two concurrent
/// requests against the same thread can interleave between `get` and `set`,
/// and the last writer wins. Callers that need stronger guarantees need a
/// different backend.
#[derive(Debug)]
pub struct MemoryThreadStore {
    threads: RwLock<HashMap<String, Vec<Message>>>,
    next_id: AtomicI64,
}

impl Default for MemoryThreadStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryThreadStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            threads: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(Utc::now().timestamp_millis()),
        }
    }

    /// Get the number of stored threads.
    pub async fn len(&self) -> usize {
        self.threads.read().await.len()
    }

    /// Check if there are no threads.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait::async_trait]
impl ThreadStore for MemoryThreadStore {
    async fn get(&self, thread_id: &str) -> Result<Option<Vec<Message>>> {
        let guard = self.threads.read().await;
        Ok(guard.get(thread_id).cloned())
    }

    async fn set(&self, thread_id: &str, messages: Vec<Message>) -> Result<()> {
        let mut guard = self.threads.write().await;
        guard.insert(thread_id.to_string(), messages);
        Ok(())
    }

    async fn create(&self) -> Result<String> {
        let id = format!("thread_{}", self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut guard = self.threads.write().await;
        guard.insert(id.clone(), Vec::new());
        Ok(id)
    }
}
