//! Conversation thread storage.
//!
//! This module provides the storage abstraction for conversation threads and
//! the in-memory implementation used in production. A thread is an ordered
//! list of messages keyed by an opaque string token; request handlers only
//! ever see the [`ThreadStore`] trait, so a persistent backend can be swapped
//! in without touching them.
//!
//! # Architecture
//!
//! - [`ThreadStore`]: async storage seam (get / set / create)
//! - [`MemoryThreadStore`]: process-local `HashMap` implementation
//!
//! # Example
//!
//! ```rust,ignore
//! use speechbridge::session::{MemoryThreadStore, ThreadStore};
//!
//! let store = MemoryThreadStore::new();
//! let id = store.create().await?;
//! assert_eq!(store.get(&id).await?, Some(vec![]));
//! ```

mod thread;

pub use thread::MemoryThreadStore;

use anyhow::Result;
use async_trait::async_trait;

use crate::llm::Message;

/// Async storage seam for conversation threads.
///
/// Histories are read and written wholesale; there is no append operation.
/// Callers fetch, extend, and write back.
#[async_trait]
pub trait ThreadStore: Send + Sync + std::fmt::Debug {
    /// Fetch a thread's full history, or `None` if the id is unknown.
    async fn get(&self, thread_id: &str) -> Result<Option<Vec<Message>>>;

    /// Replace the stored history for `thread_id`, creating the thread if
    /// the id is unknown.
    async fn set(&self, thread_id: &str, messages: Vec<Message>) -> Result<()>;

    /// Register a new empty thread and return its id.
    async fn create(&self) -> Result<String>;
}
