//! # Results Store Module / 结果存储模块
//!
//! A keyed collection of outcomes shared by every worker of a session.
//! Insertion is atomic per key; a second outcome under the same key replaces
//! the first (last write wins).
//!
//! 会话中所有工作任务共享的、按键索引的执行结果集合。
//! 每个键的插入是原子的；同一键下的第二个结果会替换第一个（后写者胜）。

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::core::models::Outcome;

/// Shared handle to the session's outcomes. Cloning the handle shares the
/// underlying map.
#[derive(Debug, Clone, Default)]
pub struct ResultsStore {
    inner: Arc<Mutex<BTreeMap<String, Outcome>>>,
}

impl ResultsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `outcome` under its key, returning the outcome it replaced.
    pub fn insert(&self, outcome: Outcome) -> Option<Outcome> {
        let key = outcome.key();
        let replaced = self.lock().insert(key.clone(), outcome);
        if replaced.is_some() {
            tracing::warn!(%key, "outcome replaced an earlier result under the same key");
        }
        replaced
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn get(&self, key: &str) -> Option<Outcome> {
        self.lock().get(key).cloned()
    }

    /// A point-in-time copy of every outcome, ordered by key.
    pub fn snapshot(&self) -> BTreeMap<String, Outcome> {
        self.lock().clone()
    }

    // A worker that panicked while holding the lock cannot leave a half-written
    // entry behind, so the map is still usable.
    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, Outcome>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
