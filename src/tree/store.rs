//! Session-cached tree snapshot
//!
//! The dashboard holds one flat snapshot per session. It has a single
//! writer — `refresh`, which re-fetches the whole list and replaces the
//! snapshot — and any number of readers. Snapshots are replaced, never
//! merged, so readers see either the old list or the new one.

use super::build::{build_forest, TreeNode};
use super::node::Node;
use crate::remote::{BusinessApi, RemoteResult};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, warn};

/// Shared snapshot of the flat node list.
///
/// Cloning is cheap and shares the same underlying snapshot.
#[derive(Debug, Clone, Default)]
pub struct TreeStore {
    inner: Arc<RwLock<Vec<Node>>>,
}

impl TreeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with an initial snapshot (mainly for tests).
    pub fn with_snapshot(snapshot: Vec<Node>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(snapshot)),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Node>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Node>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Re-fetch the full node list and replace the cached snapshot.
    pub async fn refresh(&self, api: &dyn BusinessApi) -> RemoteResult<()> {
        let nodes = api.fetch_tree().await?;
        debug!(nodes = nodes.len(), "tree snapshot refreshed");
        *self.write() = nodes;
        Ok(())
    }

    /// Best-effort refresh for finalization paths.
    ///
    /// A failure here must not mask the primary operation's outcome, so
    /// it is logged and swallowed.
    pub async fn refresh_logged(&self, api: &dyn BusinessApi) {
        if let Err(e) = self.refresh(api).await {
            warn!(error = %e, "finalizing tree refresh failed; cached view may be stale");
        }
    }

    /// Copy of the current flat snapshot.
    pub fn snapshot(&self) -> Vec<Node> {
        self.read().clone()
    }

    /// Build the display forest from the current snapshot.
    pub fn forest(&self) -> Vec<TreeNode> {
        build_forest(&self.read())
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}
