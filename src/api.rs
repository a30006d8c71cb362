//! Transport-independent API layer.
//!
//! `DashboardApi` is the single entry point for all consumer-facing
//! operations. Transports (the CLI, an embedding UI) call `DashboardApi`
//! methods — they never reach into the `Resolver`, the `TreeStore`, or
//! the remote boundary directly.

use std::sync::Arc;

use crate::charts::{ChartKind, ChartRow};
use crate::create::{CreationIntent, CreationResult, Resolver};
use crate::detail::{DetailQuery, DetailRow};
use crate::remote::{BusinessApi, RemoteResult};
use crate::tree::{Node, TreeNode, TreeStore};

/// Single entry point for all consumer-facing operations.
#[derive(Clone)]
pub struct DashboardApi {
    remote: Arc<dyn BusinessApi>,
    store: TreeStore,
    resolver: Arc<Resolver>,
}

impl DashboardApi {
    /// Create a new API instance over the given backend.
    pub fn new(remote: Arc<dyn BusinessApi>) -> Self {
        let store = TreeStore::new();
        let resolver = Arc::new(Resolver::new(remote.clone(), store.clone()));
        Self {
            remote,
            store,
            resolver,
        }
    }

    // --- Write ---

    /// Create a classification node or project, creating and resolving
    /// missing ancestors first. The cached tree is refreshed whether or
    /// not the chain succeeds.
    pub async fn create_entity(&self, intent: CreationIntent) -> CreationResult<()> {
        self.resolver.create_entity(intent).await
    }

    // --- Tree reads ---

    /// Re-fetch the tree snapshot and replace the session cache.
    pub async fn refresh_tree(&self) -> RemoteResult<()> {
        self.store.refresh(self.remote.as_ref()).await
    }

    /// Current cached flat snapshot.
    pub fn snapshot(&self) -> Vec<Node> {
        self.store.snapshot()
    }

    /// Display forest built from the current cached snapshot.
    pub fn forest(&self) -> Vec<TreeNode> {
        self.store.forest()
    }

    // --- Dashboard reads ---

    /// Fetch one of the dashboard chart series.
    pub async fn chart(&self, kind: ChartKind) -> RemoteResult<Vec<ChartRow>> {
        self.remote.fetch_chart(kind).await
    }

    /// Fetch the filtered/sorted project detail rows.
    pub async fn project_details(&self, query: &DetailQuery) -> RemoteResult<Vec<DetailRow>> {
        self.remote.fetch_project_details(query).await
    }
}
