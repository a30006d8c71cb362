//! Hierarchical node creation workflow
//!
//! The create endpoint does not return the assigned id, so a freshly
//! created ancestor is resolved by re-fetching the snapshot once and
//! matching on (name, parent). Exactly one re-fetch per created
//! ancestor, no retry or backoff: if the write is not yet visible the
//! chain fails with `ResolutionFailed`, and re-running the workflow
//! with the now-existing ancestor selected as existing converges.
//!
//! Nothing is rolled back on failure — a created ancestor outlives a
//! failed chain, by the same convergence argument.

use super::intent::{CreationError, CreationIntent, CreationResult, ParentRef};
use crate::remote::BusinessApi;
use crate::tree::{self, Level, NodeId, TreeStore};
use std::sync::Arc;
use tracing::{debug, info, Instrument};
use uuid::Uuid;

/// Orchestrates creation of classification nodes and projects.
///
/// Calls are strictly sequential; each invocation owns its resolved-id
/// locals. Concurrent invocations (double submission) are not
/// deduplicated here and must be gated by the caller.
pub struct Resolver {
    api: Arc<dyn BusinessApi>,
    store: TreeStore,
}

impl Resolver {
    pub fn new(api: Arc<dyn BusinessApi>, store: TreeStore) -> Self {
        Self { api, store }
    }

    /// Create the entity described by `intent`, creating and resolving
    /// any missing ancestors first.
    ///
    /// Whichever way the chain ends, the cached tree is refreshed as a
    /// finalization step so the session's view reflects attempted
    /// writes; a failure of that refresh is logged, never returned.
    pub async fn create_entity(&self, intent: CreationIntent) -> CreationResult<()> {
        let op = Uuid::new_v4();
        let span = tracing::info_span!(
            "create_entity",
            %op,
            level = intent.level().wire(),
            entity = intent.name(),
        );
        let result = self.run(&intent).instrument(span).await;
        self.store.refresh_logged(self.api.as_ref()).await;
        result
    }

    async fn run(&self, intent: &CreationIntent) -> CreationResult<()> {
        match intent {
            CreationIntent::Line { name } => self.create(Level::Line, name, None, None).await,
            CreationIntent::SubLine { name, parent } => {
                let line_id = self.resolve_line(parent).await?;
                self.create(Level::SubLine, name, Some(&line_id), None).await
            }
            CreationIntent::Project {
                name,
                uuid,
                line,
                sub_line,
            } => {
                let line_id = self.resolve_line(line).await?;
                let sub_line_id = self.resolve_sub_line(sub_line, &line_id).await?;
                self.create(Level::Project, name, Some(&sub_line_id), uuid.as_deref())
                    .await
            }
        }
    }

    /// Resolve the line slot: pass an existing id through, or create the
    /// line and discover its id from a fresh snapshot.
    async fn resolve_line(&self, slot: &ParentRef) -> CreationResult<NodeId> {
        match slot {
            ParentRef::Existing(id) => Ok(id.clone()),
            ParentRef::New(name) => {
                self.create(Level::Line, name, None, None).await?;
                let snapshot = self.api.fetch_tree().await?;
                let id = tree::find_named(&snapshot, name, None)
                    .map(|n| n.id.clone())
                    .ok_or_else(|| CreationError::ResolutionFailed {
                        name: name.clone(),
                        level: Level::Line.wire(),
                    })?;
                debug!(%id, name, "resolved created line");
                Ok(id)
            }
        }
    }

    /// Resolve the sub-line slot under an already-known line id.
    async fn resolve_sub_line(&self, slot: &ParentRef, line_id: &NodeId) -> CreationResult<NodeId> {
        match slot {
            ParentRef::Existing(id) => Ok(id.clone()),
            ParentRef::New(name) => {
                self.create(Level::SubLine, name, Some(line_id), None).await?;
                let snapshot = self.api.fetch_tree().await?;
                let id = tree::find_named(&snapshot, name, Some(line_id))
                    .map(|n| n.id.clone())
                    .ok_or_else(|| CreationError::ResolutionFailed {
                        name: name.clone(),
                        level: Level::SubLine.wire(),
                    })?;
                debug!(%id, name, "resolved created sub-line");
                Ok(id)
            }
        }
    }

    /// One create call. A rejection carrying the duplicate marker maps
    /// to `Duplicate`; everything else propagates as `Remote`.
    async fn create(
        &self,
        level: Level,
        name: &str,
        parent_id: Option<&NodeId>,
        uuid: Option<&str>,
    ) -> CreationResult<()> {
        match self.api.create_node(level, name, parent_id, uuid).await {
            Ok(()) => {
                info!(%level, name, "node created");
                Ok(())
            }
            Err(e) if e.is_duplicate() => Err(CreationError::Duplicate(name.to_string())),
            Err(e) => Err(e.into()),
        }
    }
}
