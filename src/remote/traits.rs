//! Backend contract definitions
//!
//! All durable state lives behind this boundary. `create_node` is
//! fire-and-forget: a successful call means the write will eventually
//! be visible in `fetch_tree`, not that it already is.

use crate::charts::{ChartKind, ChartRow};
use crate::detail::{DetailQuery, DetailRow};
use crate::tree::{Level, Node, NodeId};
use async_trait::async_trait;
use thiserror::Error;

/// Errors from a single remote call. No call is retried automatically.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("decode error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The server answered but rejected the request. Carries the
    /// server's message verbatim so callers can classify it.
    #[error("rejected by server: {message}")]
    Rejected { message: String },
}

/// Result type for remote operations
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Substring the backend embeds in rejection messages when the entity
/// being created already exists. Duplicates arrive in-band as rejection
/// text, not as a distinct status, so classification is by message.
pub const DUPLICATE_MARKER: &str = "already exists";

impl RemoteError {
    /// True when the server rejected a write because the entity exists.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, RemoteError::Rejected { message } if message.contains(DUPLICATE_MARKER))
    }
}

/// The coverage backend, as the dashboard consumes it.
///
/// Implementations must be thread-safe (Send + Sync); one instance is
/// shared across the whole session.
#[async_trait]
pub trait BusinessApi: Send + Sync {
    /// Fetch the full current flat node list. No pagination, no filters.
    async fn fetch_tree(&self) -> RemoteResult<Vec<Node>>;

    /// Create one node at the given level.
    ///
    /// The backend does not return the assigned id; callers that need it
    /// must re-fetch the tree and match on (name, parent).
    async fn create_node(
        &self,
        level: Level,
        name: &str,
        parent_id: Option<&NodeId>,
        uuid: Option<&str>,
    ) -> RemoteResult<()>;

    /// Fetch one of the four dashboard chart series.
    async fn fetch_chart(&self, kind: ChartKind) -> RemoteResult<Vec<ChartRow>>;

    /// Fetch the filtered/sorted project detail rows.
    async fn fetch_project_details(&self, query: &DetailQuery) -> RemoteResult<Vec<DetailRow>>;
}
