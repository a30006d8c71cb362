//! Arbor: coverage dashboard core
//!
//! Client-side core for an administrative code-coverage dashboard built
//! around a three-level project hierarchy (business line → sub-line →
//! project).
//!
//! # Core Concepts
//!
//! - **Snapshot**: the full flat node list fetched from the backend at
//!   one point in time; always replaced wholesale, never merged.
//! - **Forest**: the display tree derived from a snapshot by
//!   [`build_forest`].
//! - **Resolution**: discovering a freshly created node's
//!   server-assigned id by re-fetching the snapshot and matching on
//!   (name, parent) — the backend's create endpoint does not return it.
//!
//! # Example
//!
//! ```
//! use arbor::{build_forest, Node};
//!
//! let snapshot = vec![
//!     Node::new("1", "Finance"),
//!     Node::new("1-1", "Lending").with_parent("1"),
//! ];
//! let forest = build_forest(&snapshot);
//! assert_eq!(forest.len(), 1);
//! assert_eq!(forest[0].children[0].name, "Lending");
//! ```

pub mod api;
pub mod charts;
pub mod create;
pub mod detail;
pub mod remote;
mod tree;

pub use api::DashboardApi;
pub use charts::{ChartKind, ChartRow};
pub use create::{CreationError, CreationIntent, CreationResult, ParentRef, Resolver};
pub use detail::{DetailQuery, DetailRow, SortKey, SortOrder};
pub use remote::{BusinessApi, HttpBusinessApi, RemoteError, RemoteResult};
pub use tree::{
    build_forest, children_of, find_named, level_of, roots, Level, Node, NodeId, TreeNode,
    TreeStore,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
