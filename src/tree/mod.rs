//! Project classification tree: flat node records and forest construction

mod build;
mod node;
mod store;


pub use build::{build_forest, TreeNode};
pub use node::{children_of, find_named, level_of, roots, Level, Node, NodeId};
pub use store::TreeStore;
