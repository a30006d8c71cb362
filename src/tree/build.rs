//! Forest construction from a flat snapshot

use super::node::{Node, NodeId};
use std::collections::HashMap;

/// A display node: one snapshot entry with its linked children.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub id: NodeId,
    pub name: String,
    pub jump_url: Option<String>,
    pub children: Vec<TreeNode>,
}

/// Build the display forest from a flat snapshot.
///
/// Two passes: index every node by id, then link each node under its
/// parent. A node whose `parent_id` is absent or references nothing in
/// the snapshot becomes a root; that is a degradation, not an error.
/// Relative input order is preserved among roots and within every
/// children list. Pure and idempotent — safe to re-run on every
/// snapshot refresh.
pub fn build_forest(snapshot: &[Node]) -> Vec<TreeNode> {
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(snapshot.len());
    for (i, node) in snapshot.iter().enumerate() {
        index.entry(node.id.as_str()).or_insert(i);
    }

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); snapshot.len()];
    let mut roots: Vec<usize> = Vec::new();
    for (i, node) in snapshot.iter().enumerate() {
        let parent = node
            .parent_id
            .as_ref()
            .and_then(|pid| index.get(pid.as_str()).copied());
        match parent {
            // A node naming itself as parent would otherwise become its
            // own child; demote it to a root instead.
            Some(p) if p != i => children[p].push(i),
            _ => roots.push(i),
        }
    }

    roots
        .into_iter()
        .map(|i| assemble(snapshot, &children, i))
        .collect()
}

fn assemble(snapshot: &[Node], children: &[Vec<usize>], i: usize) -> TreeNode {
    let node = &snapshot[i];
    TreeNode {
        id: node.id.clone(),
        name: node.name.clone(),
        jump_url: node.jump_url.clone(),
        children: children[i]
            .iter()
            .map(|&c| assemble(snapshot, children, c))
            .collect(),
    }
}

impl TreeNode {
    /// Total number of nodes in this subtree, including self.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(TreeNode::size).sum::<usize>()
    }
}
