//! Flat node records as the backend serves them

use serde::{Deserialize, Serialize};

/// Opaque server-assigned node identifier.
///
/// Ids are allocated by the backend; the client never mints one. A node
/// submitted for creation has no id until it shows up in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(String);

impl NodeId {
    /// Wrap a server-assigned id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hierarchy depth, derived from a snapshot and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Business line (root, level 1)
    Line,
    /// Sub-line (level 2)
    SubLine,
    /// Leaf project (level 3)
    Project,
}

impl Level {
    /// Wire value used by the create endpoint's `level` parameter.
    pub fn wire(self) -> u8 {
        match self {
            Level::Line => 1,
            Level::SubLine => 2,
            Level::Project => 3,
        }
    }

    pub fn from_wire(value: u8) -> Option<Self> {
        match value {
            1 => Some(Level::Line),
            2 => Some(Level::SubLine),
            3 => Some(Level::Project),
            _ => None,
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.wire())
    }
}

/// One entry in the classification hierarchy (business line, sub-line,
/// or project), in the flat form the tree endpoint returns.
///
/// Field renames follow the backend's upper-case wire names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "ID")]
    pub id: NodeId,
    #[serde(rename = "NAME")]
    pub name: String,
    #[serde(rename = "PARENTID", default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<NodeId>,
    #[serde(rename = "UUID", default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(rename = "jumpUrl", default, skip_serializing_if = "Option::is_none")]
    pub jump_url: Option<String>,
}

impl Node {
    /// Create a root node record.
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_id: None,
            uuid: None,
            jump_url: None,
        }
    }

    /// Set the owning parent.
    pub fn with_parent(mut self, parent: impl Into<NodeId>) -> Self {
        self.parent_id = Some(parent.into());
        self
    }

    /// Set the external project uuid.
    pub fn with_uuid(mut self, uuid: impl Into<String>) -> Self {
        self.uuid = Some(uuid.into());
        self
    }

    /// Set the external jump link.
    pub fn with_jump_url(mut self, url: impl Into<String>) -> Self {
        self.jump_url = Some(url.into());
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Roots of a snapshot, in snapshot order.
pub fn roots(snapshot: &[Node]) -> Vec<&Node> {
    snapshot.iter().filter(|n| n.is_root()).collect()
}

/// Children of `parent` in a snapshot, in snapshot order.
pub fn children_of<'a>(snapshot: &'a [Node], parent: &NodeId) -> Vec<&'a Node> {
    snapshot
        .iter()
        .filter(|n| n.parent_id.as_ref() == Some(parent))
        .collect()
}

/// Locate a node by name under a given parent (`None` = a root).
///
/// On duplicate names under the same parent the first match in snapshot
/// order wins; sibling name uniqueness is assumed, not enforced here.
pub fn find_named<'a>(
    snapshot: &'a [Node],
    name: &str,
    parent: Option<&NodeId>,
) -> Option<&'a Node> {
    snapshot
        .iter()
        .find(|n| n.name == name && n.parent_id.as_ref() == parent)
}

/// Derive a node's level against its snapshot.
///
/// A node whose parent is missing from the snapshot is treated as a
/// root, matching how the forest builder degrades dangling references.
pub fn level_of(snapshot: &[Node], node: &Node) -> Level {
    let parent = node
        .parent_id
        .as_ref()
        .and_then(|pid| snapshot.iter().find(|n| &n.id == pid));
    match parent {
        None => Level::Line,
        Some(p) if p.is_root() => Level::SubLine,
        Some(_) => Level::Project,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> Vec<Node> {
        vec![
            Node::new("1", "Finance"),
            Node::new("2", "Platform"),
            Node::new("1-1", "Lending").with_parent("1"),
            Node::new("1-2", "Payments").with_parent("1"),
            Node::new("p-1", "ledger-svc")
                .with_parent("1-1")
                .with_jump_url("https://ci.example.com/ledger-svc"),
        ]
    }

    #[test]
    fn roots_in_snapshot_order() {
        let snap = snapshot();
        let r = roots(&snap);
        assert_eq!(r.len(), 2);
        assert_eq!(r[0].name, "Finance");
        assert_eq!(r[1].name, "Platform");
    }

    #[test]
    fn children_filtered_by_parent() {
        let snap = snapshot();
        let kids = children_of(&snap, &NodeId::new("1"));
        assert_eq!(kids.len(), 2);
        assert_eq!(kids[0].name, "Lending");
        assert_eq!(kids[1].name, "Payments");
    }

    #[test]
    fn find_named_distinguishes_parent() {
        let snap = snapshot();
        assert!(find_named(&snap, "Finance", None).is_some());
        assert!(find_named(&snap, "Lending", None).is_none());
        let parent = NodeId::new("1");
        assert_eq!(
            find_named(&snap, "Lending", Some(&parent)).map(|n| n.id.as_str()),
            Some("1-1")
        );
    }

    #[test]
    fn find_named_first_match_wins() {
        let snap = vec![
            Node::new("a", "Finance"),
            Node::new("b", "Finance"),
        ];
        assert_eq!(
            find_named(&snap, "Finance", None).map(|n| n.id.as_str()),
            Some("a")
        );
    }

    #[test]
    fn level_derivation() {
        let snap = snapshot();
        assert_eq!(level_of(&snap, &snap[0]), Level::Line);
        assert_eq!(level_of(&snap, &snap[2]), Level::SubLine);
        assert_eq!(level_of(&snap, &snap[4]), Level::Project);
    }

    #[test]
    fn dangling_parent_is_a_root() {
        let snap = vec![Node::new("x", "Orphan").with_parent("missing")];
        assert_eq!(level_of(&snap, &snap[0]), Level::Line);
    }

    #[test]
    fn level_wire_roundtrip() {
        for level in [Level::Line, Level::SubLine, Level::Project] {
            assert_eq!(Level::from_wire(level.wire()), Some(level));
        }
        assert_eq!(Level::from_wire(0), None);
        assert_eq!(Level::from_wire(4), None);
    }
}
