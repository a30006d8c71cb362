//! Creation intents and their validation
//!
//! An intent is validated at construction, before any network I/O.
//! Parent slots are tagged variants — a slot is either an existing id
//! or a name to create as part of the same save, never both, never
//! neither.

use crate::remote::RemoteError;
use crate::tree::{Level, NodeId};
use thiserror::Error;

/// Errors from the creation workflow.
#[derive(Debug, Error)]
pub enum CreationError {
    /// Required fields missing or empty; raised before any remote call.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A remote call faulted. The chain stops at the failing step.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// A just-created ancestor could not be located in the re-fetched
    /// snapshot — backend lag or a name collision. A single re-fetch is
    /// attempted, no retry.
    #[error("created level-{level} node '{name}' not found after refetch")]
    ResolutionFailed { name: String, level: u8 },

    /// The server reported the entity already exists.
    #[error("entity already exists: {0}")]
    Duplicate(String),
}

/// Result type for creation operations
pub type CreationResult<T> = Result<T, CreationError>;

/// A parent slot: an already-persisted node, or a name to create first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParentRef {
    Existing(NodeId),
    New(String),
}

impl ParentRef {
    fn validate(&self, slot: &str) -> CreationResult<()> {
        if let ParentRef::New(name) = self {
            if name.trim().is_empty() {
                return Err(CreationError::Validation(format!(
                    "new {slot} name must not be empty"
                )));
            }
        }
        Ok(())
    }
}

/// Validated user request describing what to create and how to resolve
/// its ancestry.
#[derive(Debug, Clone, PartialEq)]
pub enum CreationIntent {
    /// New business line (level 1)
    Line { name: String },
    /// New sub-line (level 2) under an existing-or-new line
    SubLine { name: String, parent: ParentRef },
    /// New project (level 3); the sub-line parent can only be created
    /// once its line parent's id is known
    Project {
        name: String,
        uuid: Option<String>,
        line: ParentRef,
        sub_line: ParentRef,
    },
}

impl CreationIntent {
    /// Intent for a new business line.
    pub fn line(name: impl Into<String>) -> CreationResult<Self> {
        Ok(Self::Line {
            name: require("line name", name)?,
        })
    }

    /// Intent for a new sub-line under `parent`.
    pub fn sub_line(name: impl Into<String>, parent: ParentRef) -> CreationResult<Self> {
        parent.validate("line")?;
        Ok(Self::SubLine {
            name: require("sub-line name", name)?,
            parent,
        })
    }

    /// Intent for a new project under `line` / `sub_line`.
    pub fn project(
        name: impl Into<String>,
        uuid: Option<String>,
        line: ParentRef,
        sub_line: ParentRef,
    ) -> CreationResult<Self> {
        line.validate("line")?;
        sub_line.validate("sub-line")?;
        Ok(Self::Project {
            name: require("project name", name)?,
            uuid,
            line,
            sub_line,
        })
    }

    /// Name of the entity this intent ultimately creates.
    pub fn name(&self) -> &str {
        match self {
            Self::Line { name }
            | Self::SubLine { name, .. }
            | Self::Project { name, .. } => name,
        }
    }

    /// Target level of this intent.
    pub fn level(&self) -> Level {
        match self {
            Self::Line { .. } => Level::Line,
            Self::SubLine { .. } => Level::SubLine,
            Self::Project { .. } => Level::Project,
        }
    }
}

fn require(field: &str, value: impl Into<String>) -> CreationResult<String> {
    let value = value.into();
    if value.trim().is_empty() {
        return Err(CreationError::Validation(format!(
            "{field} must not be empty"
        )));
    }
    Ok(value)
}
