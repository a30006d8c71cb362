//! Detail-table query boundary
//!
//! Read-only rows for the coverage detail view. Filtering and sorting
//! are pushed to the backend; only the query encoding lives here.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

const CREATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Sort direction in the backend's wire encoding.
///
/// The convention is inverted from the usual 1=ascending scheme:
/// wire value 1 means descending, 2 means ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Descending,
    Ascending,
}

impl SortOrder {
    pub fn wire(self) -> u8 {
        match self {
            SortOrder::Descending => 1,
            SortOrder::Ascending => 2,
        }
    }

    pub fn from_wire(value: u8) -> Option<Self> {
        match value {
            1 => Some(SortOrder::Descending),
            2 => Some(SortOrder::Ascending),
            _ => None,
        }
    }
}

/// Sortable columns of the detail view, with their backend field names.
///
/// A project's first-level category is its grandparent in the tree, the
/// second-level category its direct parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    ProjectName,
    FirstLevel,
    SecondLevel,
    CreateTime,
    LineCoverage,
    BranchCoverage,
}

impl SortKey {
    pub fn field(self) -> &'static str {
        match self {
            SortKey::ProjectName => "NAME",
            SortKey::FirstLevel => "GRANDPARENTNAME",
            SortKey::SecondLevel => "PARENTNAME",
            SortKey::CreateTime => "CREATETIME",
            SortKey::LineCoverage => "LINECOVERAGE",
            SortKey::BranchCoverage => "BRANCHCOVERAGE",
        }
    }

    pub const ALL: [SortKey; 6] = [
        SortKey::ProjectName,
        SortKey::FirstLevel,
        SortKey::SecondLevel,
        SortKey::CreateTime,
        SortKey::LineCoverage,
        SortKey::BranchCoverage,
    ];
}

/// Query for the detail endpoint.
#[derive(Debug, Clone, Default)]
pub struct DetailQuery {
    /// Keyword match against the project name
    pub project_name: Option<String>,
    /// Exact first-level category name
    pub first_level: Option<String>,
    /// Sort column and direction
    pub sort: Option<(SortKey, SortOrder)>,
}

impl DetailQuery {
    /// Create an empty query (all rows, backend default order).
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by project-name keyword.
    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = Some(name.into());
        self
    }

    /// Filter by first-level category.
    pub fn with_first_level(mut self, category: impl Into<String>) -> Self {
        self.first_level = Some(category.into());
        self
    }

    /// Sort by a column.
    pub fn sorted_by(mut self, key: SortKey, order: SortOrder) -> Self {
        self.sort = Some((key, order));
        self
    }

    /// Encode to request query parameters.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(ref name) = self.project_name {
            params.push(("projectName", name.clone()));
        }
        if let Some(ref category) = self.first_level {
            params.push(("firstLevelCategory", category.clone()));
        }
        if let Some((key, order)) = self.sort {
            params.push(("sortby", key.field().to_string()));
            params.push(("order", order.wire().to_string()));
        }
        params
    }
}

/// One row of the detail view, as served.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRow {
    #[serde(rename = "RN")]
    pub row: u64,
    #[serde(rename = "NAME")]
    pub name: String,
    #[serde(rename = "PARENTNAME")]
    pub parent_name: String,
    #[serde(rename = "GRANDPARENTNAME")]
    pub grandparent_name: String,
    #[serde(rename = "LINECOVERAGE")]
    pub line_coverage: String,
    #[serde(rename = "BRANCHCOVERAGE")]
    pub branch_coverage: String,
    #[serde(rename = "CREATETIME")]
    pub create_time: String,
    #[serde(rename = "jumpUrl", default, skip_serializing_if = "Option::is_none")]
    pub jump_url: Option<String>,
}

impl DetailRow {
    /// Line coverage as a percentage; unparseable values read as zero.
    pub fn line_coverage_pct(&self) -> f64 {
        parse_pct(&self.line_coverage)
    }

    /// Branch coverage as a percentage; unparseable values read as zero.
    pub fn branch_coverage_pct(&self) -> f64 {
        parse_pct(&self.branch_coverage)
    }

    /// Parsed create time, when the backend's timestamp is well-formed.
    pub fn created_at(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.create_time, CREATE_TIME_FORMAT).ok()
    }
}

fn parse_pct(raw: &str) -> f64 {
    raw.trim().trim_end_matches('%').parse().unwrap_or(0.0)
}
