//! Dashboard chart series shaping
//!
//! Data shaping only — rendering belongs to whatever front end consumes
//! these series. The backend serves all four series through one endpoint
//! discriminated by a `lx` parameter, reusing a single row shape and
//! populating only the fields the requested series needs.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Which dashboard series to fetch, in the backend's `lx` encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Project count per business line
    Pie,
    /// Projects recorded per month
    Line,
    /// Coverage of the most recently recorded projects
    Bar,
    /// Highest line-coverage projects, ranked
    HorizontalBar,
}

impl ChartKind {
    pub fn wire(self) -> u8 {
        match self {
            ChartKind::Pie => 1,
            ChartKind::Line => 2,
            ChartKind::Bar => 3,
            ChartKind::HorizontalBar => 4,
        }
    }

    pub fn from_wire(value: u8) -> Option<Self> {
        match value {
            1 => Some(ChartKind::Pie),
            2 => Some(ChartKind::Line),
            3 => Some(ChartKind::Bar),
            4 => Some(ChartKind::HorizontalBar),
            _ => None,
        }
    }
}

/// One chart row. Which fields are populated depends on the series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartRow {
    #[serde(rename = "NAME", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "LEVEL3COUNT", default, skip_serializing_if = "Option::is_none")]
    pub level3_count: Option<u64>,
    #[serde(rename = "MONTH", default, skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    #[serde(rename = "COUNT", default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(rename = "LINECOVERAGE", default, skip_serializing_if = "Option::is_none")]
    pub line_coverage: Option<String>,
    #[serde(rename = "BRANCHCOVERAGE", default, skip_serializing_if = "Option::is_none")]
    pub branch_coverage: Option<String>,
    #[serde(rename = "CREATETIME", default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
}

/// One slice of the pie series: project count per business line.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub name: String,
    pub value: u64,
}

/// The monthly line series: parallel month labels and counts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineSeries {
    pub months: Vec<String>,
    pub counts: Vec<u64>,
}

/// A coverage bar series: parallel labels and line/branch percentages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoverageSeries {
    pub labels: Vec<String>,
    pub line: Vec<f64>,
    pub branch: Vec<f64>,
}

/// Shape the pie series. Missing counts read as zero, missing names as
/// empty labels.
pub fn pie_slices(rows: &[ChartRow]) -> Vec<PieSlice> {
    rows.iter()
        .map(|r| PieSlice {
            name: r.name.clone().unwrap_or_default(),
            value: r.level3_count.unwrap_or(0),
        })
        .collect()
}

/// Shape the monthly line series, preserving backend row order.
pub fn monthly_series(rows: &[ChartRow]) -> LineSeries {
    LineSeries {
        months: rows.iter().map(|r| r.month.clone().unwrap_or_default()).collect(),
        counts: rows.iter().map(|r| r.count.unwrap_or(0)).collect(),
    }
}

/// Shape the coverage bar series in backend order (most recent first,
/// as served).
pub fn coverage_bars(rows: &[ChartRow]) -> CoverageSeries {
    shape_coverage(rows.iter())
}

/// Shape the ranked horizontal-bar series, sorted ascending by line
/// coverage so the largest bar renders at the top of the chart.
pub fn coverage_bars_ranked(rows: &[ChartRow]) -> CoverageSeries {
    let mut sorted: Vec<&ChartRow> = rows.iter().collect();
    sorted.sort_by(|a, b| {
        pct(&a.line_coverage)
            .partial_cmp(&pct(&b.line_coverage))
            .unwrap_or(Ordering::Equal)
    });
    shape_coverage(sorted.into_iter())
}

fn shape_coverage<'a>(rows: impl Iterator<Item = &'a ChartRow>) -> CoverageSeries {
    let mut series = CoverageSeries::default();
    for row in rows {
        series.labels.push(row.name.clone().unwrap_or_default());
        series.line.push(pct(&row.line_coverage));
        series.branch.push(pct(&row.branch_coverage));
    }
    series
}

fn pct(raw: &Option<String>) -> f64 {
    raw.as_deref()
        .and_then(|v| v.trim().trim_end_matches('%').parse().ok())
        .unwrap_or(0.0)
}
