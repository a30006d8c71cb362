//! Arbor CLI — coverage dashboard over the project-hierarchy backend.
//!
//! Usage:
//!   arbor tree [--base-url URL]
//!   arbor add <line|sub-line|project> ...
//!   arbor details [--project KW] [--first-level NAME] [--sort-by COL] [--desc]
//!   arbor chart <pie|line|bar|hbar>

use arbor::charts::{self, ChartKind};
use arbor::{
    CreationError, CreationIntent, DashboardApi, DetailQuery, HttpBusinessApi, NodeId, ParentRef,
    SortKey, SortOrder, TreeNode,
};
use clap::{Parser, Subcommand};
use std::sync::Arc;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Parser)]
#[command(name = "arbor", version, about = "Coverage dashboard over the project hierarchy")]
struct Cli {
    /// Backend base URL (defaults to $ARBOR_BASE_URL, then localhost)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the tree and print the classification forest
    Tree,
    /// Create a classification node or project
    Add {
        #[command(subcommand)]
        what: AddWhat,
    },
    /// List project coverage detail rows
    Details {
        /// Keyword match against the project name
        #[arg(long)]
        project: Option<String>,
        /// Exact first-level category name
        #[arg(long)]
        first_level: Option<String>,
        /// Sort column: name, first-level, second-level, create-time,
        /// line-coverage, branch-coverage
        #[arg(long)]
        sort_by: Option<String>,
        /// Sort descending (default is ascending when --sort-by is given)
        #[arg(long)]
        desc: bool,
    },
    /// Fetch and print one dashboard chart series
    Chart {
        /// Series: pie, line, bar, hbar
        kind: String,
    },
}

#[derive(Subcommand)]
enum AddWhat {
    /// New business line (level 1)
    Line {
        /// Name for the new line
        name: String,
    },
    /// New sub-line (level 2)
    SubLine {
        /// Name for the new sub-line
        name: String,
        /// Id of an existing parent line
        #[arg(long, conflicts_with = "new_parent")]
        parent: Option<String>,
        /// Name of a parent line to create as part of this save
        #[arg(long)]
        new_parent: Option<String>,
    },
    /// New project (level 3)
    Project {
        /// Name for the new project
        name: String,
        /// Id of an existing line ancestor
        #[arg(long, conflicts_with = "new_line")]
        line: Option<String>,
        /// Name of a line ancestor to create as part of this save
        #[arg(long)]
        new_line: Option<String>,
        /// Id of an existing sub-line parent
        #[arg(long, conflicts_with = "new_sub_line")]
        sub_line: Option<String>,
        /// Name of a sub-line parent to create as part of this save
        #[arg(long)]
        new_sub_line: Option<String>,
        /// External project uuid
        #[arg(long)]
        uuid: Option<String>,
    },
}

/// Map an (existing-id, new-name) flag pair to a parent slot.
fn parent_slot(
    existing: Option<String>,
    new: Option<String>,
    slot: &str,
) -> Result<ParentRef, String> {
    match (existing, new) {
        (Some(id), None) => Ok(ParentRef::Existing(NodeId::new(id))),
        (None, Some(name)) => Ok(ParentRef::New(name)),
        _ => Err(format!("specify exactly one of --{slot} or --new-{slot}")),
    }
}

fn sort_key(name: &str) -> Result<SortKey, String> {
    match name {
        "name" => Ok(SortKey::ProjectName),
        "first-level" => Ok(SortKey::FirstLevel),
        "second-level" => Ok(SortKey::SecondLevel),
        "create-time" => Ok(SortKey::CreateTime),
        "line-coverage" => Ok(SortKey::LineCoverage),
        "branch-coverage" => Ok(SortKey::BranchCoverage),
        other => Err(format!("unknown sort column '{other}'")),
    }
}

fn chart_kind(name: &str) -> Result<ChartKind, String> {
    match name {
        "pie" => Ok(ChartKind::Pie),
        "line" => Ok(ChartKind::Line),
        "bar" => Ok(ChartKind::Bar),
        "hbar" => Ok(ChartKind::HorizontalBar),
        other => Err(format!("unknown chart kind '{other}'")),
    }
}

fn intent_from_args(what: AddWhat) -> Result<CreationIntent, String> {
    let intent = match what {
        AddWhat::Line { name } => CreationIntent::line(name),
        AddWhat::SubLine {
            name,
            parent,
            new_parent,
        } => {
            let slot = parent_slot(parent, new_parent, "parent")?;
            CreationIntent::sub_line(name, slot)
        }
        AddWhat::Project {
            name,
            line,
            new_line,
            sub_line,
            new_sub_line,
            uuid,
        } => {
            let line = parent_slot(line, new_line, "line")?;
            let sub_line = parent_slot(sub_line, new_sub_line, "sub-line")?;
            CreationIntent::project(name, uuid, line, sub_line)
        }
    };
    intent.map_err(|e| e.to_string())
}

fn print_node(node: &TreeNode, depth: usize) {
    let indent = "  ".repeat(depth);
    match &node.jump_url {
        Some(url) => println!("{}{} ({}) -> {}", indent, node.name, node.id, url),
        None => println!("{}{} ({})", indent, node.name, node.id),
    }
    for child in &node.children {
        print_node(child, depth + 1);
    }
}

async fn cmd_tree(api: &DashboardApi) -> i32 {
    if let Err(e) = api.refresh_tree().await {
        eprintln!("Error: {}", e);
        return 1;
    }
    let forest = api.forest();
    if forest.is_empty() {
        println!("No nodes.");
        return 0;
    }
    for root in &forest {
        print_node(root, 0);
    }
    0
}

async fn cmd_add(api: &DashboardApi, intent: CreationIntent) -> i32 {
    let name = intent.name().to_string();
    match api.create_entity(intent).await {
        Ok(()) => {
            println!("Created '{}'", name);
            0
        }
        Err(CreationError::Duplicate(existing)) => {
            println!("'{}' already exists — nothing to create", existing);
            1
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

async fn cmd_details(api: &DashboardApi, query: DetailQuery) -> i32 {
    let rows = match api.project_details(&query).await {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    if rows.is_empty() {
        println!("No rows.");
        return 0;
    }
    println!(
        "{:<28}  {:<20}  {:<20}  {:>8}  {:>8}  {:<20}",
        "PROJECT", "LINE", "SUB-LINE", "LINE%", "BRANCH%", "CREATED"
    );
    println!("{}", "-".repeat(114));
    for row in rows {
        println!(
            "{:<28}  {:<20}  {:<20}  {:>8.2}  {:>8.2}  {:<20}",
            row.name,
            row.grandparent_name,
            row.parent_name,
            row.line_coverage_pct(),
            row.branch_coverage_pct(),
            row.create_time,
        );
    }
    0
}

async fn cmd_chart(api: &DashboardApi, kind: ChartKind) -> i32 {
    let rows = match api.chart(kind).await {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    match kind {
        ChartKind::Pie => {
            for slice in charts::pie_slices(&rows) {
                println!("{:<24} {:>6}", slice.name, slice.value);
            }
        }
        ChartKind::Line => {
            let series = charts::monthly_series(&rows);
            for (month, count) in series.months.iter().zip(&series.counts) {
                println!("{:<10} {:>6}", month, count);
            }
        }
        ChartKind::Bar | ChartKind::HorizontalBar => {
            let series = if kind == ChartKind::Bar {
                charts::coverage_bars(&rows)
            } else {
                charts::coverage_bars_ranked(&rows)
            };
            println!("{:<28}  {:>8}  {:>8}", "PROJECT", "LINE%", "BRANCH%");
            for i in 0..series.labels.len() {
                println!(
                    "{:<28}  {:>8.2}  {:>8.2}",
                    series.labels[i], series.line[i], series.branch[i]
                );
            }
        }
    }
    0
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let base_url = cli
        .base_url
        .or_else(|| std::env::var("ARBOR_BASE_URL").ok())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let remote = match HttpBusinessApi::new(&base_url) {
        Ok(remote) => Arc::new(remote),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };
    let api = DashboardApi::new(remote);

    let code = match cli.command {
        Commands::Tree => cmd_tree(&api).await,
        Commands::Add { what } => match intent_from_args(what) {
            Ok(intent) => cmd_add(&api, intent).await,
            Err(e) => {
                eprintln!("Error: {}", e);
                2
            }
        },
        Commands::Details {
            project,
            first_level,
            sort_by,
            desc,
        } => {
            let mut query = DetailQuery::new();
            if let Some(project) = project {
                query = query.with_project_name(project);
            }
            if let Some(first_level) = first_level {
                query = query.with_first_level(first_level);
            }
            if let Some(column) = sort_by {
                match sort_key(&column) {
                    Ok(key) => {
                        let order = if desc {
                            SortOrder::Descending
                        } else {
                            SortOrder::Ascending
                        };
                        query = query.sorted_by(key, order);
                    }
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        std::process::exit(2);
                    }
                }
            }
            cmd_details(&api, query).await
        }
        Commands::Chart { kind } => match chart_kind(&kind) {
            Ok(kind) => cmd_chart(&api, kind).await,
            Err(e) => {
                eprintln!("Error: {}", e);
                2
            }
        },
    };
    std::process::exit(code);
}
