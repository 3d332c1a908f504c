//! Epicboard CLI
//!
//! The `epicboard` command renders the epic dashboard from a
//! semicolon-delimited export.
//!
//! ## Commands
//!
//! - `summary`: consolidated Build-only view per team
//! - `team`: one team's metrics and ordered epic list
//! - `products`: cross-team product table
//! - `report`: the whole dashboard as markdown or JSON

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn, Level};

use epicboard_core::{
    read_dataset, render_dashboard_md, render_global_md, render_products_md, render_team_md,
    write_dashboard_json, write_dashboard_md, Dashboard, Dataset, DisplayFilter, ProductSortKey,
    SessionState, METRICS,
};

#[derive(Parser)]
#[command(name = "epicboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Mid-PI epic progress dashboard", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true, env = "EPICBOARD_JSON_LOGS")]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Consolidated view: one row per team, Build epics only
    Summary {
        /// Epic export (semicolon-separated, header on the first line)
        csv: PathBuf,

        /// Emit JSON instead of markdown
        #[arg(long)]
        json: bool,
    },

    /// Metrics and ordered epic list of one team
    Team {
        /// Epic export
        csv: PathBuf,

        /// Team name as written in the export
        #[arg(short, long)]
        team: String,

        /// Which epics to show: build, run or all
        #[arg(short, long, env = "EPICBOARD_DEFAULT_FILTER", default_value = "build")]
        filter: DisplayFilter,

        /// Emit JSON instead of markdown
        #[arg(long)]
        json: bool,
    },

    /// Product table across teams
    Products {
        /// Epic export
        csv: PathBuf,

        /// Header click (repeatable): product, teams, epics, done,
        /// in-progress, tickets, completion, alert
        #[arg(short, long = "sort", value_name = "COLUMN")]
        sort: Vec<ProductSortKey>,

        /// Emit JSON instead of markdown
        #[arg(long)]
        json: bool,
    },

    /// Full dashboard report
    Report {
        /// Epic export
        csv: PathBuf,

        #[arg(long, value_enum, default_value = "markdown")]
        format: ReportFormat,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Markdown,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    epicboard_core::init_tracing(cli.json_logs, level);

    let output = run(cli.command).await?;
    if !output.is_empty() {
        print!("{output}");
    }
    METRICS.flush();
    Ok(())
}

/// Execute a command and return what should go to stdout.
async fn run(command: Commands) -> Result<String> {
    match command {
        Commands::Summary { csv, json } => cmd_summary(&csv, json).await,
        Commands::Team {
            csv,
            team,
            filter,
            json,
        } => cmd_team(&csv, &team, filter, json).await,
        Commands::Products { csv, sort, json } => cmd_products(&csv, &sort, json).await,
        Commands::Report {
            csv,
            format,
            output,
        } => cmd_report(&csv, format, output.as_deref()).await,
    }
}

/// Read the export on the blocking pool; the only asynchronous step.
async fn load_dataset(path: &Path) -> Result<Dataset> {
    let owned = path.to_path_buf();
    let dataset = tokio::task::spawn_blocking(move || read_dataset(&owned))
        .await
        .context("export reader task panicked")?
        .with_context(|| format!("Failed to read epic export {:?}", path))?;
    info!(
        path = %path.display(),
        epics = dataset.len(),
        dropped = dataset.stats.dropped,
        "export loaded"
    );
    Ok(dataset)
}

async fn cmd_summary(csv: &Path, json: bool) -> Result<String> {
    let dataset = load_dataset(csv).await?;
    let rows: Vec<_> = dataset
        .teams()
        .iter()
        .map(|team| Dashboard::global_row(&dataset, team))
        .collect();

    if json {
        return serde_json::to_string_pretty(&rows)
            .map(|s| s + "\n")
            .context("serialize summary");
    }

    let mut out = format!(
        "{} epics loaded for {} teams\n\n",
        dataset.len(),
        rows.len()
    );
    out.push_str(&render_global_md(&rows));
    Ok(out)
}

async fn cmd_team(csv: &Path, team: &str, filter: DisplayFilter, json: bool) -> Result<String> {
    let dataset = load_dataset(csv).await?;
    if !dataset.teams().iter().any(|t| t == team) {
        warn!(team = %team, "team not present in export");
    }

    let session = SessionState::new().with_team_filter(team, filter);
    let view = Dashboard::team_view(&dataset, &session, team);

    if json {
        return serde_json::to_string_pretty(&view)
            .map(|s| s + "\n")
            .context("serialize team view");
    }
    Ok(render_team_md(&view))
}

async fn cmd_products(csv: &Path, clicks: &[ProductSortKey], json: bool) -> Result<String> {
    let dataset = load_dataset(csv).await?;
    let session = clicks
        .iter()
        .fold(SessionState::new(), |s, key| s.with_product_click(*key));
    let sort = session.product_sort();
    let products = Dashboard::product_table(&dataset, sort);

    if json {
        return serde_json::to_string_pretty(&products)
            .map(|s| s + "\n")
            .context("serialize product table");
    }
    Ok(render_products_md(&products, sort))
}

async fn cmd_report(csv: &Path, format: ReportFormat, output: Option<&Path>) -> Result<String> {
    let dataset = load_dataset(csv).await?;
    let view = Dashboard::compute(&dataset, &SessionState::new());

    match (format, output) {
        (ReportFormat::Markdown, Some(path)) => {
            write_dashboard_md(path, &view)?;
            info!(path = %path.display(), "markdown report written");
            Ok(String::new())
        }
        (ReportFormat::Json, Some(path)) => {
            write_dashboard_json(path, &view)?;
            info!(path = %path.display(), "json report written");
            Ok(String::new())
        }
        (ReportFormat::Markdown, None) => Ok(render_dashboard_md(&view)),
        (ReportFormat::Json, None) => serde_json::to_string_pretty(&view)
            .map(|s| s + "\n")
            .context("serialize dashboard"),
    }
}
