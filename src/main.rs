//! CLI entry point for the emotional-intelligence course dashboard.
//!
//! Provides subcommands for a one-shot refresh, a periodic watch loop, and
//! requesting a generated insight summary for the current filter selection.

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use ei_dashboard::fetch::BasicClient;
use ei_dashboard::filters::FilterState;
use ei_dashboard::insights::{FileInsightStore, InsightStore, fetch_insight, local_summary};
use ei_dashboard::orchestrator::Orchestrator;
use ei_dashboard::output::{append_record, metrics_record, print_json, write_view};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "ei_dashboard")]
#[command(about = "Aggregates course survey responses into dashboard data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the survey payload once and write the dashboard view
    Refresh {
        /// Payload URL or local JSON file (defaults to DASHBOARD_SOURCE_URL)
        #[arg(value_name = "FILE_OR_URL")]
        source: Option<String>,

        /// JSON file the rendered view is written to
        #[arg(short, long, default_value = "dashboard.json")]
        output: String,

        /// Optional CSV file to append a metrics history row to
        #[arg(long)]
        history: Option<String>,

        /// Cohort filter ("Turma"); absent means all
        #[arg(long)]
        turma: Option<String>,

        /// Topic axis filter ("Eixo"); absent means all
        #[arg(long)]
        eixo: Option<String>,

        /// Month filter as ISO year-month, e.g. 2024-05; absent means all
        #[arg(long)]
        month: Option<String>,
    },
    /// Refresh on a fixed interval, keeping the last good view on failures
    Watch {
        /// Payload URL or local JSON file (defaults to DASHBOARD_SOURCE_URL)
        #[arg(value_name = "FILE_OR_URL")]
        source: Option<String>,

        /// JSON file the rendered view is written to
        #[arg(short, long, default_value = "dashboard.json")]
        output: String,

        /// Optional CSV file to append a metrics history row to
        #[arg(long)]
        history: Option<String>,

        /// Seconds between refresh cycles
        #[arg(short = 'r', long, default_value_t = 45)]
        interval: u64,

        /// Cohort filter ("Turma"); absent means all
        #[arg(long)]
        turma: Option<String>,

        /// Topic axis filter ("Eixo"); absent means all
        #[arg(long)]
        eixo: Option<String>,

        /// Month filter as ISO year-month; absent means all
        #[arg(long)]
        month: Option<String>,
    },
    /// Request a generated summary for the current filter selection
    Insights {
        /// Endpoint URL (defaults to DASHBOARD_SOURCE_URL)
        #[arg(value_name = "URL")]
        source: Option<String>,

        /// File holding the persisted insight text
        #[arg(long, default_value = "insight.txt")]
        store: String,

        /// Cohort filter ("Turma"); absent means all
        #[arg(long)]
        turma: Option<String>,

        /// Topic axis filter ("Eixo"); absent means all
        #[arg(long)]
        eixo: Option<String>,

        /// Month filter as ISO year-month; absent means all
        #[arg(long)]
        month: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/ei_dashboard.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("ei_dashboard.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Refresh {
            source,
            output,
            history,
            turma,
            eixo,
            month,
        } => {
            let source = resolve_source(source)?;
            let filters = filter_state(turma, eixo, month);
            let orchestrator = Orchestrator::new(BasicClient::new(), source, filters);

            if let Some(view) = orchestrator.refresh().await? {
                write_view(&output, &view)?;
                if let Some(history) = &history {
                    append_record(history, &metrics_record(&view))?;
                }
                print_json(&view)?;
            }
        }
        Commands::Watch {
            source,
            output,
            history,
            interval,
            turma,
            eixo,
            month,
        } => {
            let source = resolve_source(source)?;
            let filters = filter_state(turma, eixo, month);
            watch(source, output, history, interval, filters).await?;
        }
        Commands::Insights {
            source,
            store,
            turma,
            eixo,
            month,
        } => {
            let source = resolve_source(source)?;
            let filters = filter_state(turma, eixo, month);
            generate_insight(source, store, filters).await?;
        }
    }

    Ok(())
}

fn resolve_source(arg: Option<String>) -> Result<String> {
    arg.or_else(|| std::env::var("DASHBOARD_SOURCE_URL").ok())
        .ok_or_else(|| anyhow!("no source given and DASHBOARD_SOURCE_URL is not set"))
}

fn filter_state(turma: Option<String>, eixo: Option<String>, month: Option<String>) -> FilterState {
    FilterState { turma, eixo, month }
}

/// Periodic refresh loop. A failed cycle logs and leaves the previously
/// written view untouched; the timer keeps running.
#[tracing::instrument(skip(filters), fields(source, output, interval))]
async fn watch(
    source: String,
    output: String,
    history: Option<String>,
    interval: u64,
    filters: FilterState,
) -> Result<()> {
    let orchestrator = Orchestrator::new(BasicClient::new(), source, filters);

    info!(interval, "Starting watch loop. Press Ctrl+C to stop.");

    loop {
        match orchestrator.refresh().await {
            Ok(Some(view)) => {
                write_view(&output, &view)?;
                if let Some(history) = &history {
                    if let Err(e) = append_record(history, &metrics_record(&view)) {
                        error!(error = %e, "Failed to append metrics history");
                    }
                }
            }
            Ok(None) => {
                debug!("Stale refresh discarded");
            }
            Err(e) => {
                error!(error = %e, "Refresh failed; keeping last rendered view");
            }
        }

        tokio::time::sleep(tokio::time::Duration::from_secs(interval)).await;
    }
}

/// Requests an insight summary and persists it. The stored text is only
/// overwritten by a successful request; on failure a locally computed
/// summary (or the previously stored text) is shown instead.
async fn generate_insight(source: String, store_path: String, filters: FilterState) -> Result<()> {
    let client = BasicClient::new();
    let store = FileInsightStore::new(&store_path);

    match fetch_insight(&client, &source, &filters).await {
        Ok(Some(text)) => {
            store.save(&text)?;
            info!("Insight updated");
            println!("{text}");
            return Ok(());
        }
        Ok(None) => {
            warn!("Endpoint returned no insight; falling back");
        }
        Err(e) => {
            error!(error = %e, "Insight request failed; falling back");
        }
    }

    if let Some(previous) = store.load()? {
        println!("{previous}");
        return Ok(());
    }

    // No stored text either: compute a minimal summary from current metrics.
    let orchestrator = Orchestrator::new(BasicClient::new(), source, filters);
    match orchestrator.refresh().await {
        Ok(Some(view)) => println!("{}", local_summary(&view)),
        _ => println!("Sem conteúdo."),
    }

    Ok(())
}
