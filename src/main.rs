// Main entry point - service and viewer subcommands
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use power_curve::infrastructure::config::{load_service_config, load_viewer_config};
use power_curve::infrastructure::csv_store::CsvTurbineStore;
use power_curve::presentation::app_state::AppState;
use power_curve::presentation::{handlers, viewer};

const VIEWER_LOG_FILE: &str = "power-curve-viewer.log";

#[derive(Parser)]
#[command(name = "power-curve", version, about = "Wind turbine power-curve explorer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve turbine measurement data over HTTP
    Serve {
        /// Config file (defaults to config/service.toml)
        #[arg(long)]
        config: Option<String>,
    },
    /// Explore a turbine's power curve in the terminal
    View {
        /// Config file (defaults to config/viewer.toml)
        #[arg(long)]
        config: Option<String>,
        /// Override the data service base URL
        #[arg(long)]
        base_url: Option<String>,
    },
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Serve { config } => serve(config.as_deref()).await,
        Command::View { config, base_url } => view(config.as_deref(), base_url).await,
    }
}

async fn serve(config_path: Option<&str>) -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter(env_filter()).init();

    let config = load_service_config(config_path)?;
    let store = CsvTurbineStore::load(&config.data_dir)
        .with_context(|| format!("loading turbine exports from {}", config.data_dir.display()))?;
    tracing::info!(turbines = ?store.turbine_ids(), "measurement store ready");

    let state = Arc::new(AppState {
        store: Arc::new(store),
    });
    let router = handlers::router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "starting turbine data service");
    axum::serve(listener, router).await?;

    Ok(())
}

async fn view(config_path: Option<&str>, base_url: Option<String>) -> anyhow::Result<()> {
    // The alternate screen owns stdout, so log records go to a file.
    let appender = tracing_appender::rolling::never(".", VIEWER_LOG_FILE);
    let (writer, _guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .init();

    let mut config = load_viewer_config(config_path)?;
    if let Some(base_url) = base_url {
        config.base_url = base_url;
    }
    viewer::app::run(config).await
}
