use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use comfy_table::Table;
use configuration::Config;
use fred_client::FredClient;
use tracing_subscriber::EnvFilter;
use web_server::{build_dashboard, PanelOutcome};

/// The main entry point for the macro dashboard application.
#[tokio::main]
async fn main() {
    // Load FRED_API_KEY (and any overrides) from a .env file, if present.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!(error = %e, "fatal");
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = configuration::load_config()?;

    match cli.command {
        Commands::Serve(args) => {
            if let Some(bind) = args.bind {
                config.server.bind = bind;
            }
            web_server::run_server(config).await
        }
        Commands::Snapshot(args) => handle_snapshot(args, config).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A small macro dashboard: CPI YoY, unemployment, and the 10Y real yield,
/// fetched from FRED and served as line charts.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the dashboard web server.
    Serve(ServeArgs),
    /// Fetch the panels once and print the latest readings to the terminal.
    Snapshot(SnapshotArgs),
}

#[derive(Parser)]
struct ServeArgs {
    /// The socket address to bind (overrides the configuration).
    #[arg(long)]
    bind: Option<String>,
}

#[derive(Parser)]
struct SnapshotArgs {
    /// The earliest observation date to fetch (format: YYYY-MM-DD).
    #[arg(long)]
    start: Option<NaiveDate>,
}

// ==============================================================================
// Snapshot Command Logic
// ==============================================================================

/// Fetches all panels once and renders the latest reading per panel.
async fn handle_snapshot(args: SnapshotArgs, config: Config) -> anyhow::Result<()> {
    let start = args.start.unwrap_or(config.fred.observation_start);
    web_server::validate_start(start)?;
    let client = FredClient::new(&config.fred)?;

    let dashboard = build_dashboard(&client, start, false).await;

    let mut table = Table::new();
    table.set_header(vec!["Panel", "Latest", "As of"]);

    for panel in &dashboard.panels {
        match &panel.outcome {
            PanelOutcome::Ok { latest, .. } => {
                table.add_row(vec![
                    panel.title.to_string(),
                    format!("{:.2}{}", latest.value, panel.unit),
                    latest.date.to_string(),
                ]);
            }
            PanelOutcome::Error { message } => {
                table.add_row(vec![
                    panel.title.to_string(),
                    "-".to_string(),
                    message.clone(),
                ]);
            }
        }
    }

    println!("{table}");
    Ok(())
}
