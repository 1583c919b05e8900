use clap::Parser;
use premstats::adapters::PostgresStore;
use premstats::cli::{self, Cli, Commands, OutputMode};
use premstats::config::{AppConfig, LoggingConfig};
use premstats::provider::{MemoryProvider, StatsProvider};
use premstats::services::StatsService;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_from(&cli.config)?;
    if let Err(errors) = config.validate() {
        for e in &errors {
            eprintln!("config: {e}");
        }
        anyhow::bail!("invalid configuration ({} errors)", errors.len());
    }

    match cli.command {
        None | Some(Commands::Serve { .. }) => init_logging(&config.logging),
        Some(_) => init_logging_simple(),
    }

    let provider = connect_provider(&cli, &config).await?;
    let service = Arc::new(StatsService::new(provider, config.reports.clone()));

    match cli.command {
        None => run_server(service, &config, None).await?,
        Some(Commands::Serve { port }) => run_server(service, &config, port).await?,
        Some(Commands::Standings { season, json }) => {
            let standings = service.standings(season).await?;
            cli::print_standings(&standings, OutputMode::from_json_flag(json))?;
        }
        Some(Commands::Report { json }) => {
            let report = service.completeness_report().await?;
            cli::print_report(&report, OutputMode::from_json_flag(json))?;
        }
    }

    Ok(())
}

async fn connect_provider(cli: &Cli, config: &AppConfig) -> anyhow::Result<Arc<dyn StatsProvider>> {
    if let Some(path) = &cli.fixture {
        info!("Using fixture dataset {}", path.display());
        return Ok(Arc::new(MemoryProvider::from_json_file(path)?));
    }

    let store = PostgresStore::new(&config.database.url, config.database.max_connections).await?;
    Ok(Arc::new(store))
}

#[cfg(feature = "api")]
async fn run_server(
    service: Arc<StatsService>,
    config: &AppConfig,
    port: Option<u16>,
) -> anyhow::Result<()> {
    let port = port.unwrap_or(config.server.port);
    premstats::adapters::start_api_server(service, &config.server.host, port, shutdown_signal())
        .await?;
    info!("Shutdown complete");
    Ok(())
}

#[cfg(not(feature = "api"))]
async fn run_server(
    _service: Arc<StatsService>,
    _config: &AppConfig,
    _port: Option<u16>,
) -> anyhow::Result<()> {
    anyhow::bail!("built without the `api` feature; use `standings` or `report`")
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("{},premstats=debug,sqlx=warn", logging.level))
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn init_logging_simple() {
    // Minimal logging for one-shot commands
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
