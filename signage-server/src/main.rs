//! # Signage Server
//!
//! Serves the staff-facing REST API and the per-screen config feed that
//! players poll. Uploaded files are written under the uploads directory and
//! served back from `/uploads`.

use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use signage_core::database::{PostgresDatabase, Repositories};
use signage_server::{
    AppState, create_app,
    infra::config::{Config, ConfigLoad, ConfigLoader},
    maintenance,
};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "signage-server")]
#[command(about = "Hospital digital signage backend")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(ClapArgs, Debug, Clone)]
struct ServeArgs {
    /// Path to a TOML config file
    #[arg(long, env = "SIGNAGE_CONFIG")]
    config: Option<PathBuf>,

    /// Server port (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long)]
    host: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(subcommand)]
    Db(DbCommand),
    #[command(subcommand)]
    Screens(ScreensCommand),
}

#[derive(Debug, Subcommand)]
enum DbCommand {
    /// Apply database migrations and exit
    Migrate,
}

#[derive(Debug, Subcommand)]
enum ScreensCommand {
    /// Replace empty or placeholder screen names with generated ones and exit
    BackfillNames,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_runtime_config(&cli.serve)?;

    match cli.command {
        Some(Command::Db(DbCommand::Migrate)) => {
            let db = connect_database(&config).await?.context(
                "DATABASE_URL is not set; migrations need a PostgreSQL database",
            )?;
            db.migrate().await.context("failed to apply migrations")?;
            info!("Database migrations applied");
            Ok(())
        }
        Some(Command::Screens(ScreensCommand::BackfillNames)) => {
            let repos = build_repositories(&config).await?;
            let renamed = maintenance::backfill_screen_names(repos.screens.as_ref())
                .await
                .context("failed to backfill screen names")?;
            info!(renamed, "Screen name backfill complete");
            Ok(())
        }
        None => run_server(config).await,
    }
}

fn load_runtime_config(args: &ServeArgs) -> anyhow::Result<Arc<Config>> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = args.config.clone() {
        loader = loader.with_config_path(path);
    }
    let ConfigLoad {
        mut config,
        warnings,
    } = loader.load().context("failed to load configuration")?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host.clone() {
        config.server.host = host;
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if config.metadata.env_file_loaded {
        info!("loaded .env file");
    }
    if let Some(path) = config.metadata.config_path.as_ref() {
        info!(path = %path.display(), "loaded config file");
    }

    for warning in &warnings.items {
        match &warning.hint {
            Some(hint) => {
                warn!(message = %warning.message, hint = %hint, "configuration warning")
            }
            None => warn!(message = %warning.message, "configuration warning"),
        }
    }

    Ok(Arc::new(config))
}

async fn connect_database(config: &Config) -> anyhow::Result<Option<PostgresDatabase>> {
    let Some(url) = config.database.primary_url.as_deref() else {
        return Ok(None);
    };
    let db = PostgresDatabase::connect(url, config.database.max_connections)
        .await
        .context("failed to connect to PostgreSQL")?;
    Ok(Some(db))
}

async fn build_repositories(config: &Config) -> anyhow::Result<Repositories> {
    match connect_database(config).await? {
        Some(db) => {
            db.migrate().await.context("failed to apply migrations")?;
            info!(
                max_connections = config.database.max_connections,
                "Connected to PostgreSQL"
            );
            Ok(Repositories::postgres(&db))
        }
        None => {
            warn!("No DATABASE_URL configured; using in-memory storage. Data is lost on restart.");
            Ok(Repositories::in_memory())
        }
    }
}

async fn run_server(config: Arc<Config>) -> anyhow::Result<()> {
    let repos = build_repositories(&config).await?;
    let state = AppState::new(config.clone(), repos);
    state
        .store
        .ensure_root()
        .await
        .with_context(|| {
            format!(
                "failed to create uploads directory {}",
                state.store.root().display()
            )
        })?;

    let app = create_app(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("invalid server host/port")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(%addr, dev_mode = config.dev_mode, "Signage server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
