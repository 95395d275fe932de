use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use clientele_config::ServiceConfig;
use clientele_http::{AppState, router};
use clientele_service::DefaultCustomerService;
use clientele_store::SqliteStore;

/// Clientele - customer records over REST and GraphQL
#[derive(Parser)]
#[command(name = "clientele")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Path to a JSON config file (default: <config dir>/clientele/config.json, if present)
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Serve the REST and GraphQL API
  Serve {
    /// Address to listen on, e.g. 0.0.0.0:8080
    #[arg(long)]
    listen: Option<SocketAddr>,

    /// SQLite database URL
    #[arg(long)]
    database_url: Option<String>,
  },

  /// Apply database migrations and exit
  Migrate {
    /// SQLite database URL
    #[arg(long)]
    database_url: Option<String>,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  let mut config = load_config(cli.config.as_deref())?;

  match cli.command {
    Some(Commands::Serve {
      listen,
      database_url,
    }) => {
      if let Some(listen) = listen {
        config.listen_addr = listen;
      }
      if let Some(database_url) = database_url {
        config.database_url = database_url;
      }
      init_tracing(&config)?;
      let rt = tokio::runtime::Runtime::new()?;
      rt.block_on(serve(config))?;
    }
    Some(Commands::Migrate { database_url }) => {
      if let Some(database_url) = database_url {
        config.database_url = database_url;
      }
      init_tracing(&config)?;
      let rt = tokio::runtime::Runtime::new()?;
      rt.block_on(migrate(&config))?;
    }
    None => {
      println!("clientele - use --help to see available commands");
    }
  }

  Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ServiceConfig> {
  if let Some(path) = path {
    return ServiceConfig::load(path)
      .with_context(|| format!("failed to load config: {}", path.display()));
  }

  let default_path = dirs::config_dir().map(|dir| dir.join("clientele").join("config.json"));
  match default_path {
    Some(path) if path.exists() => ServiceConfig::load(&path)
      .with_context(|| format!("failed to load config: {}", path.display())),
    _ => Ok(ServiceConfig::default()),
  }
}

fn init_tracing(config: &ServiceConfig) -> Result<()> {
  let filter = match EnvFilter::try_from_default_env() {
    Ok(filter) => filter,
    Err(_) => EnvFilter::try_new(&config.log_filter)
      .with_context(|| format!("invalid log filter: {}", config.log_filter))?,
  };
  tracing_subscriber::fmt().with_env_filter(filter).init();
  Ok(())
}

async fn open_store(config: &ServiceConfig) -> Result<SqliteStore> {
  let store = SqliteStore::connect(&config.database_url)
    .await
    .with_context(|| format!("failed to open database: {}", config.database_url))?;
  store
    .migrate()
    .await
    .context("failed to run database migrations")?;
  Ok(store)
}

async fn migrate(config: &ServiceConfig) -> Result<()> {
  open_store(config).await?;
  info!(database_url = %config.database_url, "migrations_applied");
  Ok(())
}

async fn serve(config: ServiceConfig) -> Result<()> {
  let store = open_store(&config).await?;
  let service = Arc::new(DefaultCustomerService::new(store));
  let app = router(AppState::new(service));

  let listener = tokio::net::TcpListener::bind(config.listen_addr)
    .await
    .with_context(|| format!("failed to bind {}", config.listen_addr))?;
  info!(listen_addr = %config.listen_addr, "server_listening");

  let cancel = CancellationToken::new();
  let shutdown = cancel.clone();
  tokio::spawn(async move {
    if tokio::signal::ctrl_c().await.is_ok() {
      info!("shutdown_requested");
    }
    shutdown.cancel();
  });

  axum::serve(listener, app)
    .with_graceful_shutdown(async move { cancel.cancelled().await })
    .await
    .context("server failed")?;

  info!("server_stopped");
  Ok(())
}
