//! fintrack server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! configured store backend, and serves the JSON API under `/api`.
//!
//! The default backend is a SQLite file. `--memory` switches to the
//! in-process store: every instance then has its own independent state,
//! which is fine for demos and throwaway runs but survives nothing.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use axum::Router;
use clap::Parser;
use fintrack_store_memory::MemoryStore;
use fintrack_store_sqlite::SqliteStore;
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "fintrack finance tracker server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Keep all records in process memory instead of the SQLite file.
  #[arg(long)]
  memory: bool,
}

/// Runtime server configuration, deserialised from `config.toml` with
/// `FINTRACK_*` environment overrides.
#[derive(Debug, Clone, Deserialize)]
struct ServerConfig {
  #[serde(default = "default_host")]
  host:       String,
  #[serde(default = "default_port")]
  port:       u16,
  #[serde(default = "default_store_path")]
  store_path: PathBuf,
}

fn default_host() -> String { "127.0.0.1".to_owned() }
fn default_port() -> u16 { 8788 }
fn default_store_path() -> PathBuf { PathBuf::from("fintrack.db") }

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("FINTRACK"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Open the store and build the API router over it.
  let api = if cli.memory {
    tracing::info!("using the in-memory store; records do not survive a restart");
    fintrack_api::api_router(Arc::new(MemoryStore::new()))
  } else {
    let store_path = expand_tilde(&server_cfg.store_path);
    let store = SqliteStore::open(&store_path)
      .await
      .with_context(|| format!("failed to open store at {store_path:?}"))?;
    tracing::info!("using the SQLite store at {store_path:?}");
    fintrack_api::api_router(Arc::new(store))
  };

  // The browser dashboard is served elsewhere; allow it to call the API
  // from any origin.
  let app = Router::new()
    .nest("/api", api)
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive());

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
