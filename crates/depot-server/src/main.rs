//! depot-server binary.
//!
//! `depot-server` serves the vault over HTTP using the configuration in
//! `config.toml` (override the path with `--config`). The `hash-password`
//! subcommand prints the argon2 PHC string to put in an account's
//! `password_hash` field.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use depot_ingest::{Vault, disk::ArtifactStore};
use depot_qr::LinkEncoder;
use depot_server::{AppState, ServerConfig, auth::AuthConfig};
use depot_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Depot file vault server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
  /// Hash a password read from stdin, for an account's `password_hash`.
  HashPassword,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  match cli.command {
    Some(Command::HashPassword) => hash_password(),
    None => serve(load_config(&cli.config)?).await,
  }
}

/// Layered configuration: TOML file, then `DEPOT_*` environment overrides.
fn load_config(path: &Path) -> anyhow::Result<ServerConfig> {
  let settings = config::Config::builder()
    .add_source(config::File::from(path.to_path_buf()).required(false))
    .add_source(config::Environment::with_prefix("DEPOT"))
    .build()
    .context("failed to read config file")?;

  settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")
}

async fn serve(cfg: ServerConfig) -> anyhow::Result<()> {
  let store_path = expand_tilde(&cfg.store_path);
  let upload_root = expand_tilde(&cfg.upload_root);

  let catalog = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open catalog at {store_path:?}"))?;

  let state = AppState {
    vault:  Arc::new(Vault::new(
      ArtifactStore::new(upload_root),
      Arc::new(catalog),
    )),
    links:  Arc::new(LinkEncoder::new(cfg.base_url.clone())),
    auth:   Arc::new(AuthConfig { accounts: cfg.accounts.clone() }),
    config: Arc::new(cfg.clone()),
  };

  let address = format!("{}:{}", cfg.host, cfg.port);
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  tracing::info!("Listening on http://{address}");
  axum::serve(listener, depot_server::router(state))
    .await
    .context("server error")
}

fn hash_password() -> anyhow::Result<()> {
  use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
  use rand_core::OsRng;
  use std::io::{BufRead as _, Write as _};

  eprint!("Password: ");
  std::io::stderr().flush().ok();
  let mut password = String::new();
  std::io::stdin().lock().read_line(&mut password)?;

  let salt = SaltString::generate(&mut OsRng);
  let hash = Argon2::default()
    .hash_password(password.trim_end().as_bytes(), &salt)
    .map_err(|e| anyhow::anyhow!("argon2 error: {e}"))?;
  println!("{hash}");
  Ok(())
}

/// Expand a leading `~/` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  match path.to_string_lossy().strip_prefix("~/") {
    Some(rest) => match std::env::var("HOME") {
      Ok(home) => Path::new(&home).join(rest),
      Err(_) => path.to_path_buf(),
    },
    None => path.to_path_buf(),
  }
}
