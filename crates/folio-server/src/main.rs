//! folio-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite content store, and serves the site and admin API over HTTP.
//!
//! # Configuration
//!
//! ```toml
//! host               = "127.0.0.1"
//! port               = 8080
//! store_path         = "~/.local/share/folio/content.db"
//! auth_username      = "admin"
//! auth_password_hash = "$argon2id$v=19$..."
//! ```
//!
//! Every key can be overridden with a `FOLIO_`-prefixed environment variable.
//!
//! # Password hash generation
//!
//! ```
//! cargo run -p folio-server -- --hash-password
//! ```

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
use clap::Parser;
use config::{ConfigBuilder, builder::DefaultState};
use folio_core::site::site_registry;
use folio_server::{AppState, auth::AuthConfig};
use folio_store_sqlite::SqliteStore;
use rand_core::OsRng;
use serde::Deserialize;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Folio site content server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Print the argon2 hash for a password entered on stdin and exit.
  #[arg(long)]
  hash_password: bool,
}

/// Runtime server configuration, deserialised from `config.toml` and
/// `FOLIO_*` environment variables.
#[derive(Deserialize, Debug)]
struct ServerConfig {
  host:               String,
  port:               u16,
  store_path:         PathBuf,
  auth_username:      String,
  auth_password_hash: String,
}

impl ServerConfig {
  fn auth(&self) -> AuthConfig {
    AuthConfig {
      username:      self.auth_username.clone(),
      password_hash: self.auth_password_hash.clone(),
    }
  }

  fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Deserialise a [`ServerConfig`] from the layered sources in `builder`.
fn load_config(builder: ConfigBuilder<DefaultState>) -> anyhow::Result<ServerConfig> {
  builder
    .build()
    .context("failed to read config file")?
    .try_deserialize()
    .context("failed to deserialise ServerConfig")
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

  // Helper mode: hash a password and exit.
  if cli.hash_password {
    let password = read_password()?;
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
      .hash_password(password.as_bytes(), &salt)
      .map_err(|e| anyhow::anyhow!("argon2 error: {e}"))?
      .to_string();
    println!("{hash}");
    return Ok(());
  }

  let server_cfg = load_config(
    config::Config::builder()
      .add_source(config::File::from(cli.config).required(false))
      .add_source(config::Environment::with_prefix("FOLIO")),
  )?;

  let registry = site_registry().context("invalid page schemas")?;
  tracing::info!(pages = registry.len(), "page schemas registered");

  let store_path = expand_tilde(&server_cfg.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let state = AppState {
    store:    Arc::new(store),
    registry: Arc::new(registry),
    auth:     Arc::new(server_cfg.auth()),
  };

  let app = folio_server::router(state);
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Read a password line from stdin.
fn read_password() -> anyhow::Result<String> {
  use std::io::{self, BufRead, Write};
  print!("Password: ");
  io::stdout().flush().ok();
  let mut line = String::new();
  io::stdin().lock().read_line(&mut line)?;
  Ok(line.trim_end_matches(['\n', '\r']).to_string())
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
