//! Verbos · Spanish Conjugation Drill
//!
//! - `serve` (default): Axum HTTP API handing out questions and checking answers
//! - `drill`: terminal quiz session played against a running server
//!
//! Important env variables:
//!   PORT              : u16 (default 3000)
//!   QUIZ_CONFIG_PATH  : path to TOML config (extra verbs + session settings)
//!   QUIZ_SERVER_URL   : drill mode server, default "http://127.0.0.1:$PORT"
//!   BEST_STREAK_PATH  : drill mode storage file, default ".verbos/storage.json";
//!                       empty keeps the best streak in memory only
//!   LOG_LEVEL         : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT        : "pretty" (default) or "json"

mod client;
mod config;
mod conjugation;
mod domain;
mod hints;
mod logic;
mod protocol;
mod routes;
mod seeds;
mod state;
mod telemetry;
mod util;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, instrument, warn};

use crate::client::backend::HttpBackend;
use crate::client::controller::SessionController;
use crate::client::storage::{FileStorage, MemoryStorage};
use crate::config::load_quiz_config_from_env;
use crate::routes::build_router;
use crate::state::AppState;
use crate::telemetry::LogSink;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_STORAGE_PATH: &str = ".verbos/storage.json";

fn port_from_env() -> u16 {
  std::env::var("PORT").ok().and_then(|p| p.parse::<u16>().ok()).unwrap_or(DEFAULT_PORT)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  match std::env::args().nth(1).as_deref() {
    None | Some("serve") => {
      telemetry::init_tracing(LogSink::Stdout);
      serve().await
    }
    Some("drill") => {
      telemetry::init_tracing(LogSink::Stderr);
      drill().await
    }
    Some(other) => Err(format!("unknown command '{other}' (expected 'serve' or 'drill')").into()),
  }
}

#[instrument(level = "info")]
async fn serve() -> Result<(), Box<dyn std::error::Error>> {
  // Verb bank from built-in seeds plus the optional TOML bank.
  let state = Arc::new(AppState::new());
  let app = build_router(state);

  let addr = SocketAddr::from(([0, 0, 0, 0], port_from_env()));
  let listener = TcpListener::bind(addr).await?;
  info!(target: "verbos_backend", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(async {
      if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(target: "verbos_backend", error = %e, "Ctrl-C handler failed");
      }
    })
    .await?;
  info!(target: "verbos_backend", "HTTP server stopped");
  Ok(())
}

#[instrument(level = "info")]
async fn drill() -> Result<(), Box<dyn std::error::Error>> {
  let settings = load_quiz_config_from_env().unwrap_or_default().session;
  let base_url = std::env::var("QUIZ_SERVER_URL").unwrap_or_else(|_| format!("http://127.0.0.1:{}", port_from_env()));
  let backend = HttpBackend::new(&base_url)?;
  info!(target: "verbos_backend", %base_url, length = settings.length, "Starting drill");

  let storage_path = std::env::var("BEST_STREAK_PATH").unwrap_or_else(|_| DEFAULT_STORAGE_PATH.to_string());
  if storage_path.trim().is_empty() {
    let controller = SessionController::new(backend, MemoryStorage::default(), settings);
    client::terminal::run(controller).await?;
  } else {
    let storage = FileStorage::open(storage_path);
    info!(target: "verbos_backend", path = %storage.path().display(), "Best streak storage");
    let controller = SessionController::new(backend, storage, settings);
    client::terminal::run(controller).await?;
  }
  Ok(())
}
