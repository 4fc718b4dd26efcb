//! Shade assessment · drag-and-drop color ordering backend
//!
//! - Axum HTTP + WebSocket API over the assessment engine
//! - Static UI shell fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT                   : u16 (default 3000)
//!   ASSESSMENT_CONFIG_PATH : path to TOML config (question catalog + submission sink)
//!   LOG_LEVEL              : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT             : "pretty" (default) or "json"

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use shade_assessment::routes::build_router;
use shade_assessment::state::AppState;
use shade_assessment::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Shared state: validated catalog, live attempts, submission sink.
  let state = Arc::new(AppState::from_env()?);

  let app = build_router(state.clone());

  // Read port from env or default to 3000.
  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "shade_assessment", %addr, "HTTP server listening");
  axum::serve(listener, app).await?;
  Ok(())
}
