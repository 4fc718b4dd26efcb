//! WebSocket upgrade + message loop. Each client message is parsed as JSON and
//! forwarded to core logic. We reply with a single JSON message per request.
//!
//! Drag releases arrive here one at a time per connection, so each is fully
//! applied before the next is read.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{info, error, instrument, debug};

use crate::error::AttemptError;
use crate::logic;
use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "shade_assessment", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "shade_assessment", "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        let reply_msg = match serde_json::from_str::<ClientWsMessage>(&txt) {
          Ok(incoming) => {
            debug!(target: "shade_assessment", "WS received: {:?}", &incoming);
            handle_client_ws(incoming, &state).await
          }
          Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
        };

        let out = serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
          serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
        });

        if let Err(e) = socket.send(Message::Text(out)).await {
          error!(target: "shade_assessment", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "shade_assessment", "WebSocket disconnected");
}

fn reply<T>(result: Result<T, AttemptError>, ok: impl FnOnce(T) -> ServerWsMessage) -> ServerWsMessage {
  match result {
    Ok(v) => ok(v),
    Err(e) => ServerWsMessage::Error { message: e.to_string() },
  }
}

#[instrument(level = "info", skip(state))]
pub async fn handle_client_ws(msg: ClientWsMessage, state: &AppState) -> ServerWsMessage {
  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,

    ClientWsMessage::StartAttempt { name, age } => {
      let result = logic::start_attempt(state, name.as_deref(), age).await;
      reply(result, |attempt| ServerWsMessage::Attempt { attempt })
    }

    ClientWsMessage::CurrentQuestion { attempt_id } => {
      reply(logic::current_question(state, attempt_id).await, |question| ServerWsMessage::Question { question })
    }

    ClientWsMessage::DragRelease { attempt_id, event } => {
      reply(logic::drag_release(state, attempt_id, &event).await, |result| ServerWsMessage::DragResult { result })
    }

    ClientWsMessage::Navigate { attempt_id, target } => {
      reply(logic::navigate(state, attempt_id, target).await, |question| ServerWsMessage::Question { question })
    }

    ClientWsMessage::Pagination { attempt_id, query } => {
      reply(logic::pagination(state, attempt_id, query).await, |pagination| ServerWsMessage::Pagination { pagination })
    }

    ClientWsMessage::Submit { attempt_id } => {
      reply(logic::submit(state, attempt_id).await, |submission| ServerWsMessage::Submitted { submission })
    }

    ClientWsMessage::Abandon { attempt_id } => {
      reply(logic::abandon(state, attempt_id).await, |()| ServerWsMessage::Abandoned)
    }
  }
}
