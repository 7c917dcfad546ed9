use axum::extract::ws::{Message, WebSocket};
use axum::{
    extract::{State, WebSocketUpgrade},
    response::Response,
};
use chrono::Utc;
use futures_util::{SinkExt, StreamExt};
use serde::Serialize;
use serde_json::json;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::handlers;
use crate::state::AppState;
use crate::widget::WidgetView;

#[derive(Serialize)]
struct StateMessage<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(flatten)]
    view: &'a WidgetView,
}

/// Encode an outgoing frame. A failure is logged and the frame is skipped.
fn encode<T: Serialize>(message: &T) -> Option<String> {
    match serde_json::to_string(message) {
        Ok(text) => Some(text),
        Err(e) => {
            error!("Failed to encode websocket message: {}", e);
            None
        }
    }
}

pub fn state_message(view: &WidgetView) -> Option<String> {
    encode(&StateMessage {
        kind: "widget-state",
        view,
    })
}

pub async fn websocket_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let client_uid = state.generate_client_uid();
    info!("New WebSocket connection: {}", client_uid);
    state.clients.insert(client_uid.clone(), Utc::now());

    let (mut sender, mut receiver) = socket.split();
    let mut views = state.controller.subscribe();
    let (error_tx, mut error_rx) = mpsc::unbounded_channel::<String>();

    // Push the current view, then every change, plus error notices for this page.
    let mut push_task = tokio::spawn(async move {
        let initial = views.borrow_and_update().clone();
        if let Some(text) = state_message(&initial) {
            if sender.send(Message::Text(text)).await.is_err() {
                return;
            }
        }

        loop {
            let outgoing = tokio::select! {
                changed = views.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let view = views.borrow_and_update().clone();
                    state_message(&view)
                }
                Some(message) = error_rx.recv() => {
                    Some(json!({ "type": "error", "message": message }).to_string())
                }
            };
            let Some(outgoing) = outgoing else {
                continue;
            };

            if let Err(e) = sender.send(Message::Text(outgoing)).await {
                debug!("Stopped pushing to client: {}", e);
                break;
            }
        }
    });

    loop {
        tokio::select! {
            msg = receiver.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        if let Err(e) = handlers::handle_message(&state, &client_uid, &text).await {
                            warn!("Rejected message from {}: {}", client_uid, e);
                            let _ = error_tx.send(e.to_string());
                            // Resend the state so the page drops its rejected edit.
                            state.controller.republish().await;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        info!("Client {} disconnected", client_uid);
                        break;
                    }
                    Some(Err(e)) => {
                        error!("WebSocket error: {}", e);
                        break;
                    }
                    Some(Ok(_)) => {}
                }
            }
            _ = &mut push_task => {
                break;
            }
        }
    }

    push_task.abort();
    state.clients.remove(&client_uid);
    info!("Cleaned up client {}", client_uid);
}
