use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use metrics::gauge;
use serde::Serialize;

use crate::api::ws_types::{ClientMessage, ConnectionReply, DetailReply};
use crate::services::detail::{DetailScope, FetchState};
use crate::AppState;

pub async fn handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// Serialize and send. `false` means the socket is gone.
async fn send_json<T: Serialize>(socket: &mut WebSocket, value: &T) -> bool {
    match serde_json::to_string(value) {
        Ok(json) => socket.send(Message::Text(json)).await.is_ok(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize WebSocket payload");
            true
        }
    }
}

async fn handle_client_text(socket: &mut WebSocket, scope: &mut DetailScope, text: &str) -> bool {
    match serde_json::from_str::<ClientMessage>(text) {
        Ok(ClientMessage::OpenDetail { symbol }) => {
            let symbol = scope.open(&symbol);
            tracing::debug!(symbol = %symbol, in_flight = scope.in_flight(), "Detail load started");
            let reply = ConnectionReply::Detail(DetailReply {
                symbol,
                result: FetchState::Pending,
            });
            send_json(socket, &reply).await
        }
        Ok(ClientMessage::CancelAll) => {
            scope.cancel_all();
            true
        }
        Err(e) => {
            let reply = ConnectionReply::Error {
                message: format!("unrecognised message: {e}"),
            };
            send_json(socket, &reply).await
        }
    }
}

async fn handle_socket(mut socket: WebSocket, state: AppState) {
    tracing::info!("Dashboard WebSocket client connected");
    gauge!("ws_clients").increment(1.0);

    let mut rx = state.events_tx.subscribe();
    let mut scope = DetailScope::new(state.clone());

    loop {
        tokio::select! {
            // Dashboard-wide events
            msg = rx.recv() => {
                match msg {
                    Ok(event) => {
                        if !send_json(&mut socket, &event).await {
                            break;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(skipped = n, "Dashboard WS client lagged");
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                        break;
                    }
                }
            }
            // Detail loads owned by this connection
            settled = scope.next_settled(), if scope.in_flight() > 0 => {
                if let Some((symbol, result)) = settled {
                    let reply = ConnectionReply::Detail(DetailReply { symbol, result });
                    if !send_json(&mut socket, &reply).await {
                        break;
                    }
                }
            }
            client_msg = socket.recv() => {
                match client_msg {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Text(text))) => {
                        if !handle_client_text(&mut socket, &mut scope, &text).await {
                            break;
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(_)) => break,
                }
            }
        }
    }

    // Aborts whatever is still loading for this client.
    drop(scope);
    gauge!("ws_clients").decrement(1.0);
    tracing::info!("Dashboard WebSocket client disconnected");
}
