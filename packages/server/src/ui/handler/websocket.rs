//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Path, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, SessionId},
    infrastructure::dto::websocket::InboundMessage,
    ui::state::AppState,
};

/// Upgrade `GET /ws/{session_id}`. The session id names the room.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, StatusCode> {
    let session_id = match SessionId::try_from(session_id) {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!("Rejecting connection with invalid session id: {}", e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, session_id)))
}

/// Spawns a task that receives messages from the rx channel and pushes them to
/// the WebSocket sender.
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, session_id: SessionId) {
    let (sender, mut receiver) = socket.split();
    let (tx, rx) = mpsc::unbounded_channel();

    let connection_id = state
        .connect_participant_usecase
        .execute(session_id.clone(), tx)
        .await;
    tracing::info!(
        "Client '{}' connected to session '{}'",
        connection_id,
        session_id
    );

    // Spawn a task to push room events to this client
    let mut send_task = pusher_loop(rx, sender);

    // Spawn a task to receive commands from this client
    let recv_state = Arc::clone(&state);
    let recv_session_id = session_id.clone();
    let recv_connection_id = connection_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error from '{}': {}", recv_connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    handle_text(
                        &recv_state,
                        &recv_session_id,
                        &recv_connection_id,
                        text.as_str(),
                    )
                    .await;
                }
                Message::Close(_) => {
                    tracing::info!("Client '{}' requested close", recv_connection_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    match state
        .disconnect_participant_usecase
        .execute(&session_id, &connection_id)
        .await
    {
        Ok(remaining) => tracing::info!(
            "Client '{}' disconnected from session '{}' ({} remaining)",
            connection_id,
            session_id,
            remaining
        ),
        Err(e) => tracing::warn!("Failed to disconnect client '{}': {}", connection_id, e),
    }
}

/// Decode one text frame and run it as a command.
///
/// Malformed envelopes and rejected payloads are logged and dropped.
async fn handle_text(
    state: &AppState,
    session_id: &SessionId,
    connection_id: &ConnectionId,
    text: &str,
) {
    let message = match serde_json::from_str::<InboundMessage>(text) {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!(
                "Dropping malformed message from '{}': {}",
                connection_id,
                e
            );
            return;
        }
    };

    if let Err(e) = state
        .handle_command_usecase
        .execute(session_id, connection_id, &message.action, &message.data)
        .await
    {
        tracing::warn!(
            "Failed to handle '{}' from '{}': {}",
            message.action,
            connection_id,
            e
        );
    }
}
