use crate::interface_adapters::protocol::{
    ClientMessage, SceneUpdateDto, ServerMessage, SessionStateDto,
};
use crate::interface_adapters::state::AppState;
use crate::interface_adapters::utils::ids::next_id;
use crate::use_cases::{MirrorMessage, SceneEvent, SceneUpdate, SessionState};

use axum::{
    extract::{
        State,
        ws::{Message, Utf8Bytes, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, watch};
use tracing::{debug, error, info, info_span, warn};

#[derive(Debug)]
enum NetError {
    // Categorizes connection lifecycle failures so callers can decide policy.
    #[allow(dead_code)]
    Ws(axum::Error),
    #[allow(dead_code)]
    Serialization(serde_json::Error),
    EventsClosed,
    UpdatesClosed,
    MirrorClosed,
    SessionStateClosed,
}

impl From<axum::Error> for NetError {
    fn from(e: axum::Error) -> Self {
        NetError::Ws(e)
    }
}

/// Serializes each scene update once and broadcasts the shared bytes to
/// every connection, keeping the latest copy in a watch slot for clients
/// that lag behind.
pub async fn scene_update_serializer(
    mut update_rx: broadcast::Receiver<SceneUpdate>,
    update_bytes_tx: broadcast::Sender<Utf8Bytes>,
    update_latest_tx: watch::Sender<Utf8Bytes>,
) {
    loop {
        match update_rx.recv().await {
            Ok(update) => {
                let msg = ServerMessage::SceneUpdate(SceneUpdateDto::from(update));
                let txt = match serde_json::to_string(&msg) {
                    Ok(txt) => txt,
                    Err(e) => {
                        error!(error = ?e, "failed to serialize scene update");
                        continue;
                    }
                };

                // Convert once and broadcast shared UTF-8 bytes to all clients.
                let bytes = Utf8Bytes::from(txt);
                let _ = update_latest_tx.send(bytes.clone());
                let _ = update_bytes_tx.send(bytes);
            }
            Err(broadcast::error::RecvError::Lagged(n)) => {
                warn!(
                    missed = n,
                    "scene serializer lagged; skipping to latest update"
                );
            }
            Err(broadcast::error::RecvError::Closed) => {
                warn!("scene updates channel closed; serializer exiting");
                break;
            }
        }
    }
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>) {
    let conn_id = next_id();
    let span = info_span!("conn", conn_id);
    let _enter = span.enter();

    let mut ctx = ConnCtx {
        event_tx: state.event_tx.clone(),
        update_bytes_rx: state.update_bytes_tx.subscribe(),
        update_latest_rx: state.update_latest_tx.subscribe(),
        mirror_rx: state.mirror_tx.subscribe(),
        session_state_rx: state.session_state_tx.subscribe(),
        msgs_in: 0,
        msgs_out: 0,
        invalid_json: 0,
        lag_recovery_count: 0,
    };

    info!("client connected");

    match run_client_loop(&mut socket, &mut ctx).await {
        Ok(()) => info!(
            msgs_in = ctx.msgs_in,
            msgs_out = ctx.msgs_out,
            invalid_json = ctx.invalid_json,
            lag_recoveries = ctx.lag_recovery_count,
            "client disconnected"
        ),
        Err(e) => warn!(error = ?e, "client loop exited with error"),
    }
    let _ = socket.send(Message::Close(None)).await;
}

struct ConnCtx {
    event_tx: mpsc::Sender<SceneEvent>,
    update_bytes_rx: broadcast::Receiver<Utf8Bytes>,
    update_latest_rx: watch::Receiver<Utf8Bytes>,
    mirror_rx: broadcast::Receiver<MirrorMessage>,
    session_state_rx: watch::Receiver<SessionState>,

    msgs_in: u64,
    msgs_out: u64,
    invalid_json: u32,
    // Count lag recovery snapshots sent to this client.
    lag_recovery_count: u64,
}

async fn run_client_loop(socket: &mut WebSocket, ctx: &mut ConnCtx) -> Result<(), NetError> {
    loop {
        tokio::select! {
            inbound = socket.recv() => {
                match inbound {
                    None => return Ok(()),
                    Some(Err(e)) => return Err(NetError::Ws(e)),
                    Some(Ok(Message::Text(txt))) => {
                        ctx.msgs_in += 1;
                        handle_client_text(ctx, &txt).await?;
                    }
                    Some(Ok(Message::Close(_))) => return Ok(()),
                    // Ping/pong are answered by axum; binary frames are not
                    // part of the protocol.
                    Some(Ok(_)) => {}
                }
            }
            update = ctx.update_bytes_rx.recv() => {
                match update {
                    Ok(bytes) => {
                        socket.send(Message::Text(bytes)).await?;
                        ctx.msgs_out += 1;
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        // Skip the backlog and resync from the latest snapshot.
                        let latest = ctx.update_latest_rx.borrow_and_update().clone();
                        if !latest.is_empty() {
                            socket.send(Message::Text(latest)).await?;
                            ctx.msgs_out += 1;
                            ctx.lag_recovery_count += 1;
                        }
                        debug!(missed = n, "client lagged; sent latest snapshot");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        return Err(NetError::UpdatesClosed);
                    }
                }
            }
            mirror = ctx.mirror_rx.recv() => {
                match mirror {
                    Ok(msg) => {
                        send_message(socket, &ServerMessage::Mirror(msg.into())).await?;
                        ctx.msgs_out += 1;
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        // Position updates are absolute, so dropped ones are
                        // superseded by the next send.
                        debug!(missed = n, "mirror stream lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        return Err(NetError::MirrorClosed);
                    }
                }
            }
            changed = ctx.session_state_rx.changed() => {
                changed.map_err(|_| NetError::SessionStateClosed)?;
                let dto = SessionStateDto::from(*ctx.session_state_rx.borrow_and_update());
                send_message(socket, &ServerMessage::SessionState(dto)).await?;
                ctx.msgs_out += 1;
            }
        }
    }
}

async fn handle_client_text(ctx: &mut ConnCtx, txt: &str) -> Result<(), NetError> {
    match serde_json::from_str::<ClientMessage>(txt) {
        Ok(msg) => {
            let event = SceneEvent::from(msg);
            ctx.event_tx
                .send(event)
                .await
                .map_err(|_| NetError::EventsClosed)?;
        }
        Err(e) => {
            ctx.invalid_json += 1;
            debug!(error = %e, "ignoring invalid client message");
        }
    }
    Ok(())
}

async fn send_message(socket: &mut WebSocket, msg: &ServerMessage) -> Result<(), NetError> {
    // Serialize per message; these streams are low-volume compared to the
    // shared scene update bytes.
    let txt = serde_json::to_string(msg).map_err(NetError::Serialization)?;
    socket.send(Message::Text(txt.into())).await?;
    Ok(())
}
