use crate::interface_adapters::protocol::{ClientMessage, FrameDto, ServerMessage, WorldUpdateDto};
use crate::interface_adapters::state::AppState;
use crate::interface_adapters::utils::rng::conn_id;
use crate::use_cases::{TrackedHand, WorldUpdate};

use axum::{
    Error,
    extract::{
        State,
        ws::{CloseFrame, Message, Utf8Bytes, WebSocket, WebSocketUpgrade, close_code},
    },
    response::IntoResponse,
};
use futures::SinkExt;
use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::{broadcast, watch};
use tracing::{Instrument, debug, error, info, info_span, warn};

#[derive(Debug)]
enum NetError {
    #[allow(dead_code)]
    Ws(axum::Error),
    #[allow(dead_code)]
    Serialization(serde_json::Error),
    WorldUpdatesClosed,
}

const LOG_THROTTLE: Duration = Duration::from_secs(2);
const MAX_INVALID_JSON: u32 = 10;

pub async fn world_update_serializer(
    mut world_rx: broadcast::Receiver<WorldUpdate>,
    world_bytes_tx: broadcast::Sender<Utf8Bytes>,
    world_latest_tx: watch::Sender<Utf8Bytes>,
) {
    // Serialize each world update once and broadcast the shared bytes.
    loop {
        match world_rx.recv().await {
            Ok(update) => {
                let msg = ServerMessage::WorldUpdate(WorldUpdateDto::from(update));
                let txt = match serde_json::to_string(&msg) {
                    Ok(txt) => txt,
                    Err(e) => {
                        error!(error = ?e, "failed to serialize world update");
                        continue;
                    }
                };

                let bytes = Utf8Bytes::from(txt);
                let _ = world_latest_tx.send(bytes.clone());
                let _ = world_bytes_tx.send(bytes);
            }
            Err(broadcast::error::RecvError::Lagged(n)) => {
                warn!(missed = n, "world serializer lagged; skipping to latest update");
            }
            Err(broadcast::error::RecvError::Closed) => {
                warn!("world updates channel closed; serializer exiting");
                break;
            }
        }
    }
}

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let id = conn_id();
    let span = info_span!("conn", conn_id = id);
    ws.on_upgrade(move |socket| handle_socket(socket, state, id).instrument(span))
}

async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>, conn_id: u64) {
    // Subscribe before the first await so no update is missed.
    let world_bytes_rx = state.world_bytes_tx.subscribe();
    let world_latest_rx = state.world_latest_tx.subscribe();

    let frame_msg = ServerMessage::Frame(FrameDto::new(state.frame, state.flip_horizontal));
    let frame_bytes = match send_message(&mut socket, &frame_msg).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = ?e, "failed to send frame setup");
            return;
        }
    };

    info!("client connected");

    let now = Instant::now() - LOG_THROTTLE;
    let mut ctx = ConnCtx {
        conn_id,
        hands_tx: state.hands_tx.clone(),
        world_bytes_rx,
        world_latest_rx,
        lag_recovery_count: 0,
        msgs_in: 0,
        msgs_out: 1,
        bytes_in: 0,
        bytes_out: frame_bytes as u64,
        invalid_json: 0,
        last_invalid_input_log: now,
        last_world_lag_log: now,
        close_frame: None,
    };

    if let Err(e) = run_client_loop(&mut socket, &mut ctx).await {
        warn!(error = ?e, "client loop exited with error");
    }
}

async fn send_message(socket: &mut WebSocket, msg: &ServerMessage) -> Result<usize, NetError> {
    let txt = serde_json::to_string(msg).map_err(NetError::Serialization)?;
    let bytes = txt.len();
    socket
        .send(Message::Text(txt.into()))
        .await
        .map_err(NetError::Ws)?;
    Ok(bytes)
}

struct ConnCtx {
    conn_id: u64,
    hands_tx: watch::Sender<Option<TrackedHand>>,
    world_bytes_rx: broadcast::Receiver<Utf8Bytes>,
    world_latest_rx: watch::Receiver<Utf8Bytes>,
    lag_recovery_count: u64,

    msgs_in: u64,
    msgs_out: u64,
    bytes_in: u64,
    bytes_out: u64,

    invalid_json: u32,

    last_invalid_input_log: Instant,
    last_world_lag_log: Instant,

    close_frame: Option<CloseFrame>,
}

enum LoopControl {
    Continue,
    Disconnect,
}

// One step of the shared world feed, as seen by a single connection.
#[derive(Debug)]
enum WorldFeed {
    Update(Utf8Bytes),
    // The receiver fell behind; the backlog is dropped for the newest snapshot.
    Resync { missed: u64, latest: Utf8Bytes },
    // Fell behind before any snapshot existed.
    Skipped { missed: u64 },
    Closed,
}

// Wait for the next serialized update. On lag the receiver is moved to the
// live end of the channel so stale buffered updates never follow the resync.
async fn recv_world_update(
    world_bytes_rx: &mut broadcast::Receiver<Utf8Bytes>,
    world_latest_rx: &watch::Receiver<Utf8Bytes>,
) -> WorldFeed {
    match world_bytes_rx.recv().await {
        Ok(bytes) => WorldFeed::Update(bytes),
        Err(broadcast::error::RecvError::Lagged(missed)) => {
            *world_bytes_rx = world_bytes_rx.resubscribe();
            let latest = world_latest_rx.borrow().clone();
            if latest.is_empty() {
                WorldFeed::Skipped { missed }
            } else {
                WorldFeed::Resync { missed, latest }
            }
        }
        Err(broadcast::error::RecvError::Closed) => WorldFeed::Closed,
    }
}

fn should_log(last: &mut Instant) -> bool {
    if last.elapsed() >= LOG_THROTTLE {
        *last = Instant::now();
        true
    } else {
        false
    }
}

async fn run_client_loop(socket: &mut WebSocket, ctx: &mut ConnCtx) -> Result<(), NetError> {
    let mut fatal: Option<NetError> = None;

    loop {
        let disconnect: bool = tokio::select! {
            incoming = socket.recv() => {
                match handle_incoming_ws(incoming, ctx) {
                    LoopControl::Continue => false,
                    LoopControl::Disconnect => true,
                }
            }

            feed = recv_world_update(&mut ctx.world_bytes_rx, &ctx.world_latest_rx) => {
                match feed {
                    WorldFeed::Update(bytes) => match forward_world_bytes(bytes, socket, ctx).await {
                        LoopControl::Continue => false,
                        LoopControl::Disconnect => true,
                    },
                    WorldFeed::Resync { missed, latest } => {
                        if should_log(&mut ctx.last_world_lag_log) {
                            warn!(missed, "world updates lagged; sending snapshot");
                        }
                        ctx.lag_recovery_count += 1;
                        debug!(count = ctx.lag_recovery_count, "sending lag recovery snapshot");
                        match forward_world_bytes(latest, socket, ctx).await {
                            LoopControl::Continue => false,
                            LoopControl::Disconnect => true,
                        }
                    }
                    WorldFeed::Skipped { missed } => {
                        if should_log(&mut ctx.last_world_lag_log) {
                            warn!(missed, "world updates lagged before first snapshot");
                        }
                        false
                    }
                    WorldFeed::Closed => {
                        fatal = Some(NetError::WorldUpdatesClosed);
                        true
                    }
                }
            }
        };

        if disconnect {
            if let Some(frame) = ctx.close_frame.take() {
                let _ = socket.send(Message::Close(Some(frame))).await;
            }
            if let Err(err) = socket.close().await.map_err(NetError::Ws) {
                debug!(error = ?err, "socket close error");
            }
            break;
        }
    }

    // Drop the hand only if this connection published the one in the cell;
    // anchors stay where they are.
    let conn_id = ctx.conn_id;
    let cleared = ctx.hands_tx.send_if_modified(|slot| {
        if slot.as_ref().is_some_and(|hand| hand.source == conn_id) {
            *slot = None;
            true
        } else {
            false
        }
    });
    if cleared {
        debug!("cleared hand published by this connection");
    }

    info!(
        msgs_in = ctx.msgs_in,
        msgs_out = ctx.msgs_out,
        bytes_in = ctx.bytes_in,
        bytes_out = ctx.bytes_out,
        invalid_json = ctx.invalid_json,
        lag_recovery = ctx.lag_recovery_count,
        "client disconnected"
    );

    match fatal {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn handle_incoming_ws(incoming: Option<Result<Message, Error>>, ctx: &mut ConnCtx) -> LoopControl {
    match incoming {
        Some(Ok(msg)) => match msg {
            Message::Text(text) => {
                ctx.msgs_in += 1;
                ctx.bytes_in += text.len() as u64;

                match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(ClientMessage::Hands(payload)) => {
                        let observation = match payload.into_observation() {
                            Ok(observation) => observation,
                            Err(e) => {
                                if should_log(&mut ctx.last_invalid_input_log) {
                                    warn!(error = %e, "unusable hand observation; treating as no hand");
                                }
                                None
                            }
                        };
                        let source = ctx.conn_id;
                        ctx.hands_tx.send_replace(
                            observation.map(|observation| TrackedHand { source, observation }),
                        );
                        LoopControl::Continue
                    }
                    Err(parse_err) => {
                        ctx.invalid_json += 1;
                        if should_log(&mut ctx.last_invalid_input_log) {
                            warn!(
                                bytes = text.len(),
                                error = %parse_err,
                                "failed to parse client message"
                            );
                        }

                        if ctx.invalid_json > MAX_INVALID_JSON {
                            ctx.close_frame = Some(CloseFrame {
                                code: close_code::POLICY,
                                reason: "too many invalid messages".into(),
                            });
                            return LoopControl::Disconnect;
                        }

                        LoopControl::Continue
                    }
                }
            }
            Message::Binary(_) => {
                ctx.close_frame = Some(CloseFrame {
                    code: close_code::UNSUPPORTED,
                    reason: "binary messages not supported".into(),
                });
                LoopControl::Disconnect
            }
            Message::Ping(_) | Message::Pong(_) => LoopControl::Continue,
            Message::Close(_) => LoopControl::Disconnect,
        },
        Some(Err(e)) => {
            warn!(error = %e, "websocket recv error");
            LoopControl::Disconnect
        }
        None => {
            info!("websocket closed");
            LoopControl::Disconnect
        }
    }
}

async fn forward_world_bytes(world_msg: Utf8Bytes, socket: &mut WebSocket, ctx: &mut ConnCtx) -> LoopControl {
    let bytes_len = world_msg.len();
    match socket.send(Message::Text(world_msg)).await.map_err(NetError::Ws) {
        Ok(()) => {
            ctx.msgs_out += 1;
            ctx.bytes_out += bytes_len as u64;
            LoopControl::Continue
        }
        Err(err) => {
            warn!(error = ?err, "failed to send world update");
            LoopControl::Disconnect
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed() -> (
        broadcast::Sender<Utf8Bytes>,
        broadcast::Receiver<Utf8Bytes>,
        watch::Sender<Utf8Bytes>,
        watch::Receiver<Utf8Bytes>,
    ) {
        let (bytes_tx, bytes_rx) = broadcast::channel(2);
        let (latest_tx, latest_rx) = watch::channel(Utf8Bytes::from(""));
        (bytes_tx, bytes_rx, latest_tx, latest_rx)
    }

    fn publish(bytes_tx: &broadcast::Sender<Utf8Bytes>, latest_tx: &watch::Sender<Utf8Bytes>, n: u32) {
        let bytes = Utf8Bytes::from(n.to_string());
        latest_tx.send_replace(bytes.clone());
        bytes_tx.send(bytes).unwrap();
    }

    #[tokio::test]
    async fn when_receiver_lags_then_latest_snapshot_replaces_backlog() {
        let (bytes_tx, mut bytes_rx, latest_tx, latest_rx) = feed();
        for n in 1..=5 {
            publish(&bytes_tx, &latest_tx, n);
        }

        match recv_world_update(&mut bytes_rx, &latest_rx).await {
            WorldFeed::Resync { missed, latest } => {
                assert_eq!(missed, 3);
                assert_eq!(latest.as_str(), "5");
            }
            other => panic!("expected resync, got {other:?}"),
        }

        // Buffered updates older than the snapshot are not replayed.
        publish(&bytes_tx, &latest_tx, 6);
        match recv_world_update(&mut bytes_rx, &latest_rx).await {
            WorldFeed::Update(bytes) => assert_eq!(bytes.as_str(), "6"),
            other => panic!("expected update, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn when_receiver_lags_before_any_snapshot_then_update_is_skipped() {
        let (bytes_tx, mut bytes_rx, _latest_tx, latest_rx) = feed();
        for n in 1..=3 {
            bytes_tx.send(Utf8Bytes::from(n.to_string())).unwrap();
        }

        let result = recv_world_update(&mut bytes_rx, &latest_rx).await;

        assert!(matches!(result, WorldFeed::Skipped { missed: 1 }));
    }

    #[tokio::test]
    async fn when_serializer_is_gone_then_feed_reports_closed() {
        let (bytes_tx, mut bytes_rx, _latest_tx, latest_rx) = feed();
        drop(bytes_tx);

        let result = recv_world_update(&mut bytes_rx, &latest_rx).await;

        assert!(matches!(result, WorldFeed::Closed));
    }
}
