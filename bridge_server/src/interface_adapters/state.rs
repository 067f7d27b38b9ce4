use crate::domain::Frame;
use crate::use_cases::TrackedHand;
use axum::extract::ws::Utf8Bytes;
use tokio::sync::{broadcast, watch};

pub struct AppState {
    // Latest hand observation and the connection that sent it; the sketch
    // loop reads it once per tick.
    pub hands_tx: watch::Sender<Option<TrackedHand>>,
    // Serialized world updates, shared across all connections.
    pub world_bytes_tx: broadcast::Sender<Utf8Bytes>,
    // Latest serialized world update for lag recovery.
    pub world_latest_tx: watch::Sender<Utf8Bytes>,
    pub frame: Frame,
    pub flip_horizontal: bool,
}
