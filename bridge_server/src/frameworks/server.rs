// Framework bootstrap for the bridge server runtime.

use crate::domain::tuning::world::WorldTuning;
use crate::frameworks::config;
use crate::frameworks::physics::RapierWorld;
use crate::interface_adapters::http::{frame_handler, not_found_handler};
use crate::interface_adapters::net::{world_update_serializer, ws_handler};
use crate::interface_adapters::state::AppState;
use crate::interface_adapters::utils::rng::sketch_rng;
use crate::use_cases::{Sketch, WorldUpdate, world_task};

use axum::{Router, extract::ws::Utf8Bytes, routing::get};
use std::net::SocketAddr;
use std::{io::Result, sync::Arc};
use tokio::sync::{Notify, broadcast, watch};

fn init_runtime() {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

pub async fn run(listener: tokio::net::TcpListener) -> Result<()> {
    let address = listener.local_addr()?;
    let shutdown = Arc::new(Notify::new());
    let state = build_state(shutdown.clone());

    let app = Router::new()
        .route("/ws", get(ws_handler))
        .route("/frame", get(frame_handler))
        .fallback(not_found_handler)
        .with_state(state);

    tracing::info!(%address, "listening");

    // Serve app and report errors rather than panicking
    let served = axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    });
    shutdown.notify_one();
    served
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let address = SocketAddr::from(([127, 0, 0, 1], config::http_port()));

    // Bind TCP listener with error handling
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener).await
}

/// Wire up the channels, then spawn the sketch loop and the update serializer.
fn build_state(shutdown: Arc<Notify>) -> Arc<AppState> {
    let frame = config::frame();
    let flip_horizontal = config::flip_horizontal();
    let seed = config::rng_seed();

    // hands_tx/rx: latest observation cell, written by sockets and read per tick.
    let (hands_tx, hands_rx) = watch::channel(None);

    // world_tx/rx: World updates are broadcast to the serializer.
    let (world_tx, _world_rx) = broadcast::channel::<WorldUpdate>(config::WORLD_BROADCAST_CAPACITY);

    // world_bytes_tx/rx: Serialized world updates shared across all clients.
    let (world_bytes_tx, _world_bytes_rx) =
        broadcast::channel::<Utf8Bytes>(config::WORLD_BROADCAST_CAPACITY);
    let (world_latest_tx, _world_latest_rx) = watch::channel::<Utf8Bytes>(Utf8Bytes::from(""));

    tracing::debug!(
        width = frame.width,
        height = frame.height,
        flip_horizontal,
        seeded = seed.is_some(),
        "sketch configured"
    );

    // Subscribe the serializer before the loop can produce its first update.
    tokio::spawn(world_update_serializer(
        world_tx.subscribe(),
        world_bytes_tx.clone(),
        world_latest_tx.clone(),
    ));

    let sketch = Sketch::new(RapierWorld::new(WorldTuning::default()), frame);
    tokio::spawn(world_task(
        sketch,
        hands_rx,
        world_tx,
        config::TICK_INTERVAL,
        sketch_rng(seed),
        shutdown,
    ));

    Arc::new(AppState {
        hands_tx,
        world_bytes_tx,
        world_latest_tx,
        frame,
        flip_horizontal,
    })
}
