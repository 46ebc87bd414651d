// Framework bootstrap for the scene server runtime.

use crate::frameworks::config;
use crate::interface_adapters::net::{
    reset_session_handler, scene_update_serializer, set_level_handler, ws_handler,
};
use crate::interface_adapters::state::AppState;
use crate::use_cases::scene::CountdownTuning;
use crate::use_cases::{
    MirrorMessage, SceneEvent, SceneTuning, SceneUpdate, SessionState, scene_task,
};

use axum::extract::ws::Utf8Bytes;
use axum::{
    Router,
    routing::{get, post},
};
use std::io::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::{Notify, broadcast, mpsc, watch};

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
    let state = build_state();

    let app = Router::new()
        .route("/ws", get(ws_handler))
        .route("/session/level", post(set_level_handler))
        .route("/session/reset", post(reset_session_handler))
        .with_state(state);

    tracing::info!(%address, "listening");

    // Serve app and report errors rather than panicking
    axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })
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

fn build_state() -> Arc<AppState> {
    // Channel wiring for the scene loop.
    let (event_tx, event_rx) = mpsc::channel::<SceneEvent>(config::EVENT_CHANNEL_CAPACITY);
    let (update_tx, _update_rx) =
        broadcast::channel::<SceneUpdate>(config::UPDATE_BROADCAST_CAPACITY);
    let (update_bytes_tx, _update_bytes_rx) =
        broadcast::channel::<Utf8Bytes>(config::UPDATE_BROADCAST_CAPACITY);
    let (update_latest_tx, _update_latest_rx) = watch::channel::<Utf8Bytes>(Utf8Bytes::from(""));
    let (mirror_tx, _mirror_rx) =
        broadcast::channel::<MirrorMessage>(config::MIRROR_BROADCAST_CAPACITY);
    let (session_state_tx, _session_state_rx) = watch::channel(SessionState::Running);
    let scene_shutdown = Arc::new(Notify::new());

    let tuning = SceneTuning {
        countdown: CountdownTuning {
            seconds: config::countdown_seconds(),
        },
        ..SceneTuning::default()
    };

    // Spawn the scene loop; it owns all entity state.
    tokio::spawn(scene_task(
        event_rx,
        update_tx.clone(),
        mirror_tx.clone(),
        session_state_tx.clone(),
        config::TICK_INTERVAL,
        scene_shutdown.clone(),
        tuning,
    ));

    // Spawn the scene update serializer task in the adapter layer.
    tokio::spawn(scene_update_serializer(
        update_tx.subscribe(),
        update_bytes_tx.clone(),
        update_latest_tx.clone(),
    ));

    Arc::new(AppState {
        event_tx,
        update_tx,
        update_bytes_tx,
        update_latest_tx,
        mirror_tx,
        session_state_tx,
        scene_shutdown,
    })
}
