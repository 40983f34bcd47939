//! Ticker Stream Binary
//!
//! Starts the price-stream client: one SSE subscription, one session
//! driving the terminal presentation surfaces.
//!
//! # Usage
//!
//! ```bash
//! TICKER_STREAM_URL=http://localhost:8080/sse cargo run -p ticker-stream
//! ```
//!
//! # Environment Variables
//!
//! ## Required
//! - `TICKER_STREAM_URL`: SSE endpoint delivering the price stream
//!
//! ## Optional
//! - `TICKER_RECONNECT_DELAY_INITIAL_MS`: first backoff delay (default: 1000)
//! - `TICKER_RECONNECT_DELAY_MAX_SECS`: backoff ceiling (default: 30)
//! - `TICKER_RECONNECT_DELAY_MULTIPLIER`: backoff growth factor (default: 2.0)
//! - `TICKER_MAX_RECONNECT_ATTEMPTS`: 0 = retry forever (default: 0)
//! - `TICKER_IDLE_TIMEOUT_SECS`: stale-stream watchdog (default: 90)
//! - `TICKER_HISTORY_RETENTION`: history cap, 0 = unbounded (default: 256)
//! - `TICKER_PRICE_DECIMALS`: price decimal places (default: 2)
//! - `TICKER_SIGNAL_CAPACITY`: transport channel capacity (default: 256)
//! - `RUST_LOG`: log filter (default: info)

use tokio::signal;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use ticker_stream::infrastructure::telemetry;
use ticker_stream::{
    ConsoleSurfaces, PriceHistory, Renderer, SseTransport, SseTransportConfig, StreamSession,
    TickerConfig, TransportSignal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    telemetry::init();

    tracing::info!("Starting ticker stream client");

    let config = TickerConfig::from_env()?;
    log_config(&config);

    let shutdown_token = CancellationToken::new();
    let (signal_tx, signal_rx) = mpsc::channel::<TransportSignal>(config.signal_capacity);

    // Transport adapter: owns the subscription and all reconnect behavior.
    let transport = SseTransport::new(
        SseTransportConfig::from_settings(&config.stream_url, &config.stream),
        signal_tx,
        shutdown_token.clone(),
    );
    let transport_handle = tokio::spawn(async move {
        if let Err(e) = transport.run().await {
            tracing::error!(error = %e, "SSE transport error");
        }
    });

    // Session: sole consumer of the signal channel, owns presentation state.
    let renderer = Renderer::new(
        ConsoleSurfaces::new(),
        PriceHistory::new(config.presentation.history_retention),
        config.presentation.price_decimals,
    );
    let session = StreamSession::new(signal_rx, renderer, shutdown_token.clone());
    let session_handle = tokio::spawn(session.run());

    tracing::info!("Ticker stream client ready");

    await_shutdown(shutdown_token).await;

    let _ = transport_handle.await;
    let _ = session_handle.await;

    tracing::info!("Ticker stream client stopped");
    Ok(())
}

/// Load a .env file from the current or any ancestor directory.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

/// Log the parsed configuration.
fn log_config(config: &TickerConfig) {
    tracing::info!(
        url = %config.stream_url,
        idle_timeout_secs = config.stream.idle_timeout.as_secs(),
        max_reconnect_attempts = config.stream.max_reconnect_attempts,
        history_retention = config.presentation.history_retention,
        "Configuration loaded"
    );
}

/// Wait for shutdown signal (SIGTERM or SIGINT), then cancel.
#[allow(clippy::expect_used)]
async fn await_shutdown(shutdown_token: CancellationToken) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("signal handler installation is critical for graceful shutdown");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation is critical for graceful shutdown")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }

    shutdown_token.cancel();
}
