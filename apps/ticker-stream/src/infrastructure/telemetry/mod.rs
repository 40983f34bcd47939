//! Tracing Initialization
//!
//! Configures the global tracing subscriber: an `EnvFilter` honoring
//! `RUST_LOG` with a sensible default, over a compact fmt layer.
//!
//! # Usage
//!
//! ```ignore
//! ticker_stream::infrastructure::telemetry::init();
//! tracing::info!("ready");
//! ```

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialize the global subscriber. Call once at startup.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ticker_stream=info,reqwest=warn,hyper=warn".into());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
