//! Stream Session Integration Tests
//!
//! Drives the session through the public transport-signal contract and
//! observes the presentation state that comes out the other side.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use ticker_stream::{
    PriceHistory, RecordingSurfaces, Renderer, StatusIndicator, StreamSession, TransportSignal,
};

fn success_frame(price: f64) -> TransportSignal {
    TransportSignal::Frame(format!(r#"{{"status":"success","data":{{"price":{price}}}}}"#))
}

async fn run_session(signals: Vec<TransportSignal>) -> Renderer<RecordingSurfaces> {
    let (tx, rx) = mpsc::channel(64);
    let renderer = Renderer::new(RecordingSurfaces::new(), PriceHistory::new(0), 2);
    let session = StreamSession::new(rx, renderer, CancellationToken::new());
    let handle = tokio::spawn(session.run());

    for signal in signals {
        tx.send(signal).await.unwrap();
    }
    drop(tx);

    timeout(Duration::from_secs(5), handle)
        .await
        .expect("session should finish after the channel drains")
        .unwrap()
}

#[tokio::test]
async fn renders_latest_price_and_lifo_history() {
    let renderer = run_session(vec![
        TransportSignal::Opened,
        success_frame(1.0),
        success_frame(2.0),
        success_frame(3.0),
    ])
    .await;

    let prices: Vec<_> = renderer
        .history()
        .entries()
        .map(|entry| entry.snapshot().price)
        .collect();
    assert_eq!(prices, vec![Some(3.0), Some(2.0), Some(1.0)]);
    assert_eq!(renderer.surfaces().current_value.as_deref(), Some("$3.00"));
}

#[tokio::test]
async fn success_with_partial_data_uses_placeholder_details() {
    let renderer = run_session(vec![
        TransportSignal::Opened,
        TransportSignal::Frame(r#"{"status":"success","data":{"price":42123.456}}"#.to_string()),
    ])
    .await;

    let surfaces = renderer.surfaces();
    assert_eq!(surfaces.current_value.as_deref(), Some("$42123.46"));
    assert!(surfaces.detail.as_deref().unwrap().contains("Loading..."));
}

#[tokio::test]
async fn waiting_keeps_value_and_history_unchanged() {
    let renderer = run_session(vec![
        TransportSignal::Opened,
        success_frame(10.0),
        TransportSignal::Frame(r#"{"status":"waiting"}"#.to_string()),
    ])
    .await;

    let surfaces = renderer.surfaces();
    assert_eq!(surfaces.current_value.as_deref(), Some("$10.00"));
    assert_eq!(renderer.history().len(), 1);
    assert!(surfaces.statuses.contains(&StatusIndicator::WAITING));
}

#[tokio::test]
async fn malformed_frame_is_silently_discarded() {
    let renderer = run_session(vec![
        TransportSignal::Opened,
        success_frame(10.0),
        TransportSignal::Frame("not-json".to_string()),
        success_frame(11.0),
    ])
    .await;

    // The bad frame neither rendered nor corrupted the queue.
    assert_eq!(renderer.history().len(), 2);
    assert_eq!(renderer.surfaces().current_value.as_deref(), Some("$11.00"));
}

#[tokio::test]
async fn transport_error_then_reopen_recovers_without_data_loss() {
    let renderer = run_session(vec![
        TransportSignal::Opened,
        success_frame(10.0),
        TransportSignal::Failed("connection reset by peer".to_string()),
        TransportSignal::Opened,
        success_frame(11.0),
    ])
    .await;

    let surfaces = renderer.surfaces();
    let tones: Vec<_> = surfaces
        .statuses
        .iter()
        .map(|indicator| indicator.tone)
        .collect();
    assert_eq!(
        tones,
        vec![
            ticker_stream::StatusTone::Positive,
            ticker_stream::StatusTone::Alert,
            ticker_stream::StatusTone::Positive,
        ]
    );
    assert_eq!(renderer.history().len(), 2);
}

#[tokio::test]
async fn status_annotations_land_in_the_history_log() {
    let renderer = run_session(vec![
        TransportSignal::Opened,
        success_frame(10.0),
        TransportSignal::Failed("gone".to_string()),
    ])
    .await;

    let lines = &renderer.surfaces().history_lines;
    assert_eq!(lines[0], "Connection error. Trying to reconnect...");
    assert!(lines.iter().any(|line| line.starts_with("Price: $10.00")));
    // Annotations are surface lines only, never history entries.
    assert_eq!(renderer.history().len(), 1);
}

#[tokio::test]
async fn cancellation_finishes_the_session() {
    let (_tx, rx) = mpsc::channel::<TransportSignal>(4);
    let renderer = Renderer::new(RecordingSurfaces::new(), PriceHistory::new(0), 2);
    let cancel = CancellationToken::new();
    let session = StreamSession::new(rx, renderer, cancel.clone());
    let handle = tokio::spawn(session.run());

    cancel.cancel();

    timeout(Duration::from_secs(5), handle)
        .await
        .expect("session should finish after cancellation")
        .unwrap();
}
