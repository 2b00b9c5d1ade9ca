//! Integration tests for the full logging pipeline.
//!
//! These tests verify the complete flow:
//! - feed publish → logger task → CSV rows on disk
//! - filter chain behavior end to end
//! - GPS augmentation read at write time
//!
//! Run with: `cargo test --test logfile_pipeline`

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use presencelog::event::{DetectionEvent, EventCategory, Identifier, RadioDecoding, Tiraid};
use presencelog::feed::DetectionFeed;
use presencelog::gps::{GpsFix, PositionProvider, SharedGpsPosition};
use presencelog::logfile::{spawn_event_logger, EventLogger, LogfileConfig, Whitelist};

// ============================================================================
// Helper Functions
// ============================================================================

/// Create an event sighted by the given receivers (strongest first).
fn make_event(device: &str, receivers: &[&str]) -> DetectionEvent {
    let mut tiraid = Tiraid::new(Identifier::eui64(device));
    for (i, r) in receivers.iter().enumerate() {
        tiraid = tiraid.with_decoding(RadioDecoding::new(Identifier::eui64(*r), -65 - i as i16));
    }
    DetectionEvent::new(EventCategory::Appearance, 1_451_606_400_000, tiraid)
}

/// Create an event transmitted by the sensing infrastructure itself.
fn make_infrastructure_event() -> DetectionEvent {
    let tiraid = Tiraid::new(Identifier::eui64("001bc50940810000"))
        .with_decoding(RadioDecoding::new(Identifier::eui64("r1"), -50));
    DetectionEvent::new(EventCategory::KeepAlive, 1_451_606_400_000, tiraid)
}

/// Run a logger over the given events and return the logfile contents.
async fn run_pipeline(
    config: LogfileConfig,
    position: Option<Arc<dyn PositionProvider>>,
    events: Vec<DetectionEvent>,
) -> String {
    let logger = Arc::new(EventLogger::create(config, position).unwrap());
    let path = logger.path().to_path_buf();

    let feed = DetectionFeed::with_defaults();
    let cancellation = CancellationToken::new();
    let handle = spawn_event_logger(Arc::clone(&logger), feed.subscribe(), cancellation);

    for event in events {
        feed.publish(event);
    }

    // Dropping the feed closes the broadcast channel; the task drains
    // everything already published, then exits.
    drop(feed);
    handle.await.unwrap();

    std::fs::read_to_string(path).unwrap()
}

// ============================================================================
// Integration Tests
// ============================================================================

#[tokio::test]
async fn test_accepted_events_reach_disk_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let contents = run_pipeline(
        LogfileConfig::new(dir.path()),
        None,
        vec![
            make_event("device-a", &["r1"]),
            make_event("device-b", &["r2"]),
        ],
    )
    .await;

    let lines: Vec<&str> = contents.split("\r\n").collect();
    assert_eq!(lines[0], "event,time,deviceId,receiverId,rssi");
    assert!(lines[1].contains("device-a"));
    assert!(lines[2].contains("device-b"));
    assert_eq!(lines[3], ""); // trailing CRLF
}

#[tokio::test]
async fn test_whitelist_filters_on_disk_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = LogfileConfig::new(dir.path()).with_whitelist(Whitelist::receivers(["r1"]));
    let contents = run_pipeline(
        config,
        None,
        vec![
            make_event("listed", &["r1"]),
            make_event("unlisted", &["r2"]),
        ],
    )
    .await;

    assert!(contents.contains("listed"));
    assert!(!contents.contains("unlisted"));
}

#[tokio::test]
async fn test_infrastructure_suppression_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let config = LogfileConfig::new(dir.path()).with_ignore_infrastructure_tx(true);
    let contents = run_pipeline(
        config,
        None,
        vec![make_infrastructure_event(), make_event("device-a", &["r1"])],
    )
    .await;

    assert!(!contents.contains("001bc509"));
    assert!(contents.contains("device-a"));
}

#[tokio::test]
async fn test_gps_suffix_on_header_and_rows() {
    let dir = tempfile::tempdir().unwrap();
    let position = SharedGpsPosition::with_fix(GpsFix::new(45.5, -73.6));
    let contents = run_pipeline(
        LogfileConfig::new(dir.path()),
        Some(Arc::new(position)),
        vec![make_event("device-a", &["r1"])],
    )
    .await;

    let lines: Vec<&str> = contents.split("\r\n").collect();
    assert!(lines[0].ends_with(",Lat,Lon"));
    assert!(lines[1].ends_with(",45.5,-73.6"));
}

#[tokio::test]
async fn test_gps_position_read_per_event() {
    let dir = tempfile::tempdir().unwrap();
    let position = SharedGpsPosition::with_fix(GpsFix::new(1.0, 2.0));

    let logger = Arc::new(
        EventLogger::create(
            LogfileConfig::new(dir.path()),
            Some(Arc::new(position.clone())),
        )
        .unwrap(),
    );

    // First event sees the first fix, second sees the updated fix
    logger.handle_event(&make_event("device-a", &["r1"]));
    position.update(GpsFix::new(3.0, 4.0));
    logger.handle_event(&make_event("device-b", &["r1"]));

    let contents = std::fs::read_to_string(logger.path()).unwrap();
    let lines: Vec<&str> = contents.split("\r\n").collect();
    assert!(lines[1].ends_with(",1,2"));
    assert!(lines[2].ends_with(",3,4"));
}

#[tokio::test]
async fn test_cancellation_stops_logger_task() {
    let dir = tempfile::tempdir().unwrap();
    let logger =
        Arc::new(EventLogger::create(LogfileConfig::new(dir.path()), None).unwrap());

    let feed = DetectionFeed::with_defaults();
    let cancellation = CancellationToken::new();
    let handle = spawn_event_logger(Arc::clone(&logger), feed.subscribe(), cancellation.clone());

    cancellation.cancel();
    tokio::time::timeout(std::time::Duration::from_secs(2), handle)
        .await
        .expect("logger task should stop on cancellation")
        .unwrap();
}

#[tokio::test]
async fn test_telemetry_reflects_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let config = LogfileConfig::new(dir.path()).with_whitelist(Whitelist::receivers(["r1"]));
    let logger = Arc::new(EventLogger::create(config, None).unwrap());

    logger.handle_event(&make_event("listed", &["r1"]));
    logger.handle_event(&make_event("unlisted", &["r2"]));

    let snapshot = logger.metrics().snapshot();
    assert_eq!(snapshot.events_received, 2);
    assert_eq!(snapshot.rows_written, 1);
    assert_eq!(snapshot.events_filtered, 1);
    assert_eq!(snapshot.write_failures, 0);
}
