//! Tests for the polling runner

use presence_core::{Attributes, ComponentConfig};
use presence_module::{run, ModuleError, ModuleSettings, ReadingRecord, ReplaySettings};
use presence_sensor::people_detector::{model, PERSON_DETECTED};
use presence_sensor::Detection;
use serde_json::json;
use std::path::PathBuf;

fn settings(attributes: serde_json::Value, frames: Vec<Vec<Detection>>) -> ModuleSettings {
    ModuleSettings {
        poll_interval_ms: 100,
        sensor: ComponentConfig::new("people", model(), Attributes::from_value(attributes).unwrap()),
        replay: ReplaySettings {
            camera_name: "cam".to_string(),
            vision_service: "vision".to_string(),
            fixture: None,
            frames,
        },
    }
}

fn signals(records: &[ReadingRecord]) -> Vec<i64> {
    records
        .iter()
        .map(|r| r.readings[PERSON_DETECTED].as_i64().unwrap())
        .collect()
}

#[tokio::test(start_paused = true)]
async fn test_run_emits_limited_readings() {
    let settings = settings(
        json!({"camera_name": "cam", "vision_service": "vision", "confidence_value": 0.8}),
        vec![
            vec![Detection::new("person", 0.9)],
            vec![Detection::new("person", 0.5)],
            vec![],
            vec![Detection::new("dog", 0.99), Detection::new("Person", 0.8)],
        ],
    );

    let mut records = Vec::new();
    let taken = run(&settings, Some(5), std::future::pending(), |r| records.push(r))
        .await
        .unwrap();

    assert_eq!(taken, 5);
    assert_eq!(signals(&records), vec![1, 0, 0, 1, 1]);
    assert!(records.iter().all(|r| r.resource == "rdk:component:sensor/people"));
}

#[tokio::test(start_paused = true)]
async fn test_run_stops_on_shutdown() {
    let settings = settings(json!({"camera_name": "cam", "vision_service": "vision"}), Vec::new());

    let mut count = 0;
    let taken = run(&settings, None, async {}, |_| count += 1).await.unwrap();

    // Shutdown is polled first and is already complete
    assert_eq!(taken, 0);
    assert_eq!(count, 0);
}

#[tokio::test(start_paused = true)]
async fn test_run_rejects_invalid_sensor_config() {
    let settings = settings(json!({"camera_name": "cam", "confidence_value": 2.0}), Vec::new());

    let err = run(&settings, Some(1), std::future::pending(), |_| {}).await.unwrap_err();
    match err {
        ModuleError::Detector(e) => assert!(e.is_configuration()),
        other => panic!("Expected configuration error, got {}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_run_with_missing_fixture_fails() {
    let mut settings = settings(json!({"camera_name": "cam", "vision_service": "vision"}), Vec::new());
    settings.replay.fixture = Some(PathBuf::from("/nonexistent/frames.json"));

    let err = run(&settings, Some(1), std::future::pending(), |_| {}).await.unwrap_err();
    assert!(matches!(err, ModuleError::Fixture(_)));
}

#[test]
fn test_record_serializes_as_json_line() {
    let record = ReadingRecord {
        timestamp: chrono::Utc::now(),
        resource: "rdk:component:sensor/people".to_string(),
        readings: [(PERSON_DETECTED.to_string(), json!(1))].into_iter().collect(),
    };
    let line = serde_json::to_string(&record).unwrap();
    assert!(line.contains("\"person_detected\":1"));
    assert!(line.contains("\"resource\":\"rdk:component:sensor/people\""));
    assert!(!line.contains('\n'));
}

#[tokio::test(start_paused = true)]
async fn test_run_over_hallway_fixture() {
    let mut settings = settings(json!({"camera_name": "cam", "vision_service": "vision"}), Vec::new());
    settings.replay.fixture = Some(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/hallway.json"));

    let mut records = Vec::new();
    let taken = run(&settings, Some(6), std::future::pending(), |r| records.push(r))
        .await
        .unwrap();

    assert_eq!(taken, 6);
    assert_eq!(signals(&records), vec![0, 0, 0, 1, 1, 0]);
}
