//! presence-sensor: person-presence sensor for a vision detection service
//!
//! Asks a named vision service for the detections on a named camera's
//! current frame and reports `person_detected = 1` when a `person`
//! detection reaches the configured confidence threshold.

pub mod error;
pub mod config;
pub mod services;
pub mod dependencies;
pub mod sensor;
pub mod people_detector;

pub use error::DetectorError;
pub use config::{PeopleDetectorConfig, DEFAULT_CONFIDENCE};
pub use services::{Camera, VisionService, Detection, BoundingBox, Image};
pub use dependencies::Dependencies;
pub use sensor::{Sensor, Readings};
pub use people_detector::{PeopleDetector, person_detected, presence_signal};
