//! Configuration for the people detector

use crate::error::DetectorError;
use presence_core::{Attributes, ResourceName};
use serde::{Deserialize, Serialize};

/// Threshold used when `confidence_value` is not configured
pub const DEFAULT_CONFIDENCE: f64 = 0.8;

pub const CAMERA_NAME: &str = "camera_name";
pub const VISION_SERVICE: &str = "vision_service";
pub const CONFIDENCE_VALUE: &str = "confidence_value";

/// People detector configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeopleDetectorConfig {
    /// Camera whose frames are inspected
    pub camera_name: String,
    /// Vision service producing the detections
    pub vision_service: String,
    /// Minimum confidence (inclusive) for a person detection to count
    pub confidence_value: f64,
}

impl PeopleDetectorConfig {
    pub fn new(camera_name: impl Into<String>, vision_service: impl Into<String>) -> Self {
        Self {
            camera_name: camera_name.into(),
            vision_service: vision_service.into(),
            confidence_value: DEFAULT_CONFIDENCE,
        }
    }

    pub fn with_confidence(mut self, confidence_value: f64) -> Self {
        self.confidence_value = confidence_value;
        self
    }

    /// Parse and validate configuration from component attributes
    pub fn from_attributes(attributes: &Attributes) -> Result<Self, DetectorError> {
        // Required fields are checked before the optional threshold.
        let camera_name = attributes.required_string(CAMERA_NAME)?;
        let vision_service = attributes.required_string(VISION_SERVICE)?;
        let confidence_value = attributes
            .number(CONFIDENCE_VALUE)?
            .unwrap_or(DEFAULT_CONFIDENCE);

        let config = Self {
            camera_name: camera_name.to_string(),
            vision_service: vision_service.to_string(),
            confidence_value,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), DetectorError> {
        if self.camera_name.trim().is_empty() {
            return Err(DetectorError::Configuration(
                "camera_name must not be empty".to_string(),
            ));
        }

        if self.vision_service.trim().is_empty() {
            return Err(DetectorError::Configuration(
                "vision_service must not be empty".to_string(),
            ));
        }

        // NaN fails the range check as well.
        if !(0.0..=1.0).contains(&self.confidence_value) {
            return Err(DetectorError::Configuration(
                "confidence_value must be between 0 and 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Dependencies the host must resolve before construction
    pub fn implicit_dependencies(&self) -> Vec<String> {
        vec![self.vision_service.clone(), self.camera_name.clone()]
    }

    pub fn camera_resource(&self) -> ResourceName {
        ResourceName::camera(self.camera_name.clone())
    }

    pub fn vision_resource(&self) -> ResourceName {
        ResourceName::vision(self.vision_service.clone())
    }
}
