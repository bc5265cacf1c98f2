//! Collaborator interfaces consumed by the detector

use crate::error::DetectorError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Label the detector looks for
pub const PERSON_CLASS: &str = "person";

/// Axis-aligned box in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x_min: i64,
    pub y_min: i64,
    pub x_max: i64,
    pub y_max: i64,
}

/// Single detection reported by a vision service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub class_name: String,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
}

impl Detection {
    pub fn new(class_name: impl Into<String>, confidence: f64) -> Self {
        Self {
            class_name: class_name.into(),
            confidence,
            bounding_box: None,
        }
    }

    pub fn is_person(&self) -> bool {
        self.class_name.eq_ignore_ascii_case(PERSON_CLASS)
    }
}

/// Frame captured by a camera
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    /// Monotonic frame counter assigned by the camera
    pub sequence: u64,
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// Camera component
#[async_trait]
pub trait Camera: Send + Sync {
    /// Capture the current frame
    async fn get_image(&self) -> Result<Image, DetectorError>;
}

/// Vision service performing object detection
#[async_trait]
pub trait VisionService: Send + Sync {
    /// Detect objects in a frame supplied by the caller
    async fn get_detections(&self, image: &Image) -> Result<Vec<Detection>, DetectorError>;

    /// Detect objects in the current frame of a named camera
    async fn get_detections_from_camera(
        &self,
        camera_name: &str,
    ) -> Result<Vec<Detection>, DetectorError>;
}
