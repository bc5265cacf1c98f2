//! Replay collaborators fed from recorded detections

use crate::error::ModuleError;
use async_trait::async_trait;
use presence_core::ResourceName;
use presence_sensor::{Camera, Detection, DetectorError, Image, VisionService};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

/// Recorded detections, one list per frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReplayFixture {
    pub frames: Vec<Vec<Detection>>,
}

impl ReplayFixture {
    /// Load a fixture from a JSON file holding an array of frames
    pub fn load(path: &Path) -> Result<Self, ModuleError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ModuleError::Fixture(format!("cannot read {}: {}", path.display(), e)))?;
        let fixture: ReplayFixture = serde_json::from_str(&contents)
            .map_err(|e| ModuleError::Fixture(format!("invalid fixture {}: {}", path.display(), e)))?;
        debug!("Loaded {} replay frames from {}", fixture.frames.len(), path.display());
        Ok(fixture)
    }
}

/// Camera producing empty frames with increasing sequence numbers
pub struct ReplayCamera {
    name: String,
    next_sequence: AtomicU64,
}

impl ReplayCamera {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            next_sequence: AtomicU64::new(0),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[async_trait]
impl Camera for ReplayCamera {
    async fn get_image(&self) -> Result<Image, DetectorError> {
        let sequence = self.next_sequence.fetch_add(1, Ordering::Relaxed);
        trace!("Replay camera '{}' produced frame {}", self.name, sequence);
        Ok(Image {
            sequence,
            mime_type: "image/jpeg".to_string(),
            data: Vec::new(),
        })
    }
}

/// Vision service answering from a fixture; frames loop once exhausted
pub struct ReplayVisionService {
    camera_name: String,
    camera: Arc<dyn Camera>,
    frames: Vec<Vec<Detection>>,
}

impl ReplayVisionService {
    pub fn new(camera_name: impl Into<String>, camera: Arc<dyn Camera>, frames: Vec<Vec<Detection>>) -> Self {
        Self {
            camera_name: camera_name.into(),
            camera,
            frames,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

#[async_trait]
impl VisionService for ReplayVisionService {
    async fn get_detections(&self, image: &Image) -> Result<Vec<Detection>, DetectorError> {
        if self.frames.is_empty() {
            return Ok(Vec::new());
        }
        let index = (image.sequence % self.frames.len() as u64) as usize;
        Ok(self.frames[index].clone())
    }

    async fn get_detections_from_camera(&self, camera_name: &str) -> Result<Vec<Detection>, DetectorError> {
        if camera_name != self.camera_name {
            return Err(DetectorError::unavailable(
                ResourceName::camera(camera_name),
                "camera is not served by the replay vision service",
            ));
        }
        let image = self.camera.get_image().await?;
        self.get_detections(&image).await
    }
}
