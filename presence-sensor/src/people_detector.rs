//! People detector sensor

use crate::config::PeopleDetectorConfig;
use crate::dependencies::Dependencies;
use crate::error::DetectorError;
use crate::sensor::{Readings, Sensor};
use crate::services::{Camera, Detection, VisionService};
use async_trait::async_trait;
use parking_lot::RwLock;
use presence_core::{ComponentConfig, Model, ModelFamily, ResourceName};
use serde_json::{json, Map, Value as JsonValue};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

/// Reading key carrying the presence signal
pub const PERSON_DETECTED: &str = "person_detected";

/// Upper bound on a single vision service request
pub const DETECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Model triple under which the detector is registered
pub fn model() -> Model {
    Model::new(ModelFamily::new("mta", "2025-sensor-detector"), "people-detector")
}

/// True when any `person` detection reaches `threshold`
pub fn person_detected(detections: &[Detection], threshold: f64) -> bool {
    detections
        .iter()
        .any(|d| d.is_person() && d.confidence >= threshold)
}

/// Boolean-as-integer output signal
pub fn presence_signal(detected: bool) -> i64 {
    if detected {
        1
    } else {
        0
    }
}

struct DetectorState {
    config: Arc<PeopleDetectorConfig>,
    camera: Option<Arc<dyn Camera>>,
    vision: Option<Arc<dyn VisionService>>,
}

impl DetectorState {
    fn resolve(config: PeopleDetectorConfig, dependencies: &Dependencies) -> Result<Self, DetectorError> {
        let vision = dependencies.vision_service(&config.vision_service)?;
        let camera = dependencies.camera(&config.camera_name)?;
        Ok(Self {
            config: Arc::new(config),
            camera: Some(camera),
            vision: Some(vision),
        })
    }
}

/// Sensor reporting whether a person is in view of the configured camera
pub struct PeopleDetector {
    name: ResourceName,
    state: RwLock<DetectorState>,
    timeout: Duration,
}

impl PeopleDetector {
    /// Validate a component configuration and return its implicit dependencies
    pub fn validate_config(config: &ComponentConfig) -> Result<Vec<String>, DetectorError> {
        let parsed = PeopleDetectorConfig::from_attributes(&config.attributes)?;
        Ok(parsed.implicit_dependencies())
    }

    /// Create a detector, resolving its camera and vision service
    pub fn new(config: &ComponentConfig, dependencies: &Dependencies) -> Result<Self, DetectorError> {
        let parsed = PeopleDetectorConfig::from_attributes(&config.attributes)?;
        let state = DetectorState::resolve(parsed, dependencies)?;

        info!(
            "People detector {} watching camera '{}' via '{}' (threshold {})",
            config.name,
            state.config.camera_name,
            state.config.vision_service,
            state.config.confidence_value
        );

        Ok(Self {
            name: config.resource_name(),
            state: RwLock::new(state),
            timeout: DETECTION_TIMEOUT,
        })
    }

    /// Override the vision request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Snapshot of the active configuration
    pub fn config(&self) -> Arc<PeopleDetectorConfig> {
        self.state.read().config.clone()
    }

    /// Current presence signal, 0 or 1
    pub async fn presence(&self) -> Result<i64, DetectorError> {
        // Release lock before awaiting the vision service
        let (config, vision) = {
            let state = self.state.read();
            (state.config.clone(), state.vision.clone())
        };

        let vision = vision.ok_or_else(|| {
            DetectorError::unavailable(config.vision_resource(), "detector has been closed")
        })?;

        debug!("Getting detections from vision service '{}'", config.vision_service);
        let detections = match tokio::time::timeout(
            self.timeout,
            vision.get_detections_from_camera(&config.camera_name),
        )
        .await
        {
            Ok(Ok(detections)) => detections,
            Ok(Err(e)) => {
                error!("Error in get_readings: {}", e);
                return Err(e);
            }
            Err(_) => {
                let e = DetectorError::Timeout {
                    resource: config.vision_resource(),
                    after: self.timeout,
                };
                error!("Error in get_readings: {}", e);
                return Err(e);
            }
        };

        let detected = person_detected(&detections, config.confidence_value);
        debug!("Processed image with {} detections", detections.len());
        Ok(presence_signal(detected))
    }
}

#[async_trait]
impl Sensor for PeopleDetector {
    fn name(&self) -> &ResourceName {
        &self.name
    }

    async fn get_readings(&self, _extra: Option<&Map<String, JsonValue>>) -> Result<Readings, DetectorError> {
        let signal = self.presence().await?;
        let mut readings = Readings::new();
        readings.insert(PERSON_DETECTED.to_string(), json!(signal));
        Ok(readings)
    }

    async fn do_command(&self, _command: &Map<String, JsonValue>) -> Result<Map<String, JsonValue>, DetectorError> {
        error!("`do_command` is not implemented");
        Err(DetectorError::NotImplemented("do_command"))
    }

    async fn get_geometries(&self) -> Result<Vec<JsonValue>, DetectorError> {
        error!("`get_geometries` is not implemented");
        Err(DetectorError::NotImplemented("get_geometries"))
    }

    fn reconfigure(&self, config: &ComponentConfig, dependencies: &Dependencies) -> Result<(), DetectorError> {
        // Resolve everything first so a failure leaves the old state untouched
        let parsed = PeopleDetectorConfig::from_attributes(&config.attributes)?;
        let next = DetectorState::resolve(parsed, dependencies)?;

        info!(
            "Reconfigured people detector {}: camera '{}', vision '{}', threshold {}",
            self.name, next.config.camera_name, next.config.vision_service, next.config.confidence_value
        );
        *self.state.write() = next;
        Ok(())
    }

    async fn close(&self) -> Result<(), DetectorError> {
        let mut state = self.state.write();
        let camera = state.camera.take();
        let vision = state.vision.take();
        if camera.is_some() || vision.is_some() {
            info!("People detector {} released its collaborators", self.name);
        }
        Ok(())
    }
}
