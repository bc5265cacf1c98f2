//! Module settings: defaults, optional file, then `PEOPLE_DETECTOR__*` environment

use crate::error::ModuleError;
use crate::replay::ReplayFixture;
use config::{Config, Environment, File};
use presence_core::ComponentConfig;
use presence_sensor::Detection;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_PREFIX: &str = "PEOPLE_DETECTOR";

fn default_poll_interval_ms() -> u64 {
    1000
}

/// Replay collaborators standing in for a real camera and vision service
#[derive(Debug, Clone, Deserialize)]
pub struct ReplaySettings {
    pub camera_name: String,
    pub vision_service: String,
    /// JSON fixture with one detection list per frame
    #[serde(default)]
    pub fixture: Option<PathBuf>,
    /// Inline frames, used when no fixture is given
    #[serde(default)]
    pub frames: Vec<Vec<Detection>>,
}

impl ReplaySettings {
    pub fn load_frames(&self) -> Result<Vec<Vec<Detection>>, ModuleError> {
        match &self.fixture {
            Some(path) => Ok(ReplayFixture::load(path)?.frames),
            None => Ok(self.frames.clone()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModuleSettings {
    /// Delay between readings
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Sensor component to host
    pub sensor: ComponentConfig,
    pub replay: ReplaySettings,
}

impl ModuleSettings {
    /// Load settings, layering the optional file under environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, ModuleError> {
        let mut builder = Config::builder().set_default("poll_interval_ms", default_poll_interval_ms() as i64)?;
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let settings: ModuleSettings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ModuleError> {
        if self.poll_interval_ms == 0 {
            return Err(ModuleError::Resource("poll_interval_ms must be > 0".to_string()));
        }
        if self.replay.camera_name.is_empty() || self.replay.vision_service.is_empty() {
            return Err(ModuleError::Resource(
                "replay camera_name and vision_service must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
