//! Error types for presence-module

use presence_sensor::DetectorError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModuleError {
    #[error("Model error: {0}")]
    Model(String),

    #[error("Resource error: {0}")]
    Resource(String),

    #[error("Fixture error: {0}")]
    Fixture(String),

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error(transparent)]
    Detector(#[from] DetectorError),
}
