//! Error types for presence-sensor

use presence_core::{Error as CoreError, ResourceName};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetectorError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Collaborator unavailable: {resource}: {reason}")]
    CollaboratorUnavailable {
        resource: ResourceName,
        reason: String,
    },

    #[error("Timed out after {after:?} waiting on {resource}")]
    Timeout {
        resource: ResourceName,
        after: Duration,
    },

    #[error("`{0}` is not implemented")]
    NotImplemented(&'static str),

    #[error("Core error: {0}")]
    Core(CoreError),
}

impl DetectorError {
    pub fn unavailable(resource: ResourceName, reason: impl Into<String>) -> Self {
        DetectorError::CollaboratorUnavailable {
            resource,
            reason: reason.into(),
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, DetectorError::Configuration(_))
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, DetectorError::CollaboratorUnavailable { .. })
    }
}

impl From<CoreError> for DetectorError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Attribute(msg) | CoreError::Configuration(msg) => {
                DetectorError::Configuration(msg)
            }
            other => DetectorError::Core(other),
        }
    }
}
