//! Component configuration as delivered by the host

use crate::attributes::Attributes;
use crate::resource::{Api, Model, ResourceName};
use serde::{Deserialize, Serialize};

fn default_api() -> Api {
    Api::Sensor
}

/// Configuration for a single component instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentConfig {
    /// Instance name, unique per API
    pub name: String,
    /// API the component implements
    #[serde(default = "default_api")]
    pub api: Api,
    /// Model implementing the component
    pub model: Model,
    /// Model-specific attributes
    #[serde(default)]
    pub attributes: Attributes,
    /// Explicit dependencies by name
    #[serde(default)]
    pub depends_on: Vec<String>,
}

impl ComponentConfig {
    pub fn new(name: impl Into<String>, model: Model, attributes: Attributes) -> Self {
        Self {
            name: name.into(),
            api: Api::Sensor,
            model,
            attributes,
            depends_on: Vec::new(),
        }
    }

    pub fn resource_name(&self) -> ResourceName {
        ResourceName::new(self.api, self.name.clone())
    }
}
