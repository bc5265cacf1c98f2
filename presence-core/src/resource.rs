//! Resource naming and model identifiers

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Resource API a component or service implements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Api {
    /// Camera component producing frames
    Camera,
    /// Vision service running detections on frames
    Vision,
    /// Sensor component producing readings
    Sensor,
}

impl Api {
    pub fn as_str(&self) -> &'static str {
        match self {
            Api::Camera => "rdk:component:camera",
            Api::Vision => "rdk:service:vision",
            Api::Sensor => "rdk:component:sensor",
        }
    }
}

impl fmt::Display for Api {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Api {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "camera" | "rdk:component:camera" => Ok(Api::Camera),
            "vision" | "rdk:service:vision" => Ok(Api::Vision),
            "sensor" | "rdk:component:sensor" => Ok(Api::Sensor),
            other => Err(Error::Configuration(format!("unknown api '{}'", other))),
        }
    }
}

impl TryFrom<String> for Api {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Api> for String {
    fn from(api: Api) -> Self {
        api.as_str().to_string()
    }
}

/// Fully qualified resource name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceName {
    pub api: Api,
    pub name: String,
}

impl ResourceName {
    pub fn new(api: Api, name: impl Into<String>) -> Self {
        Self {
            api,
            name: name.into(),
        }
    }

    pub fn camera(name: impl Into<String>) -> Self {
        Self::new(Api::Camera, name)
    }

    pub fn vision(name: impl Into<String>) -> Self {
        Self::new(Api::Vision, name)
    }

    pub fn sensor(name: impl Into<String>) -> Self {
        Self::new(Api::Sensor, name)
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.api, self.name)
    }
}

/// Namespace and family a model belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelFamily {
    pub namespace: String,
    pub family: String,
}

impl ModelFamily {
    pub fn new(namespace: impl Into<String>, family: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            family: family.into(),
        }
    }
}

impl fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.family)
    }
}

/// Model triple `namespace:family:name` identifying an implementation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Model {
    pub family: ModelFamily,
    pub name: String,
}

impl Model {
    pub fn new(family: ModelFamily, name: impl Into<String>) -> Self {
        Self {
            family,
            name: name.into(),
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.family, self.name)
    }
}

impl FromStr for Model {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [namespace, family, name]
                if !namespace.is_empty() && !family.is_empty() && !name.is_empty() =>
            {
                Ok(Model::new(ModelFamily::new(*namespace, *family), *name))
            }
            _ => Err(Error::InvalidModel(format!(
                "'{}' is not of the form namespace:family:name",
                s
            ))),
        }
    }
}

impl TryFrom<String> for Model {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Model> for String {
    fn from(model: Model) -> Self {
        model.to_string()
    }
}
