//! Sensor component interface

use crate::dependencies::Dependencies;
use crate::error::DetectorError;
use async_trait::async_trait;
use presence_core::{ComponentConfig, ResourceName};
use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;

/// Readings keyed by reading name
pub type Readings = HashMap<String, JsonValue>;

/// Sensor component served by the module host
#[async_trait]
pub trait Sensor: Send + Sync {
    fn name(&self) -> &ResourceName;

    /// Current readings
    async fn get_readings(&self, extra: Option<&Map<String, JsonValue>>) -> Result<Readings, DetectorError>;

    /// Model-specific command
    async fn do_command(&self, command: &Map<String, JsonValue>) -> Result<Map<String, JsonValue>, DetectorError>;

    /// Geometries of the component, as JSON objects
    async fn get_geometries(&self) -> Result<Vec<JsonValue>, DetectorError>;

    /// Apply a new configuration in place
    fn reconfigure(&self, config: &ComponentConfig, dependencies: &Dependencies) -> Result<(), DetectorError>;

    /// Release collaborators
    async fn close(&self) -> Result<(), DetectorError>;
}
