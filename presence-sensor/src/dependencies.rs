//! Resolved collaborators handed to a component at construction

use crate::error::DetectorError;
use crate::services::{Camera, VisionService};
use presence_core::{Api, ResourceName};
use std::collections::HashMap;
use std::sync::Arc;

/// Collaborators indexed by name, one table per API
#[derive(Default, Clone)]
pub struct Dependencies {
    cameras: HashMap<String, Arc<dyn Camera>>,
    vision_services: HashMap<String, Arc<dyn VisionService>>,
}

impl Dependencies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a camera; names must be unique among cameras
    pub fn insert_camera(
        &mut self,
        name: impl Into<String>,
        camera: Arc<dyn Camera>,
    ) -> Result<(), DetectorError> {
        let name = name.into();
        if name.is_empty() {
            return Err(DetectorError::Configuration("Camera name cannot be empty".to_string()));
        }
        if self.cameras.contains_key(&name) {
            return Err(DetectorError::Configuration(format!(
                "Camera '{}' already registered",
                name
            )));
        }
        self.cameras.insert(name, camera);
        Ok(())
    }

    /// Add a vision service; names must be unique among vision services
    pub fn insert_vision_service(
        &mut self,
        name: impl Into<String>,
        service: Arc<dyn VisionService>,
    ) -> Result<(), DetectorError> {
        let name = name.into();
        if name.is_empty() {
            return Err(DetectorError::Configuration(
                "Vision service name cannot be empty".to_string(),
            ));
        }
        if self.vision_services.contains_key(&name) {
            return Err(DetectorError::Configuration(format!(
                "Vision service '{}' already registered",
                name
            )));
        }
        self.vision_services.insert(name, service);
        Ok(())
    }

    pub fn camera(&self, name: &str) -> Result<Arc<dyn Camera>, DetectorError> {
        self.cameras.get(name).cloned().ok_or_else(|| {
            DetectorError::unavailable(ResourceName::camera(name), "not found in dependencies")
        })
    }

    pub fn vision_service(&self, name: &str) -> Result<Arc<dyn VisionService>, DetectorError> {
        self.vision_services.get(name).cloned().ok_or_else(|| {
            DetectorError::unavailable(ResourceName::vision(name), "not found in dependencies")
        })
    }

    pub fn contains(&self, resource: &ResourceName) -> bool {
        match resource.api {
            Api::Camera => self.cameras.contains_key(&resource.name),
            Api::Vision => self.vision_services.contains_key(&resource.name),
            Api::Sensor => false,
        }
    }

    /// Whether any collaborator answers to `name`
    pub fn contains_name(&self, name: &str) -> bool {
        self.cameras.contains_key(name) || self.vision_services.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.cameras.len() + self.vision_services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
