//! Model registry and resource lifecycle

use crate::error::ModuleError;
use parking_lot::RwLock;
use presence_core::{Api, ComponentConfig, Model, ResourceName};
use presence_sensor::{people_detector, DetectorError, Dependencies, PeopleDetector, Sensor};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Validates a configuration, returning implicit dependency names
pub type Validator = fn(&ComponentConfig) -> Result<Vec<String>, DetectorError>;

/// Builds a sensor from a validated configuration
pub type Constructor = fn(&ComponentConfig, &Dependencies) -> Result<Arc<dyn Sensor>, DetectorError>;

/// A model the module can serve
#[derive(Clone)]
pub struct ModelRegistration {
    pub api: Api,
    pub model: Model,
    pub validate: Validator,
    pub construct: Constructor,
}

fn construct_people_detector(
    config: &ComponentConfig,
    dependencies: &Dependencies,
) -> Result<Arc<dyn Sensor>, DetectorError> {
    Ok(Arc::new(PeopleDetector::new(config, dependencies)?))
}

impl ModelRegistration {
    pub fn people_detector() -> Self {
        Self {
            api: Api::Sensor,
            model: people_detector::model(),
            validate: PeopleDetector::validate_config,
            construct: construct_people_detector,
        }
    }
}

/// Module lifecycle event
#[derive(Debug, Clone)]
pub enum ModuleEvent {
    ModelRegistered { model: Model },
    ResourceAdded { name: ResourceName, model: Model },
    ResourceReconfigured { name: ResourceName },
    ResourceRemoved { name: ResourceName },
}

/// Hosts sensor resources built from registered models
pub struct Module {
    models: RwLock<HashMap<Model, ModelRegistration>>,
    resources: RwLock<HashMap<ResourceName, Arc<dyn Sensor>>>,
    event_sender: broadcast::Sender<ModuleEvent>,
}

impl Default for Module {
    fn default() -> Self {
        Self::new()
    }
}

impl Module {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(64);
        Self {
            models: RwLock::new(HashMap::new()),
            resources: RwLock::new(HashMap::new()),
            event_sender: sender,
        }
    }

    /// Register a model
    pub fn register_model(&self, registration: ModelRegistration) -> Result<(), ModuleError> {
        let model = registration.model.clone();
        {
            let mut models = self.models.write();
            if models.contains_key(&model) {
                return Err(ModuleError::Model(format!("Model '{}' already registered", model)));
            }
            models.insert(model.clone(), registration);
        }

        let _ = self.event_sender.send(ModuleEvent::ModelRegistered { model: model.clone() });
        info!("Model registered: {}", model);
        Ok(())
    }

    pub fn models(&self) -> Vec<Model> {
        self.models.read().keys().cloned().collect()
    }

    fn registration(&self, config: &ComponentConfig) -> Result<ModelRegistration, ModuleError> {
        let registration = self
            .models
            .read()
            .get(&config.model)
            .cloned()
            .ok_or_else(|| ModuleError::Model(format!("Model '{}' is not registered", config.model)))?;

        if registration.api != config.api {
            return Err(ModuleError::Model(format!(
                "Model '{}' implements {}, not {}",
                config.model, registration.api, config.api
            )));
        }
        Ok(registration)
    }

    /// Validate a configuration against its model; returns implicit dependencies
    pub fn validate_config(&self, config: &ComponentConfig) -> Result<Vec<String>, ModuleError> {
        let registration = self.registration(config)?;
        let deps = (registration.validate)(config)?;
        debug!("Validated {}: implicit dependencies {:?}", config.resource_name(), deps);
        Ok(deps)
    }

    fn check_dependencies(
        &self,
        config: &ComponentConfig,
        implicit: &[String],
        dependencies: &Dependencies,
    ) -> Result<(), ModuleError> {
        for name in implicit.iter().chain(config.depends_on.iter()) {
            if !dependencies.contains_name(name) {
                return Err(DetectorError::unavailable(
                    config.resource_name(),
                    format!("dependency '{}' is not available", name),
                )
                .into());
            }
        }
        Ok(())
    }

    /// Build and register a new resource
    pub fn add_resource(
        &self,
        config: &ComponentConfig,
        dependencies: &Dependencies,
    ) -> Result<Arc<dyn Sensor>, ModuleError> {
        let name = config.resource_name();
        if self.resources.read().contains_key(&name) {
            return Err(ModuleError::Resource(format!("Resource '{}' already exists", name)));
        }

        let registration = self.registration(config)?;
        let implicit = (registration.validate)(config)?;
        self.check_dependencies(config, &implicit, dependencies)?;

        let resource = (registration.construct)(config, dependencies)?;
        {
            let mut resources = self.resources.write();
            if resources.contains_key(&name) {
                return Err(ModuleError::Resource(format!("Resource '{}' already exists", name)));
            }
            resources.insert(name.clone(), resource.clone());
        }

        let _ = self.event_sender.send(ModuleEvent::ResourceAdded {
            name: name.clone(),
            model: config.model.clone(),
        });
        info!("Resource added: {} ({})", name, config.model);
        Ok(resource)
    }

    /// Apply a new configuration to an existing resource
    pub fn reconfigure_resource(
        &self,
        config: &ComponentConfig,
        dependencies: &Dependencies,
    ) -> Result<(), ModuleError> {
        let name = config.resource_name();
        let resource = self
            .resource(&name)
            .ok_or_else(|| ModuleError::Resource(format!("Resource '{}' not found", name)))?;

        let registration = self.registration(config)?;
        let implicit = (registration.validate)(config)?;
        self.check_dependencies(config, &implicit, dependencies)?;
        resource.reconfigure(config, dependencies)?;

        let _ = self.event_sender.send(ModuleEvent::ResourceReconfigured { name: name.clone() });
        info!("Resource reconfigured: {}", name);
        Ok(())
    }

    /// Remove a resource and close it
    pub async fn remove_resource(&self, name: &ResourceName) -> Result<(), ModuleError> {
        let resource = self
            .resources
            .write()
            .remove(name)
            .ok_or_else(|| ModuleError::Resource(format!("Resource '{}' not found", name)))?;

        resource.close().await?;

        let _ = self.event_sender.send(ModuleEvent::ResourceRemoved { name: name.clone() });
        info!("Resource removed: {}", name);
        Ok(())
    }

    pub fn resource(&self, name: &ResourceName) -> Option<Arc<dyn Sensor>> {
        self.resources.read().get(name).cloned()
    }

    pub fn resource_count(&self) -> usize {
        self.resources.read().len()
    }

    /// Close every resource; the first close error is returned after all are attempted
    pub async fn close(&self) -> Result<(), ModuleError> {
        let drained: Vec<(ResourceName, Arc<dyn Sensor>)> = self.resources.write().drain().collect();

        let mut first_error = None;
        for (name, resource) in drained {
            match resource.close().await {
                Ok(()) => {
                    let _ = self.event_sender.send(ModuleEvent::ResourceRemoved { name });
                }
                Err(e) => {
                    warn!("Failed to close {}: {}", name, e);
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ModuleEvent> {
        self.event_sender.subscribe()
    }
}
