//! Tests for the module host

use presence_core::{Api, Attributes, ComponentConfig, Model, ResourceName};
use presence_module::{Module, ModelRegistration, ModuleError, ModuleEvent, ReplayCamera, ReplayVisionService};
use presence_sensor::people_detector::{model, PERSON_DETECTED};
use presence_sensor::{Dependencies, Detection, DetectorError, Sensor};
use serde_json::json;
use std::sync::Arc;

fn sensor_config(attributes: serde_json::Value) -> ComponentConfig {
    ComponentConfig::new("people", model(), Attributes::from_value(attributes).unwrap())
}

fn replay_dependencies(frames: Vec<Vec<Detection>>) -> Dependencies {
    let camera = Arc::new(ReplayCamera::new("cam"));
    let vision = Arc::new(ReplayVisionService::new("cam", camera.clone(), frames));
    let mut deps = Dependencies::new();
    deps.insert_camera("cam", camera).unwrap();
    deps.insert_vision_service("vision", vision).unwrap();
    deps
}

fn module() -> Module {
    let module = Module::new();
    module.register_model(ModelRegistration::people_detector()).unwrap();
    module
}

#[test]
fn test_register_model_twice_fails() {
    let module = module();
    assert_eq!(module.models(), vec![model()]);

    let err = module.register_model(ModelRegistration::people_detector()).unwrap_err();
    assert!(matches!(err, ModuleError::Model(_)));
}

#[test]
fn test_validate_config() {
    let module = module();
    let deps = module
        .validate_config(&sensor_config(json!({"camera_name": "cam", "vision_service": "vision"})))
        .unwrap();
    assert_eq!(deps, vec!["vision".to_string(), "cam".to_string()]);

    let err = module
        .validate_config(&sensor_config(json!({"camera_name": "cam"})))
        .unwrap_err();
    match err {
        ModuleError::Detector(e) => assert!(e.is_configuration()),
        other => panic!("Expected configuration error, got {}", other),
    }
}

#[test]
fn test_unknown_model_and_wrong_api() {
    let module = module();

    let mut config = sensor_config(json!({"camera_name": "cam", "vision_service": "vision"}));
    config.model = "acme:sensors:thermometer".parse::<Model>().unwrap();
    assert!(matches!(module.validate_config(&config).unwrap_err(), ModuleError::Model(_)));

    let mut config = sensor_config(json!({"camera_name": "cam", "vision_service": "vision"}));
    config.api = Api::Camera;
    assert!(matches!(module.validate_config(&config).unwrap_err(), ModuleError::Model(_)));
}

#[tokio::test]
async fn test_add_and_read_resource() {
    let module = module();
    let mut events = module.subscribe();
    let deps = replay_dependencies(vec![vec![Detection::new("person", 0.95)]]);

    let sensor = module
        .add_resource(&sensor_config(json!({"camera_name": "cam", "vision_service": "vision"})), &deps)
        .map_err(|e| e.to_string())
        .unwrap();
    assert_eq!(module.resource_count(), 1);
    assert!(module.resource(&ResourceName::sensor("people")).is_some());

    let readings = sensor.get_readings(None).await.unwrap();
    assert_eq!(readings[PERSON_DETECTED], json!(1));

    match events.recv().await.unwrap() {
        ModuleEvent::ResourceAdded { name, model: added } => {
            assert_eq!(name, ResourceName::sensor("people"));
            assert_eq!(added, model());
        }
        other => panic!("Unexpected event {:?}", other),
    }
}

#[test]
fn test_add_duplicate_resource_fails() {
    let module = module();
    let deps = replay_dependencies(Vec::new());
    let config = sensor_config(json!({"camera_name": "cam", "vision_service": "vision"}));

    assert!(module.add_resource(&config, &deps).is_ok());
    let err = module.add_resource(&config, &deps).err().unwrap();
    assert!(matches!(err, ModuleError::Resource(_)));
    assert_eq!(module.resource_count(), 1);
}

#[test]
fn test_add_with_missing_dependency_is_unavailable() {
    let module = module();
    let deps = replay_dependencies(Vec::new());

    let config = sensor_config(json!({"camera_name": "garage", "vision_service": "vision"}));
    let err = module.add_resource(&config, &deps).err().unwrap();
    match err {
        ModuleError::Detector(e) => {
            assert!(e.is_unavailable());
            assert!(e.to_string().contains("garage"));
        }
        other => panic!("Expected unavailable error, got {}", other),
    }

    let mut config = sensor_config(json!({"camera_name": "cam", "vision_service": "vision"}));
    config.depends_on.push("motion".to_string());
    let err = module.add_resource(&config, &deps).err().unwrap();
    assert!(matches!(
        err,
        ModuleError::Detector(DetectorError::CollaboratorUnavailable { .. })
    ));
    assert_eq!(module.resource_count(), 0);
}

#[tokio::test]
async fn test_reconfigure_resource() {
    let module = module();
    let deps = replay_dependencies(vec![vec![Detection::new("person", 0.6)]]);
    let sensor = module
        .add_resource(&sensor_config(json!({"camera_name": "cam", "vision_service": "vision"})), &deps)
        .map_err(|e| e.to_string())
        .unwrap();
    assert_eq!(sensor.get_readings(None).await.unwrap()[PERSON_DETECTED], json!(0));

    module
        .reconfigure_resource(
            &sensor_config(json!({
                "camera_name": "cam",
                "vision_service": "vision",
                "confidence_value": 0.5
            })),
            &deps,
        )
        .unwrap();
    assert_eq!(sensor.get_readings(None).await.unwrap()[PERSON_DETECTED], json!(1));

    let mut missing = sensor_config(json!({"camera_name": "cam", "vision_service": "vision"}));
    missing.name = "other".to_string();
    assert!(matches!(
        module.reconfigure_resource(&missing, &deps).unwrap_err(),
        ModuleError::Resource(_)
    ));
}

#[tokio::test]
async fn test_remove_resource_closes_it() {
    let module = module();
    let deps = replay_dependencies(Vec::new());
    let sensor = module
        .add_resource(&sensor_config(json!({"camera_name": "cam", "vision_service": "vision"})), &deps)
        .map_err(|e| e.to_string())
        .unwrap();

    module.remove_resource(&ResourceName::sensor("people")).await.unwrap();
    assert_eq!(module.resource_count(), 0);

    let err = sensor.get_readings(None).await.unwrap_err();
    assert!(err.is_unavailable());

    let err = module.remove_resource(&ResourceName::sensor("people")).await.unwrap_err();
    assert!(matches!(err, ModuleError::Resource(_)));
}

#[tokio::test]
async fn test_close_module() {
    let module = module();
    let deps = replay_dependencies(Vec::new());
    let config = sensor_config(json!({"camera_name": "cam", "vision_service": "vision"}));
    assert!(module.add_resource(&config, &deps).is_ok());

    module.close().await.unwrap();
    assert_eq!(module.resource_count(), 0);
}
