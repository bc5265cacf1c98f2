//! Polling runner: one reading per interval until a limit or shutdown

use crate::error::ModuleError;
use crate::module::{ModelRegistration, Module};
use crate::replay::{ReplayCamera, ReplayVisionService};
use crate::settings::ModuleSettings;
use chrono::{DateTime, Utc};
use presence_sensor::{Dependencies, Readings, Sensor};
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// One emitted reading
#[derive(Debug, Clone, Serialize)]
pub struct ReadingRecord {
    pub timestamp: DateTime<Utc>,
    pub resource: String,
    pub readings: Readings,
}

/// Build a module hosting the configured sensor over replay collaborators
pub fn build(settings: &ModuleSettings) -> Result<(Module, Arc<dyn Sensor>), ModuleError> {
    let module = Module::new();
    module.register_model(ModelRegistration::people_detector())?;

    let replay = &settings.replay;
    let frames = replay.load_frames()?;
    info!(
        "Replaying {} frames for camera '{}' through vision service '{}'",
        frames.len(),
        replay.camera_name,
        replay.vision_service
    );

    let camera = Arc::new(ReplayCamera::new(replay.camera_name.clone()));
    let vision = Arc::new(ReplayVisionService::new(
        replay.camera_name.clone(),
        camera.clone(),
        frames,
    ));

    let mut dependencies = Dependencies::new();
    dependencies.insert_camera(replay.camera_name.clone(), camera)?;
    dependencies.insert_vision_service(replay.vision_service.clone(), vision)?;

    let sensor = module.add_resource(&settings.sensor, &dependencies)?;
    Ok((module, sensor))
}

async fn poll<S, F>(
    sensor: &dyn Sensor,
    settings: &ModuleSettings,
    limit: Option<u64>,
    shutdown: S,
    emit: &mut F,
) -> Result<u64, ModuleError>
where
    S: Future<Output = ()>,
    F: FnMut(ReadingRecord),
{
    let mut ticker = tokio::time::interval(settings.poll_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    let mut taken = 0u64;
    while limit.map_or(true, |limit| taken < limit) {
        tokio::select! {
            biased;
            _ = &mut shutdown => {
                info!("Shutdown requested");
                break;
            }
            _ = ticker.tick() => {
                let readings = sensor.get_readings(None).await?;
                debug!("Reading {} from {}: {:?}", taken, sensor.name(), readings);
                emit(ReadingRecord {
                    timestamp: Utc::now(),
                    resource: sensor.name().to_string(),
                    readings,
                });
                taken += 1;
            }
        }
    }
    Ok(taken)
}

/// Poll the configured sensor, handing every reading to `emit`.
///
/// Stops after `limit` readings, when `shutdown` resolves, or on the first
/// reading error. The resource is removed from the module in every case.
pub async fn run<S, F>(
    settings: &ModuleSettings,
    limit: Option<u64>,
    shutdown: S,
    mut emit: F,
) -> Result<u64, ModuleError>
where
    S: Future<Output = ()>,
    F: FnMut(ReadingRecord),
{
    let (module, sensor) = build(settings)?;
    let outcome = poll(sensor.as_ref(), settings, limit, shutdown, &mut emit).await;
    let closed = module.remove_resource(sensor.name()).await;

    let taken = outcome?;
    closed?;
    info!("Stopped after {} readings", taken);
    Ok(taken)
}
