//! presence-module: hosts people detector resources
//!
//! Provides:
//! - A model registry that validates, builds, reconfigures and removes sensors
//! - Replay camera and vision service driven by recorded detections
//! - Layered settings (defaults, file, environment)
//! - A polling runner emitting one reading record per interval

pub mod error;
pub mod module;
pub mod replay;
pub mod settings;
pub mod runner;

pub use error::ModuleError;
pub use module::{Module, ModelRegistration, ModuleEvent};
pub use replay::{ReplayCamera, ReplayVisionService, ReplayFixture};
pub use settings::{ModuleSettings, ReplaySettings};
pub use runner::{run, ReadingRecord};
