//! presence-core: shared resource model for the people detector
//!
//! Provides:
//! - Resource naming (`Api`, `ResourceName`)
//! - Model triples (`ModelFamily`, `Model`)
//! - Component configuration with a typed view over its attributes

pub mod error;
pub mod resource;
pub mod attributes;
pub mod config;

pub use error::{Error, Result};
pub use resource::{Api, ResourceName, Model, ModelFamily};
pub use attributes::Attributes;
pub use config::ComponentConfig;
