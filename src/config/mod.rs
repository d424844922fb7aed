//! Configuration module for save-saver
//!
//! This module provides configuration management including:
//! - Settings directory resolution
//! - The validated three-field configuration
//! - Settings file persistence

pub mod paths;
pub mod settings;
pub mod store;

pub use paths::SaverPaths;
pub use settings::Configuration;
pub use store::SettingsStore;
