//! Configuration management for `gedimport`
//!
//! This module provides the `SettingsManager` for loading and saving the
//! import defaults in TOML format.

mod manager;
pub mod settings;

pub use manager::SettingsManager;
pub use settings::ImportSettings;
