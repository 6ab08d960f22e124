//! Configuration module for the expense tracker
//!
//! This module provides configuration management including:
//! - base directory and record file resolution
//! - user settings persistence

pub mod paths;
pub mod settings;

pub use paths::TrackerPaths;
pub use settings::Settings;
