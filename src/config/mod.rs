//! Configuration module for DayPlan
//!
//! This module provides configuration management including:
//! - Path resolution
//! - User settings persistence
//! - Region and category tables for the allocation engine

pub mod paths;
pub mod profiles;
pub mod settings;

pub use paths::DayplanPaths;
pub use profiles::{EngineConfig, ProfilesFile};
pub use settings::{ClusteredSelection, Settings};
