//! Configuration management for pomoguard.
//!
//! This module handles loading configuration from `~/.pomoguard/`.

mod paths;
mod settings;

pub use paths::{Paths, HOME_ENV};
pub use settings::{Config, StatsConfig, StorageConfig};
