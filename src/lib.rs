//! pomoguard - storage for a pomodoro timer with website limits
//!
//! This crate persists timer sessions, completed cycles, website visits,
//! daily statistics and per-site limits in an embedded `SQLite` database,
//! behind a process-wide [`ActivityStore`].

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod output;
pub mod storage;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::StoreError;
pub use features::activity::ActivityStore;
