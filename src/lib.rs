//! dorm-report - one-shot batch reporter over room/student datasets.
//!
//! This library exposes the core modules for use in integration tests.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod indexes;
pub mod loader;
pub mod logging;
pub mod runner;
