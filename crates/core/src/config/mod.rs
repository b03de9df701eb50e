//! Configuration loading and management.
//!
//! This module provides functionality to load and parse the optional
//! `.skysearch/config.toml` file.

pub mod error;
pub mod loader;
pub mod models;
