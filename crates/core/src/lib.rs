//! # sky-core
//!
//! Search orchestration core for skysearch.
//!
//! This crate provides:
//! - Configuration loading from the `.skysearch/` directory
//! - Task backend abstraction (HTTP client and scripted mock)
//! - Asynchronous deep-search orchestration (submit, delayed poll, cancel)
//! - Presentational progress step animation
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading and management
//! - [`backend`]: TaskBackend trait and implementations
//! - [`task`]: Search task state transitions
//! - [`orchestrator`]: Deep-search lifecycle orchestration
//! - [`progress`]: Decoupled multi-step progress animation

pub mod backend;
pub mod config;
pub mod orchestrator;
pub mod progress;
pub mod task;
