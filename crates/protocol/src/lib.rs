//! # sky-protocol
//!
//! Core protocol definitions and data models for skysearch.
//!
//! This crate defines all shared data structures used for:
//! - Flight search request parameters
//! - Runtime search task state (status, progress, result)
//! - Wire envelopes exchanged with the task backend
//! - Events sent from the core to UI clients
//!
//! ## Modules
//!
//! - [`search_models`]: Flight search request parameters
//! - [`task_models`]: Runtime search task state and status
//! - [`api_models`]: HTTP+JSON envelopes for the task backend
//! - [`ipc`]: Events for Core-UI communication
//!
//! ## Design Principles
//!
//! - Minimal dependencies: Only serde, ts-rs, and chrono
//! - TypeScript generation: All types derive `TS` for client compatibility
//! - Independent compilation: No dependencies on other skysearch crates

pub mod api_models;
pub mod ipc;
pub mod search_models;
pub mod task_models;

// Re-export all public types for convenience
pub use api_models::*;
pub use ipc::*;
pub use search_models::*;
pub use task_models::*;
