//! # cp-protocol
//!
//! Core protocol definitions and data models for content-pipeline.
//!
//! This crate defines all shared data structures used for:
//! - Research configuration and the backend request/response bodies
//! - Runtime pipeline run state
//! - Configuration file parsing (TOML config)
//! - Communication between the dashboard and the core
//!
//! ## Modules
//!
//! - [`research_models`]: Research configuration and research response
//! - [`planning_models`]: Content strategy and the opaque content plan
//! - [`run_models`]: Pipeline run state, stages, derived status
//! - [`config_models`]: Global configuration from config.toml
//! - [`ipc`]: Operations and Events for dashboard/core communication
//!
//! ## Design Principles
//!
//! - Minimal dependencies: Only serde, ts-rs, uuid and chrono
//! - TypeScript generation: All types derive `TS` for web client compatibility
//! - Independent compilation: No dependencies on other content-pipeline crates

pub mod config_models;
pub mod ipc;
pub mod planning_models;
pub mod research_models;
pub mod run_models;

// Re-export all public types for convenience
pub use config_models::*;
pub use ipc::*;
pub use planning_models::*;
pub use research_models::*;
pub use run_models::*;
