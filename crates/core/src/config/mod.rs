//! Configuration loading and management.
//!
//! This module provides functionality to load and parse the configuration
//! file from the `.content-pipeline/` directory.

pub mod error;
pub mod loader;
pub mod models;

/// Name of the per-project configuration directory.
pub const CONFIG_DIR: &str = ".content-pipeline";

/// Environment variable that overrides `backend.base_url`.
pub const BACKEND_URL_ENV: &str = "CONTENT_PIPELINE_BACKEND_URL";
