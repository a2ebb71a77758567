//! # cp-core
//!
//! Core pipeline engine for content-pipeline.
//!
//! This crate provides:
//! - Configuration loading from the `.content-pipeline/` directory
//! - The HTTP client for the content-production backend
//! - Video and podcast generators
//! - The pipeline execution engine and run state transitions
//! - Form validation, report export and project initialization
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading and management
//! - [`backend`]: Backend trait and HTTP client
//! - [`generation`]: Media generator trait and implementations
//! - [`engine`]: Pipeline execution engine
//! - [`state`]: Run state transitions and the session manager
//! - [`form`]: Research configuration form
//! - [`export`]: Saving stage results to disk
//! - [`init`]: Project initialization

pub mod backend;
pub mod config;
pub mod engine;
pub mod export;
pub mod form;
pub mod generation;
pub mod init;
pub mod state;
