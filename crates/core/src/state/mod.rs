//! Pipeline run state.
//!
//! - [`run`]: state transitions for a single run
//! - [`manager`]: SessionManager that owns the active run for the dashboard

pub mod manager;
pub mod run;
