//! TUI widgets module.
//!
//! This module contains the panels the dashboard is built from.

pub mod dashboard;
pub mod notifications;
pub mod research_form;
pub mod results_view;

pub use research_form::{FormOutcome, ResearchFormView};
pub use results_view::ResultsView;
