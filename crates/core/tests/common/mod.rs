//! Common test utilities for the core integration tests.
//!
//! - Fixtures (research configs, backend payloads, temp projects)
//! - A mock backend built on wiremock
//! - Event assertions

pub mod assertions;
pub mod fixtures;
pub mod mock_backend;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;
#[allow(unused_imports)]
pub use mock_backend::*;
