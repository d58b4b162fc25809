//! OData Common
//!
//! Shared utilities for the OData serializer workspace.
//!
//! This crate provides:
//! - Component-based structured logging with request path context
//! - Test logger initialisation

// Export modules
pub mod logging;
// Re-export traits and types at the root level
pub use logging::{Component, Logger, LoggingContext};

/// Install an `env_logger` backend suitable for unit and integration tests.
///
/// Safe to call from every test; only the first call has any effect.
#[cfg(any(test, feature = "test-logging"))]
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
