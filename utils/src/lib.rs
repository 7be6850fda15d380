//! Shared utilities for the surety workspace.

pub mod logging;

pub use logging::{init_logging, LogFormat};
