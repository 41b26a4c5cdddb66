//! Application-level utilities for the Keepsake CLI.
//!
//! This module provides:
//! - Application context bundling CLI args, lazy config, and the async
//!   runtime
//! - Credential resolution (flag, environment, token file)

mod context;
mod token;

// Re-export public API
pub use context::AppContext;
