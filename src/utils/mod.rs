//! Utility functions and helpers.
//!
//! # Submodules
//!
//! - `logging`: Tracing subscriber initialization.

pub mod logging;
