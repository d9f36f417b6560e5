// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! CLI module for rendering tracking overlays.
//!
//! This module contains the command-line interface logic, including argument parsing,
//! console logging and the `render` command implementation.

// Modules
/// CLI arguments.
pub mod args;

/// Console logging macros and verbosity flag.
pub mod logging;

/// Render command.
pub mod render;
