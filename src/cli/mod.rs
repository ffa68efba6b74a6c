// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Command-line interface.
//!
//! Argument parsing, console logging and the file-based commands that wrap
//! the library transforms.

// Modules
/// CLI arguments.
pub mod args;

/// Command implementations.
pub mod commands;

/// Console logging macros and verbosity.
pub mod logging;
