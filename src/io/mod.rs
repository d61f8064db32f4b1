//! Input/output, configuration and error handling

/// Command-line parsing and subcommand dispatch
pub mod cli;
/// Constants and defaults
pub mod configuration;
/// Error types and path context
pub mod error;
/// Image file and pixel grid conversion
pub mod image;
/// Stage progress bars
pub mod progress;
