/// Command-line adapter
pub mod cli;
/// Constants and pipeline configuration
pub mod configuration;
/// Error types
pub mod error;
/// Image decoding, encoding and data URLs
pub mod image;
/// Stage progress display for the command-line adapter
pub mod progress;
