//! # PathKit Common
//!
//! Logging configuration shared by the PathKit crates and the binaries or
//! test suites that embed them.
//!
//! ## Features
//!
//! - Preset logging configurations (default, debug, trace, production)
//! - Pretty, compact and JSON output
//! - Filter directives via `RUST_LOG` or an explicit string

use thiserror::Error;

pub mod logging;

pub use logging::{init_logging, LogConfig, LogFormat};

/// Errors raised while setting up logging.
#[derive(Error, Debug)]
pub enum LoggingError {
    /// The filter directive string could not be parsed.
    #[error("Invalid log filter '{filter}': {message}")]
    InvalidFilter { filter: String, message: String },

    /// A global subscriber was already installed.
    #[error("Logging already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Result type alias for logging setup.
pub type Result<T> = std::result::Result<T, LoggingError>;
