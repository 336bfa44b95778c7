//! Error handling types for the pakload crates.
//!
//! This module provides the standardized error type used by both the core
//! loader and the browser bindings to keep error handling consistent across
//! the seams.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The main error type for the pakload crates.
///
/// From a well-formed host page only [`LoaderError::Read`] is reachable at
/// runtime; the remaining variants guard the seams the loader makes
/// explicit (configuration, DOM lookup, the external module object).
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoaderError {
    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A required page element is missing or of the wrong type
    #[error("DOM error: {0}")]
    Dom(String),

    /// The external module object is missing or unusable
    #[error("Module error: {0}")]
    Module(String),

    /// The asynchronous file read failed
    #[error("Read error: {0}")]
    Read(String),

    /// The module's filesystem rejected the write
    #[error("Inject error: {0}")]
    Inject(String),

    /// The module's entry point trapped during invocation
    #[error("Entry point error: {0}")]
    EntryPoint(String),
}

impl LoaderError {
    /// Create a new configuration error
    pub fn config<T: fmt::Display>(msg: T) -> Self {
        Self::Configuration(msg.to_string())
    }

    /// Create a new DOM error
    pub fn dom<T: fmt::Display>(msg: T) -> Self {
        Self::Dom(msg.to_string())
    }

    /// Create a new module error
    pub fn module<T: fmt::Display>(msg: T) -> Self {
        Self::Module(msg.to_string())
    }

    /// Create a new read error
    pub fn read<T: fmt::Display>(msg: T) -> Self {
        Self::Read(msg.to_string())
    }

    /// Create a new inject error
    pub fn inject<T: fmt::Display>(msg: T) -> Self {
        Self::Inject(msg.to_string())
    }

    /// Create a new entry point error
    pub fn entry_point<T: fmt::Display>(msg: T) -> Self {
        Self::EntryPoint(msg.to_string())
    }
}

/// Result type alias for pakload operations
pub type LoaderResult<T> = Result<T, LoaderError>;
