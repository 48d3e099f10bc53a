//! Error types for the vocal analysis engine

use std::fmt;

/// Errors that can occur while configuring or feeding the engine
///
/// The analysis core itself has no fatal paths: degenerate signals (silence,
/// no detectable pitch) degrade to defined zero outputs. Errors are reserved
/// for malformed inputs and configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Invalid input data (empty frame, zero sample rate, ...)
    InvalidInput(String),

    /// Invalid configuration value
    InvalidConfig(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            EngineError::InvalidConfig(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for EngineError {}
