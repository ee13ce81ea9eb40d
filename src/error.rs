//! Error types for the UKRI rules engine.
//!
//! The calculation, validation and state-machine functions never fail: they
//! degrade to zero values, warnings or failed validation results. This error
//! type covers the surfaces around them: loading funder profiles, installing
//! the process-wide registry, and turning a rejected status transition into
//! an error at a persistence boundary.

use thiserror::Error;

use crate::models::TimesheetStatus;

/// The main error type for the rules engine.
///
/// # Example
///
/// ```
/// use ukri_rules_engine::error::EngineError;
///
/// let error = EngineError::FunderProfileNotFound {
///     id: "wellcome".to_string(),
/// };
/// assert_eq!(error.to_string(), "Funder profile not found: wellcome");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file or directory was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No funder profile is registered under the given id.
    #[error("Funder profile not found: {id}")]
    FunderProfileNotFound {
        /// The funder profile id that was looked up.
        id: String,
    },

    /// Two funder profiles share the same id.
    #[error("Duplicate funder profile id: {id}")]
    DuplicateFunderProfile {
        /// The id that appeared more than once.
        id: String,
    },

    /// The process-wide funder registry was already in use when an install was attempted.
    #[error("Funder profile registry has already been initialised")]
    RegistryAlreadyInitialized,

    /// A timesheet status transition was rejected by the state machine.
    #[error("Invalid status transition from '{from}' to '{to}': {message}")]
    InvalidTransition {
        /// The current status.
        from: TimesheetStatus,
        /// The requested status.
        to: TimesheetStatus,
        /// The state machine's explanation.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
