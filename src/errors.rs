/*!
 * Error types for the emptydcst application.
 *
 * This module contains custom error types for the different stages of reel
 * synthesis, using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the timecode engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimecodeError {
    /// Frame rate is not a positive number
    #[error("unsupported framerate: {0}")]
    InvalidFrameRate(String),

    /// Timecode string does not look like HH:MM:SS:FF
    #[error("invalid timecode: {0}")]
    InvalidFormat(String),
}

/// Errors that can occur while loading a template document
#[derive(Error, Debug)]
pub enum TemplateError {
    /// The template could not be opened or read
    #[error("unable to read template {path:?}: {source}")]
    Unreadable {
        /// Path of the template
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The template declares a deprecated schema namespace
    #[error("invalid namespace: {0}")]
    InvalidNamespace(String),

    /// The template type could not be determined
    #[error("template document type cannot be determined: {0}")]
    Undetermined(String),
}

/// Error raised when the document model cannot be encoded
#[derive(Error, Debug)]
#[error("unable to render subtitle reel: {0}")]
pub struct RenderError(pub String);

/// Errors around the external track-file wrapper
#[derive(Error, Debug)]
pub enum WrapperError {
    /// Wrapper binary is not on the search path
    #[error("{0} not installed or not available at $PATH")]
    Unavailable(String),

    /// Wrapper could not be spawned or exited unsuccessfully
    #[error("error writing MXF: {0}")]
    Execution(String),

    /// Wrapper did not finish within the configured limit
    #[error("error writing MXF: wrapper timed out after {0} seconds")]
    TimedOut(u64),
}
