//! Error types and handling for promptkit
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Only schema/configuration problems and an operator declining a hard gate
//! propagate to the top level. Everything item-scoped (an unknown content
//! name, an unreadable source file, a corrupt manifest) is recovered where it
//! happens and surfaced as a warning.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for promptkit operations
#[derive(Error, Diagnostic, Debug)]
pub enum PromptkitError {
    // Schema / configuration errors - always fatal
    #[error("Invalid prompt schema: {message}")]
    #[diagnostic(
        code(promptkit::schema::invalid),
        help("This is a bug in the schema declaration, not in your invocation")
    )]
    SchemaInvalid { message: String },

    // Content errors - recovered per item by the caller
    #[error("Content item '{name}' not found in {category}")]
    #[diagnostic(
        code(promptkit::content::not_found),
        help("Run 'promptkit list' to see the available items")
    )]
    ContentNotFound { name: String, category: String },

    // File system errors
    #[error("Failed to read file: {path}")]
    #[diagnostic(code(promptkit::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}")]
    #[diagnostic(code(promptkit::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(promptkit::fs::io_error))]
    IoError { message: String },

    // Manifest errors - recovered as a cold start by the caller
    #[error("Failed to parse manifest: {path}")]
    #[diagnostic(
        code(promptkit::manifest::parse_failed),
        help("The manifest will be rebuilt from this run's installation")
    )]
    ManifestParseFailed { path: String, reason: String },

    #[error("Failed to serialize manifest")]
    #[diagnostic(code(promptkit::manifest::serialize_failed))]
    ManifestSerializeFailed { reason: String },

    // Target errors
    #[error("Could not determine home directory for the global target")]
    #[diagnostic(
        code(promptkit::target::no_home),
        help("Set PROMPTKIT_GLOBAL_DIR to choose the global target explicitly")
    )]
    HomeDirNotFound,

    /// Operator declined a hard-gate confirmation. Reported as a graceful
    /// termination with exit code 0, never as a crash.
    #[error("Installation cancelled")]
    #[diagnostic(code(promptkit::cancelled))]
    Cancelled,
}

impl From<std::io::Error> for PromptkitError {
    fn from(err: std::io::Error) -> Self {
        PromptkitError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for PromptkitError {
    fn from(err: inquire::InquireError) -> Self {
        use inquire::InquireError;
        match err {
            InquireError::OperationCanceled | InquireError::OperationInterrupted => {
                PromptkitError::Cancelled
            }
            other => PromptkitError::IoError {
                message: other.to_string(),
            },
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, PromptkitError>;
