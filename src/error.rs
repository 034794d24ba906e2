// Error types for the mixcheck pipeline
//
// One error enum covers the whole analysis pipeline. Every user interaction
// fails independently: errors are returned to the hosting shell, converted
// to a single user-facing message there, and never abort the process.

use log::error;
use std::fmt;

/// Errors surfaced by the analysis pipeline
///
/// `InvalidEmail` and `UnsupportedFile` are user-visible and recoverable
/// (re-prompt / re-upload). `InvalidInput` is a contract violation that
/// upstream validation should have prevented. `Io` covers store and upload
/// write failures.
#[derive(Debug)]
pub enum PipelineError {
    /// Identity gate rejected a malformed email address
    InvalidEmail { email: String },

    /// Audio decoding failed or produced no usable samples
    UnsupportedFile { details: String },

    /// Contract violation inside the pipeline (e.g. empty sample buffer)
    InvalidInput { reason: String },

    /// Store or upload I/O failure
    Io {
        context: String,
        source: std::io::Error,
    },
}

impl PipelineError {
    /// Wrap an I/O error with a short description of what was being done
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        PipelineError::Io {
            context: context.into(),
            source,
        }
    }

    /// Human-readable error message
    pub fn message(&self) -> String {
        match self {
            PipelineError::InvalidEmail { email } => {
                format!("Invalid email address: {}", email)
            }
            PipelineError::UnsupportedFile { details } => {
                format!("Unsupported or corrupted file ({})", details)
            }
            PipelineError::InvalidInput { reason } => {
                format!("Invalid input: {}", reason)
            }
            PipelineError::Io { context, source } => {
                format!("I/O failure while {}: {}", context, source)
            }
        }
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Log a pipeline error with the operation it occurred in
pub fn log_pipeline_error(err: &PipelineError, context: &str) {
    error!("Pipeline error in {}: {}", context, err);
}
