//! Unified error type for retouch.

use thiserror::Error;

/// Errors that can occur while editing an image.
#[derive(Debug, Error)]
pub enum EditError {
    /// No source image has been selected.
    #[error("No image selected. Please select an image first.")]
    MissingImage,

    /// The edit instruction is empty or whitespace-only.
    #[error("Edit instruction is empty. Please enter an edit instruction.")]
    EmptyInstruction,

    /// Any failure inside the external editing capability: model load,
    /// network, device exhaustion, decode of input or output images.
    /// Carries the underlying diagnostic text.
    #[error("Pipeline error: {0}")]
    Pipeline(String),

    /// An I/O error occurred outside the edit call itself.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid command-line argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No API token configured for the hosted backend.
    #[error("No API token for {provider}. Set {env_var} or add it to config file.")]
    MissingApiKey {
        /// The backend name.
        provider: String,
        /// The environment variable name.
        env_var: String,
    },
}

impl EditError {
    /// True for the local precondition failures that are resolved by
    /// re-prompting the user rather than reporting a pipeline fault.
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::MissingImage | Self::EmptyInstruction)
    }
}
