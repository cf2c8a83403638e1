//! Error types for the upload orchestrator.
//!
//! Leaf errors describe one failing concern each:
//!
//! - [`ValidationError`] - the selected file was refused locally
//! - [`TransportError`] - the request failed or the server answered non-2xx
//! - [`ParseError`] - a response body did not match its schema
//!
//! They all convert into [`UploadError`] through `From`, so `?` works across
//! the orchestrator. [`UploadError::user_message`] gives the exact text the
//! page shows.

use thiserror::Error;

/// Shown when a failed upload carries no server message.
pub const FALLBACK_UPLOAD_ERROR: &str = "Upload failed. Please try again.";

/// Shown when upload is requested without a selected file.
pub const NO_FILE_SELECTED: &str = "Please select a file first";

/// Shown when the selected file is not audio.
pub const WRONG_MEDIA_TYPE: &str = "Please upload an audio file (MP3, WAV, etc.)";

/// Shown when the selected file is over the size ceiling.
///
/// The text says 50MB while the enforced ceiling is 150 MiB. The wording is
/// kept as deployed; the limit is not inferred from it.
pub const FILE_TOO_LARGE: &str = "File size exceeds 50MB limit";

// =============================================================================
// Validation Errors
// =============================================================================

/// A selection refused before any network traffic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Media type does not start with `audio/`.
    #[error("{}", WRONG_MEDIA_TYPE)]
    NotAudio { media_type: String },

    /// File is larger than the configured ceiling.
    #[error("{}", FILE_TOO_LARGE)]
    TooLarge { size: u64, limit: u64 },
}

// =============================================================================
// Transport Errors
// =============================================================================

/// Failure while talking to the API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request never produced an HTTP response.
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("Server error ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Status {
        status: u16,
        /// `error` field of the response body, when there was one.
        message: Option<String>,
    },
}

// =============================================================================
// Parse Errors
// =============================================================================

/// A response body that does not have the expected shape.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid {schema} body: {source}")]
    Json {
        schema: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

// =============================================================================
// Orchestrator Errors (top-level)
// =============================================================================

/// Everything an orchestrator operation can fail with.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Upload was requested with nothing selected.
    #[error("No file selected")]
    NoFileSelected,

    /// Another attempt is still running.
    #[error("An upload is already in progress")]
    UploadInProgress,
}

impl UploadError {
    /// Text displayed in the page's error banner.
    pub fn user_message(&self) -> String {
        match self {
            UploadError::Validation(err) => err.to_string(),
            UploadError::Transport(TransportError::Status {
                message: Some(message),
                ..
            }) => message.clone(),
            UploadError::Transport(_) | UploadError::Parse(_) => {
                FALLBACK_UPLOAD_ERROR.to_string()
            }
            UploadError::NoFileSelected => NO_FILE_SELECTED.to_string(),
            UploadError::UploadInProgress => self.to_string(),
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for orchestrator operations.
pub type UploadResult<T> = Result<T, UploadError>;

/// Result type for response decoding.
pub type ParseResult<T> = Result<T, ParseError>;
