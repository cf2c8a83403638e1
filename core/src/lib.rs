//! # Uploader core - audio upload orchestration
//!
//! Platform-independent state and logic behind the music upload page:
//! validating a selected audio file, sending it with progress reporting, and
//! merging the confirmed track into the page's results.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Selection  │────▶│ Validation  │────▶│  Transport  │────▶│   Session   │
//! │ (drop/pick) │     │ (type/size) │     │ (+progress) │     │  (results)  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use uploader_core::{PendingFile, UploadSession, UploaderConfig};
//!
//! let mut session = UploadSession::new(UploaderConfig::list_variant("https://api.example.com"));
//! session.refresh_tracks(&transport).await;
//! session.select(PendingFile::new("song.mp3", 3_670_016, "audio/mpeg", file))?;
//! let track = session.upload(&transport, |pct| log::debug!("{pct}%")).await?;
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types and user-facing messages
//! - [`config`] - API endpoints, limits and page variants
//! - [`models`] - Local state and wire schemas
//! - [`validation`] - Media type and size checks
//! - [`progress`] - Monotonic progress stream
//! - [`transport`] - HTTP seam and reply decoding
//! - [`session`] - The upload state machine

pub mod config;
pub mod error;
pub mod models;
pub mod progress;
pub mod session;
pub mod transport;
pub mod validation;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{
    ResultMode,
    UploaderConfig,
    COPY_FEEDBACK_MS,
    DEFAULT_MAX_FILE_SIZE,
    UPLOAD_FIELD,
};

pub use error::{
    ParseError,
    TransportError,
    UploadError,
    UploadResult,
    ValidationError,
    FALLBACK_UPLOAD_ERROR,
};

pub use models::{
    format_megabytes,
    ErrorBody,
    PendingFile,
    UploadAttempt,
    UploadResponse,
    UploadedTrack,
};

pub use progress::{percent, progress_channel, ProgressSender, ProgressStream};

pub use session::{CopyTicket, Phase, Results, UploadSession, UploadTicket};

pub use transport::{fetch_tracks, upload_file, Reply, Transport};

pub use validation::validate_selection;
