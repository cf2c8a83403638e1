//! Domain models and wire schemas.
//!
//! # Local state
//! - [`PendingFile`] - a selected file waiting to be uploaded
//! - [`UploadAttempt`] - progress of the one in-flight upload
//!
//! # Wire schemas
//! - [`UploadedTrack`] - `{url, filename}`, element of `GET /api/music` and
//!   body of a successful `POST /api/upload`
//! - [`ErrorBody`] - `{error}` body of a failed upload
//!
//! Bodies are decoded at the boundary with [`parse_upload_response`],
//! [`parse_track_list`] and [`parse_error_message`].

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, ParseResult};

// =============================================================================
// Local State
// =============================================================================

/// A file picked or dropped by the user.
///
/// `P` is the platform handle the transport sends (a `web_sys::File` in the
/// browser).
#[derive(Clone, Debug, PartialEq)]
pub struct PendingFile<P = ()> {
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Declared media type, e.g. `audio/mpeg`.
    pub media_type: String,
    pub payload: P,
}

impl<P> PendingFile<P> {
    pub fn new(name: impl Into<String>, size: u64, media_type: impl Into<String>, payload: P) -> Self {
        Self {
            name: name.into(),
            size,
            media_type: media_type.into(),
            payload,
        }
    }

    /// Size formatted the way the selection summary shows it.
    pub fn size_label(&self) -> String {
        format_megabytes(self.size)
    }
}

/// State of the active upload. Destroyed when the upload resolves.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UploadAttempt {
    /// Percentage in `0..=100`, never decreasing.
    pub progress: u8,
    pub error: Option<String>,
    pub completed: bool,
}

// =============================================================================
// Wire Schemas
// =============================================================================

/// A track confirmed by the server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedTrack {
    /// Public URL of the stored file; unique per track.
    pub url: String,
    #[serde(default)]
    pub filename: String,
}

/// Successful body of `POST /api/upload`.
pub type UploadResponse = UploadedTrack;

impl UploadedTrack {
    pub fn new(url: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            filename: filename.into(),
        }
    }

    /// Filename, or the last URL segment when the server sent none.
    pub fn display_name(&self) -> &str {
        if !self.filename.is_empty() {
            return &self.filename;
        }
        self.url
            .rsplit('/')
            .find(|segment| !segment.is_empty())
            .unwrap_or(&self.url)
    }
}

/// Body of a failed upload.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Decode a successful upload body.
pub fn parse_upload_response(body: &str) -> ParseResult<UploadResponse> {
    serde_json::from_str(body).map_err(|source| ParseError::Json {
        schema: "upload response",
        source,
    })
}

/// Decode the listing returned by `GET /api/music`.
pub fn parse_track_list(body: &str) -> ParseResult<Vec<UploadedTrack>> {
    serde_json::from_str(body).map_err(|source| ParseError::Json {
        schema: "track list",
        source,
    })
}

/// Extract `error` from a failed upload body.
///
/// Anything that is not a JSON object with a string `error` yields `None`,
/// so the caller falls back to the generic message.
pub fn parse_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.error)
}

/// `3670016` -> `"3.50 MB"`.
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_response_deserialization() {
        let json = r#"{"url": "https://x/y.mp3", "filename": "y.mp3"}"#;
        let track = parse_upload_response(json).unwrap();
        assert_eq!(track, UploadedTrack::new("https://x/y.mp3", "y.mp3"));
    }

    #[test]
    fn test_upload_response_requires_url() {
        let err = parse_upload_response(r#"{"filename": "y.mp3"}"#).unwrap_err();
        assert!(err.to_string().contains("upload response"));
    }

    #[test]
    fn test_track_list_keeps_server_order() {
        let json = r#"[
            {"url": "https://cdn/b.mp3", "filename": "b.mp3"},
            {"url": "https://cdn/a.wav", "filename": "a.wav"}
        ]"#;
        let tracks = parse_track_list(json).unwrap();
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].filename, "b.mp3");
        assert_eq!(tracks[1].url, "https://cdn/a.wav");
    }

    #[test]
    fn test_track_list_rejects_object() {
        assert!(parse_track_list(r#"{"tracks": []}"#).is_err());
    }

    #[test]
    fn test_display_name_falls_back_to_url_segment() {
        let track: UploadedTrack = serde_json::from_str(r#"{"url": "https://cdn/music/song.mp3"}"#).unwrap();
        assert_eq!(track.display_name(), "song.mp3");

        let named = UploadedTrack::new("https://cdn/abc123", "Song.mp3");
        assert_eq!(named.display_name(), "Song.mp3");
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(parse_error_message(r#"{"error": "too large"}"#), Some("too large".to_string()));
        assert_eq!(parse_error_message(r#"{"message": "nope"}"#), None);
        assert_eq!(parse_error_message("<html>502 Bad Gateway</html>"), None);
        assert_eq!(parse_error_message(""), None);
    }

    #[test]
    fn test_size_label() {
        let file = PendingFile::new("song.mp3", 3_670_016, "audio/mpeg", ());
        assert_eq!(file.size_label(), "3.50 MB");
        assert_eq!(format_megabytes(0), "0.00 MB");
    }
}
