//! HTTP seam between the orchestrator and the platform.
//!
//! The browser implements [`Transport`] with `gloo-net` and
//! `XMLHttpRequest`; tests use an in-memory script. Everything runs on one
//! thread, so futures are not required to be `Send`.

use crate::config::{UploaderConfig, UPLOAD_FIELD};
use crate::error::{TransportError, UploadResult};
use crate::models::{parse_error_message, parse_track_list, parse_upload_response, PendingFile, UploadedTrack};
use crate::progress::ProgressSender;

/// Status and body text of a completed HTTP exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues the two requests the uploader needs.
///
/// Implementations return `Ok` for any HTTP response, whatever its status;
/// `Err` is reserved for requests that never got one.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Platform file handle sent as the multipart part.
    type Payload;

    async fn get(&self, url: &str) -> Result<Reply, TransportError>;

    /// POST `file` as the single multipart part named `field`, reporting
    /// bytes sent through `progress`.
    async fn post_multipart(
        &self,
        url: &str,
        field: &str,
        file: &PendingFile<Self::Payload>,
        progress: ProgressSender,
    ) -> Result<Reply, TransportError>;
}

/// Turn an upload reply into the confirmed track.
pub fn decode_upload_reply(reply: Reply) -> UploadResult<UploadedTrack> {
    if !reply.is_success() {
        return Err(TransportError::Status {
            status: reply.status,
            message: parse_error_message(&reply.body),
        }
        .into());
    }
    Ok(parse_upload_response(&reply.body)?)
}

/// Turn a listing reply into tracks, newest first as the server sent them.
pub fn decode_track_list_reply(reply: Reply) -> UploadResult<Vec<UploadedTrack>> {
    if !reply.is_success() {
        return Err(TransportError::Status {
            status: reply.status,
            message: parse_error_message(&reply.body),
        }
        .into());
    }
    Ok(parse_track_list(&reply.body)?)
}

/// `GET /api/music`.
pub async fn fetch_tracks<T: Transport>(transport: &T, config: &UploaderConfig) -> UploadResult<Vec<UploadedTrack>> {
    let reply = transport.get(&config.music_url()).await?;
    decode_track_list_reply(reply)
}

/// `POST /api/upload` with the file under [`UPLOAD_FIELD`].
///
/// On success the sender reports 100 before it is closed. The sender is
/// closed on every outcome, which ends the paired stream.
pub async fn upload_file<T: Transport>(
    transport: &T,
    url: &str,
    file: &PendingFile<T::Payload>,
    progress: ProgressSender,
) -> UploadResult<UploadedTrack> {
    let outcome = match transport.post_multipart(url, UPLOAD_FIELD, file, progress.clone()).await {
        Ok(reply) => decode_upload_reply(reply),
        Err(err) => Err(err.into()),
    };
    if outcome.is_ok() {
        progress.complete();
    }
    progress.close();
    outcome
}
