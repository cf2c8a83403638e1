//! The upload session: every piece of page state, owned in one place.
//!
//! # Lifecycle of one attempt
//!
//! ```text
//!   Idle ──select──▶ (validate) ──▶ Selected ──begin_upload──▶ Uploading
//!    ▲                   │                ▲                        │
//!    │               rejected             └──────── failed ────────┤
//!    └──────────────────────────────── succeeded ──────────────────┘
//! ```
//!
//! A rejected selection keeps whatever file was selected before it. A failed
//! upload keeps the file so the user can retry. Results and the copy
//! indicator survive every transition.
//!
//! The async [`UploadSession::upload`] drives a whole attempt when the caller
//! can hold `&mut self` across the await. UI code that keeps the session in
//! a reactive cell uses the three steps directly: [`UploadSession::begin_upload`],
//! [`UploadSession::record_progress`] and [`UploadSession::finish_upload`].

use futures::future;
use futures::StreamExt;

use crate::config::{ResultMode, UploaderConfig};
use crate::error::{UploadError, UploadResult};
use crate::models::{PendingFile, UploadAttempt, UploadedTrack};
use crate::progress::{progress_channel, ProgressSender};
use crate::transport::{fetch_tracks, upload_file, Transport};
use crate::validation::validate_selection;

/// Where the page currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Selected,
    Uploading,
}

/// Confirmed uploads, shaped by [`ResultMode`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Results {
    /// Newest first.
    List(Vec<UploadedTrack>),
    Latest(Option<UploadedTrack>),
}

impl Results {
    fn for_mode(mode: ResultMode) -> Self {
        match mode {
            ResultMode::List => Results::List(Vec::new()),
            ResultMode::Latest => Results::Latest(None),
        }
    }
}

/// Everything needed to send one attempt, detached from the session.
#[derive(Clone, Debug)]
pub struct UploadTicket<P> {
    pub file: PendingFile<P>,
    pub url: String,
}

impl<P> UploadTicket<P> {
    /// Send the file and decode the reply. Closes `progress` when done.
    pub async fn send<T>(self, transport: &T, progress: ProgressSender) -> UploadResult<UploadedTrack>
    where
        T: Transport<Payload = P>,
    {
        upload_file(transport, &self.url, &self.file, progress).await
    }
}

/// Handle for clearing a copy mark once its display time is over.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CopyTicket {
    pub index: usize,
    pub url: String,
    generation: u64,
}

#[derive(Clone, Debug)]
pub struct UploadSession<P = ()> {
    config: UploaderConfig,
    pending: Option<PendingFile<P>>,
    attempt: Option<UploadAttempt>,
    error: Option<String>,
    results: Results,
    copied: Option<usize>,
    copy_generation: u64,
}

impl<P> UploadSession<P> {
    pub fn new(config: UploaderConfig) -> Self {
        let results = Results::for_mode(config.result_mode);
        Self {
            config,
            pending: None,
            attempt: None,
            error: None,
            results,
            copied: None,
            copy_generation: 0,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &UploaderConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        if self.attempt.is_some() {
            Phase::Uploading
        } else if self.pending.is_some() {
            Phase::Selected
        } else {
            Phase::Idle
        }
    }

    pub fn pending(&self) -> Option<&PendingFile<P>> {
        self.pending.as_ref()
    }

    pub fn attempt(&self) -> Option<&UploadAttempt> {
        self.attempt.as_ref()
    }

    pub fn is_uploading(&self) -> bool {
        self.attempt.is_some()
    }

    /// Progress of the active attempt.
    pub fn progress(&self) -> Option<u8> {
        self.attempt.as_ref().map(|attempt| attempt.progress)
    }

    /// Whether the upload control should be offered.
    pub fn can_upload(&self) -> bool {
        self.pending.is_some() && self.attempt.is_none()
    }

    /// Message for the error banner.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn results(&self) -> &Results {
        &self.results
    }

    /// All tracks held, newest first.
    pub fn tracks(&self) -> &[UploadedTrack] {
        match &self.results {
            Results::List(tracks) => tracks,
            Results::Latest(Some(track)) => std::slice::from_ref(track),
            Results::Latest(None) => &[],
        }
    }

    /// Most recent confirmed upload.
    pub fn latest(&self) -> Option<&UploadedTrack> {
        self.tracks().first()
    }

    /// Row currently marked as copied.
    pub fn copied_index(&self) -> Option<usize> {
        self.copied
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Validate `file` and make it the pending selection.
    ///
    /// On rejection the banner shows the validation message and any earlier
    /// selection is kept.
    pub fn select(&mut self, file: PendingFile<P>) -> UploadResult<()> {
        if self.is_uploading() {
            log::warn!("Ignoring selection of '{}' while an upload is running", file.name);
            return Err(UploadError::UploadInProgress);
        }

        match validate_selection(file.size, &file.media_type, self.config.max_file_size) {
            Ok(()) => {
                log::info!("🎵 Selected '{}' ({}, {})", file.name, file.media_type, file.size_label());
                self.pending = Some(file);
                self.error = None;
                Ok(())
            }
            Err(err) => {
                log::warn!("Rejected '{}': {:?}", file.name, err);
                let err = UploadError::from(err);
                self.error = Some(err.user_message());
                Err(err)
            }
        }
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    // =========================================================================
    // Upload
    // =========================================================================

    /// Start an attempt for the pending file.
    pub fn begin_upload(&mut self) -> UploadResult<UploadTicket<P>>
    where
        P: Clone,
    {
        if self.is_uploading() {
            return Err(UploadError::UploadInProgress);
        }
        let Some(file) = self.pending.clone() else {
            let err = UploadError::NoFileSelected;
            self.error = Some(err.user_message());
            return Err(err);
        };

        log::info!("📤 Uploading '{}' to {}", file.name, self.config.upload_url());
        self.attempt = Some(UploadAttempt::default());
        self.error = None;

        Ok(UploadTicket {
            file,
            url: self.config.upload_url(),
        })
    }

    /// Move the active attempt's progress forward. Lower values are ignored.
    pub fn record_progress(&mut self, pct: u8) {
        if let Some(attempt) = self.attempt.as_mut() {
            attempt.progress = attempt.progress.max(pct.min(100));
        }
    }

    /// Resolve the active attempt with the transport outcome.
    ///
    /// Success stores the track and clears the pending file; failure shows
    /// the error and keeps the file for a retry. The outcome is handed back.
    pub fn finish_upload(&mut self, outcome: UploadResult<UploadedTrack>) -> UploadResult<UploadedTrack> {
        let Some(mut attempt) = self.attempt.take() else {
            log::warn!("Upload finished with no attempt in flight");
            return outcome;
        };

        attempt.completed = true;
        match outcome {
            Ok(track) => {
                attempt.progress = 100;
                log::info!("✅ Uploaded '{}' -> {}", track.display_name(), track.url);
                log::debug!("Attempt closed: {:?}", attempt);
                self.store(track.clone());
                self.pending = None;
                self.error = None;
                Ok(track)
            }
            Err(err) => {
                let message = err.user_message();
                log::error!("❌ Upload failed at {}%: {}", attempt.progress, err);
                attempt.error = Some(message.clone());
                log::debug!("Attempt closed: {:?}", attempt);
                self.error = Some(message);
                Err(err)
            }
        }
    }

    /// Run a whole attempt against `transport`.
    ///
    /// `on_progress` sees every percentage the transport reports, ending
    /// with 100 on success.
    pub async fn upload<T>(&mut self, transport: &T, mut on_progress: impl FnMut(u8)) -> UploadResult<UploadedTrack>
    where
        T: Transport<Payload = P>,
        P: Clone,
    {
        let ticket = self.begin_upload()?;
        let (sender, stream) = progress_channel();

        let attempt = &mut self.attempt;
        let watch = stream.for_each(|pct| {
            if let Some(attempt) = attempt.as_mut() {
                attempt.progress = attempt.progress.max(pct);
            }
            on_progress(pct);
            future::ready(())
        });

        let (outcome, ()) = future::join(ticket.send(transport, sender), watch).await;
        self.finish_upload(outcome)
    }

    fn store(&mut self, track: UploadedTrack) {
        match &mut self.results {
            Results::List(tracks) => {
                tracks.insert(0, track);
                // Keep the mark on the same track after the rows shift.
                self.copied = self.copied.map(|index| index + 1);
            }
            Results::Latest(latest) => {
                *latest = Some(track);
                self.copied = None;
            }
        }
    }

    // =========================================================================
    // Listing
    // =========================================================================

    /// Replace the list with what the server reported. Single-result
    /// sessions ignore listings.
    pub fn replace_tracks(&mut self, tracks: Vec<UploadedTrack>) {
        match &mut self.results {
            Results::List(current) => {
                log::debug!("Loaded {} tracks", tracks.len());
                *current = tracks;
                self.copied = None;
            }
            Results::Latest(_) => log::debug!("Ignoring track listing in single-result mode"),
        }
    }

    /// Fetch the listing once. Failures are logged and leave the list as is.
    pub async fn refresh_tracks<T: Transport>(&mut self, transport: &T) {
        if self.config.result_mode != ResultMode::List {
            return;
        }
        match fetch_tracks(transport, &self.config).await {
            Ok(tracks) => self.replace_tracks(tracks),
            Err(err) => log::error!("Error fetching music list: {}", err),
        }
    }

    // =========================================================================
    // Copy indicator
    // =========================================================================

    /// Mark row `index` as copied. Returns `None` when there is no such row.
    pub fn mark_copied(&mut self, index: usize) -> Option<CopyTicket> {
        let url = self.tracks().get(index)?.url.clone();
        self.copy_generation += 1;
        self.copied = Some(index);
        Some(CopyTicket {
            index,
            url,
            generation: self.copy_generation,
        })
    }

    /// Clear the mark if `ticket` is still the latest one.
    pub fn clear_copied(&mut self, ticket: &CopyTicket) -> bool {
        if ticket.generation != self.copy_generation {
            return false;
        }
        self.copied = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{TransportError, FALLBACK_UPLOAD_ERROR};
    use crate::transport::Reply;
    use futures::executor::block_on;
    use std::cell::RefCell;

    const MB: u64 = 1024 * 1024;

    /// Replays canned replies and progress steps.
    struct ScriptedTransport {
        list: Result<Reply, TransportError>,
        upload: Result<Reply, TransportError>,
        steps: Vec<(u64, u64)>,
        posted: RefCell<Vec<(String, String, String)>>,
    }

    impl ScriptedTransport {
        fn uploading(upload: Result<Reply, TransportError>, steps: Vec<(u64, u64)>) -> Self {
            Self {
                list: Ok(Reply::new(200, "[]")),
                upload,
                steps,
                posted: RefCell::new(Vec::new()),
            }
        }

        fn listing(list: Result<Reply, TransportError>) -> Self {
            Self {
                list,
                upload: Err(TransportError::Network("unused".into())),
                steps: Vec::new(),
                posted: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for ScriptedTransport {
        type Payload = Vec<u8>;

        async fn get(&self, _url: &str) -> Result<Reply, TransportError> {
            self.list.clone()
        }

        async fn post_multipart(
            &self,
            url: &str,
            field: &str,
            file: &PendingFile<Vec<u8>>,
            progress: ProgressSender,
        ) -> Result<Reply, TransportError> {
            self.posted
                .borrow_mut()
                .push((url.to_string(), field.to_string(), file.name.clone()));
            for (sent, total) in &self.steps {
                progress.report(*sent, *total);
            }
            self.upload.clone()
        }
    }

    fn list_session() -> UploadSession<Vec<u8>> {
        UploadSession::new(UploaderConfig::list_variant("https://api.test"))
    }

    fn mp3(name: &str, size: u64) -> PendingFile<Vec<u8>> {
        PendingFile::new(name, size, "audio/mpeg", vec![0u8; 4])
    }

    fn ok_reply(url: &str, filename: &str) -> Result<Reply, TransportError> {
        Ok(Reply::new(200, format!(r#"{{"url":"{url}","filename":"{filename}"}}"#)))
    }

    #[test]
    fn test_dropping_pdf_is_rejected() {
        let mut session = list_session();
        let pdf = PendingFile::new("paper.pdf", 200_000, "application/pdf", Vec::new());

        assert!(session.select(pdf).is_err());
        assert_eq!(session.error(), Some("Please upload an audio file (MP3, WAV, etc.)"));
        assert!(session.pending().is_none());
        assert!(!session.can_upload());
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_oversized_mp3_is_rejected() {
        let mut session = list_session();

        assert!(session.select(mp3("long.mp3", 200 * MB)).is_err());
        assert_eq!(session.error(), Some("File size exceeds 50MB limit"));
        assert!(session.pending().is_none());
    }

    #[test]
    fn test_single_variant_has_no_size_limit() {
        let mut session: UploadSession<Vec<u8>> = UploadSession::new(UploaderConfig::single_variant("https://api.test"));
        assert!(session.select(mp3("long.mp3", 200 * MB)).is_ok());
    }

    #[test]
    fn test_rejection_keeps_previous_selection() {
        let mut session = list_session();
        session.select(mp3("good.mp3", MB)).unwrap();
        session
            .select(PendingFile::new("bad.txt", 10, "text/plain", Vec::new()))
            .unwrap_err();

        assert_eq!(session.pending().map(|f| f.name.as_str()), Some("good.mp3"));
        assert_eq!(session.phase(), Phase::Selected);
        assert!(session.error().is_some());

        session.select(mp3("better.mp3", MB)).unwrap();
        assert_eq!(session.error(), None);
        assert_eq!(session.pending().map(|f| f.name.as_str()), Some("better.mp3"));
    }

    #[test]
    fn test_upload_without_selection() {
        let mut session = list_session();
        let err = session.begin_upload().unwrap_err();
        assert!(matches!(err, UploadError::NoFileSelected));
        assert_eq!(session.error(), Some("Please select a file first"));
        assert!(!session.is_uploading());
    }

    #[test]
    fn test_successful_upload_prepends_track() {
        let mut session = list_session();
        session.replace_tracks(vec![UploadedTrack::new("https://x/old.mp3", "old.mp3")]);
        session.select(mp3("y.mp3", 4 * MB)).unwrap();

        let transport = ScriptedTransport::uploading(
            ok_reply("https://x/y.mp3", "y.mp3"),
            vec![(0, 400), (100, 400), (250, 400), (400, 400)],
        );
        let mut seen = Vec::new();
        let track = block_on(session.upload(&transport, |pct| seen.push(pct))).unwrap();

        assert_eq!(track, UploadedTrack::new("https://x/y.mp3", "y.mp3"));
        assert_eq!(session.tracks().len(), 2);
        assert_eq!(session.tracks()[0], track);
        assert!(session.pending().is_none());
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.error(), None);

        assert_eq!(seen, vec![0, 25, 62, 100, 100]);
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(seen.last(), Some(&100));

        let posted = transport.posted.borrow();
        assert_eq!(
            posted[0],
            ("https://api.test/api/upload".to_string(), "music".to_string(), "y.mp3".to_string())
        );
    }

    #[test]
    fn test_failed_upload_shows_server_message_and_keeps_file() {
        let mut session = list_session();
        session.select(mp3("y.mp3", MB)).unwrap();

        let transport = ScriptedTransport::uploading(Ok(Reply::new(413, r#"{"error":"too large"}"#)), vec![(10, 100)]);
        let err = block_on(session.upload(&transport, |_| {})).unwrap_err();

        assert!(matches!(err, UploadError::Transport(_)));
        assert_eq!(session.error(), Some("too large"));
        assert_eq!(session.pending().map(|f| f.name.as_str()), Some("y.mp3"));
        assert_eq!(session.phase(), Phase::Selected);
        assert!(session.tracks().is_empty());
    }

    #[test]
    fn test_failed_upload_without_message_uses_fallback() {
        let mut session = list_session();
        session.select(mp3("y.mp3", MB)).unwrap();

        let transport = ScriptedTransport::uploading(Ok(Reply::new(500, "Internal Server Error")), Vec::new());
        block_on(session.upload(&transport, |_| {})).unwrap_err();
        assert_eq!(session.error(), Some(FALLBACK_UPLOAD_ERROR));

        let transport = ScriptedTransport::uploading(Err(TransportError::Network("offline".into())), Vec::new());
        block_on(session.upload(&transport, |_| {})).unwrap_err();
        assert_eq!(session.error(), Some(FALLBACK_UPLOAD_ERROR));
    }

    #[test]
    fn test_retry_after_failure_uses_same_file() {
        let mut session = list_session();
        session.select(mp3("y.mp3", MB)).unwrap();

        let failing = ScriptedTransport::uploading(Err(TransportError::Network("offline".into())), Vec::new());
        block_on(session.upload(&failing, |_| {})).unwrap_err();

        let working = ScriptedTransport::uploading(ok_reply("https://x/y.mp3", "y.mp3"), vec![(1, 1)]);
        block_on(session.upload(&working, |_| {})).unwrap();

        assert_eq!(working.posted.borrow()[0].2, "y.mp3");
        assert_eq!(session.error(), None);
        assert_eq!(session.tracks().len(), 1);
    }

    #[test]
    fn test_one_attempt_at_a_time() {
        let mut session = list_session();
        session.select(mp3("a.mp3", MB)).unwrap();
        let _ticket = session.begin_upload().unwrap();

        assert!(matches!(session.begin_upload(), Err(UploadError::UploadInProgress)));
        assert!(matches!(session.select(mp3("b.mp3", MB)), Err(UploadError::UploadInProgress)));
        assert_eq!(session.pending().map(|f| f.name.as_str()), Some("a.mp3"));
        assert_eq!(session.phase(), Phase::Uploading);
    }

    #[test]
    fn test_stepwise_progress_is_monotonic() {
        let mut session = list_session();
        session.select(mp3("a.mp3", MB)).unwrap();
        session.begin_upload().unwrap();

        assert_eq!(session.progress(), Some(0));
        session.record_progress(40);
        session.record_progress(20);
        assert_eq!(session.progress(), Some(40));
        session.record_progress(250);
        assert_eq!(session.progress(), Some(100));

        session
            .finish_upload(Ok(UploadedTrack::new("https://x/a.mp3", "a.mp3")))
            .unwrap();
        assert_eq!(session.progress(), None);
        assert!(session.attempt().is_none());
    }

    #[test]
    fn test_latest_variant_keeps_only_last_result() {
        let mut session: UploadSession<Vec<u8>> = UploadSession::new(UploaderConfig::single_variant("https://api.test"));
        for name in ["a.mp3", "b.mp3"] {
            session.select(mp3(name, MB)).unwrap();
            let url = format!("https://x/{name}");
            let transport = ScriptedTransport::uploading(ok_reply(&url, name), vec![(1, 1)]);
            block_on(session.upload(&transport, |_| {})).unwrap();
        }

        assert_eq!(session.tracks().len(), 1);
        assert_eq!(session.latest().map(|t| t.filename.as_str()), Some("b.mp3"));
        assert!(matches!(session.results(), Results::Latest(Some(_))));
    }

    #[test]
    fn test_refresh_replaces_list() {
        let mut session = list_session();
        let transport = ScriptedTransport::listing(Ok(Reply::new(
            200,
            r#"[{"url":"https://x/1.mp3","filename":"1.mp3"},{"url":"https://x/2.mp3","filename":"2.mp3"}]"#,
        )));
        block_on(session.refresh_tracks(&transport));
        assert_eq!(session.tracks().len(), 2);
        assert_eq!(session.tracks()[0].filename, "1.mp3");
    }

    #[test]
    fn test_refresh_failure_is_silent() {
        let mut session = list_session();
        for list in [
            Err(TransportError::Network("offline".into())),
            Ok(Reply::new(500, r#"{"error":"db down"}"#)),
            Ok(Reply::new(200, r#"{"not":"a list"}"#)),
        ] {
            block_on(session.refresh_tracks(&ScriptedTransport::listing(list)));
            assert!(session.tracks().is_empty());
            assert_eq!(session.error(), None);
        }
    }

    #[test]
    fn test_single_variant_skips_listing() {
        let mut session: UploadSession<Vec<u8>> = UploadSession::new(UploaderConfig::single_variant("https://api.test"));
        let transport = ScriptedTransport::listing(Ok(Reply::new(200, r#"[{"url":"https://x/1.mp3","filename":"1.mp3"}]"#)));
        block_on(session.refresh_tracks(&transport));
        assert!(session.tracks().is_empty());
    }

    #[test]
    fn test_copy_indicator_follows_latest_call() {
        let mut session = list_session();
        session.replace_tracks(
            (0..4)
                .map(|i| UploadedTrack::new(format!("https://x/{i}.mp3"), format!("{i}.mp3")))
                .collect(),
        );

        let first = session.mark_copied(2).unwrap();
        assert_eq!(first.url, "https://x/2.mp3");
        assert_eq!(session.copied_index(), Some(2));

        let second = session.mark_copied(0).unwrap();
        assert_eq!(session.copied_index(), Some(0));

        // The first timer fires but must not clear the newer mark.
        assert!(!session.clear_copied(&first));
        assert_eq!(session.copied_index(), Some(0));

        assert!(session.clear_copied(&second));
        assert_eq!(session.copied_index(), None);
    }

    #[test]
    fn test_copy_out_of_range() {
        let mut session = list_session();
        assert!(session.mark_copied(0).is_none());
        assert_eq!(session.copied_index(), None);
    }

    #[test]
    fn test_copy_mark_follows_track_after_prepend() {
        let mut session = list_session();
        session.replace_tracks(vec![UploadedTrack::new("https://x/old.mp3", "old.mp3")]);
        session.mark_copied(0).unwrap();

        session.select(mp3("new.mp3", MB)).unwrap();
        let transport = ScriptedTransport::uploading(ok_reply("https://x/new.mp3", "new.mp3"), Vec::new());
        block_on(session.upload(&transport, |_| {})).unwrap();

        assert_eq!(session.copied_index(), Some(1));
        assert_eq!(session.tracks()[1].filename, "old.mp3");
    }
}
