//! Uploader configuration.
//!
//! The API base URL is supplied once by the embedding application (the
//! frontend resolves it at build time). Everything else is a constant of the
//! upload contract.

/// Size ceiling of the list page (150 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 150 * 1024 * 1024;

/// How long a row stays marked as copied, in milliseconds.
pub const COPY_FEEDBACK_MS: u32 = 2_000;

/// Multipart field carrying the audio file.
pub const UPLOAD_FIELD: &str = "music";

/// Listing endpoint, relative to the API base.
pub const MUSIC_PATH: &str = "/api/music";

/// Upload endpoint, relative to the API base.
pub const UPLOAD_PATH: &str = "/api/upload";

/// Where successful uploads end up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResultMode {
    /// Newest-first list, fetched from the server on mount.
    List,
    /// Only the latest upload is kept.
    Latest,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploaderConfig {
    /// Scheme and host of the API, e.g. `https://api.example.com`.
    pub api_base: String,
    /// `None` disables the size check.
    pub max_file_size: Option<u64>,
    pub result_mode: ResultMode,
}

impl UploaderConfig {
    /// List page: 150 MiB ceiling, accumulating track list.
    pub fn list_variant(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            max_file_size: Some(DEFAULT_MAX_FILE_SIZE),
            result_mode: ResultMode::List,
        }
    }

    /// Single-result page: no size ceiling, latest upload only.
    pub fn single_variant(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            max_file_size: None,
            result_mode: ResultMode::Latest,
        }
    }

    pub fn music_url(&self) -> String {
        self.endpoint(MUSIC_PATH)
    }

    pub fn upload_url(&self) -> String {
        self.endpoint(UPLOAD_PATH)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base.trim_end_matches('/'), path)
    }
}
