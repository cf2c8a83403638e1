//! Application configuration.
//!
//! The API host is fixed at build time through the `MUSIC_API_URL`
//! environment variable; there is no runtime reconfiguration.

use uploader_core::UploaderConfig;

/// API base URL, e.g. `https://api.example.com`.
pub const API_BASE: &str = match option_env!("MUSIC_API_URL") {
    Some(url) => url,
    None => "http://localhost:5000",
};

/// Application name, used for the document title.
pub const APP_NAME: &str = "Music Uploader";

/// File picker filter.
pub const ACCEPTED_TYPES: &str = "audio/*";

/// Configuration of the list page.
pub fn list_config() -> UploaderConfig {
    UploaderConfig::list_variant(API_BASE)
}

/// Configuration of the single-result page.
pub fn single_config() -> UploaderConfig {
    UploaderConfig::single_variant(API_BASE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_use_api_base() {
        let config = list_config();
        assert!(config.music_url().starts_with(API_BASE.trim_end_matches('/')));
        assert!(config.upload_url().ends_with("/api/upload"));
    }

    #[test]
    fn test_page_variants() {
        assert_eq!(list_config().max_file_size, Some(uploader_core::DEFAULT_MAX_FILE_SIZE));
        assert_eq!(single_config().max_file_size, None);
    }
}
