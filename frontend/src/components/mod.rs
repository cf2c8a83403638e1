//! UI Components for the music uploader.
//!
//! # Layout Components
//! - [`Header`] - Title and page navigation
//! - [`Hero`] - Page heading
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`UploadSection`] - Audio file selection with drag & drop, upload button
//! - [`ProgressBar`] - Upload progress indicator
//! - [`TrackList`] - Uploaded tracks with copy-to-clipboard URLs
//! - [`LatestResult`] - Latest upload with an embedded player

mod header;
mod hero;
mod upload;
mod progress;
mod track_list;
mod result;
mod footer;

pub use header::*;
pub use hero::*;
pub use upload::*;
pub use progress::*;
pub use track_list::*;
pub use result::*;
pub use footer::*;
