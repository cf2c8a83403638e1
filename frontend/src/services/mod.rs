//! Browser services.
//!
//! # Services
//!
//! - [`upload`] - HTTP transport for the music API (listing and upload)
//! - [`clipboard`] - System clipboard
//!
//! # JavaScript Bindings
//!
//! `clipboard` binds `src/js/clipboard.js`.

pub mod clipboard;
pub mod upload;

pub use clipboard::*;
pub use upload::*;
