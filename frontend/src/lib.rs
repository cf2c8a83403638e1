//! Music Uploader - Frontend Rust/Leptos Application
//!
//! A WebAssembly page for uploading audio files and sharing their URLs.
//! All upload logic lives in `uploader_core`; this crate renders it and
//! provides the browser transport.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Header (page navigation)                                    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  LibraryPage  "/"                                            │
//! │  ├── Hero                                                    │
//! │  ├── UploadSection (drop zone, button, progress)             │
//! │  └── TrackList (fetched on mount, copy URL)                  │
//! │                                                              │
//! │  QuickUploadPage  "/quick"                                   │
//! │  ├── Hero                                                    │
//! │  ├── UploadSection (no size limit)                           │
//! │  └── LatestResult (audio player)                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`config`] - Build-time API base and page configurations
//! - [`components`] - UI components (Upload, TrackList, etc.)
//! - [`services`] - Browser transport and clipboard

use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use web_sys::File;

use uploader_core::{fetch_tracks, UploadSession};

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::*;
pub use components::*;
pub use services::*;

/// Session state of one page, holding browser file handles.
pub type BrowserSession = UploadSession<File>;

// =============================================================================
// Application
// =============================================================================

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text=APP_NAME/>
        <Router>
            <Header/>
            <main class="container">
                <Routes>
                    <Route path="/" view=LibraryPage/>
                    <Route path="/quick" view=QuickUploadPage/>
                </Routes>
            </main>
            <Footer/>
        </Router>
    }
}

/// Upload page with the running list of uploaded tracks.
#[component]
fn LibraryPage() -> impl IntoView {
    let session = create_rw_signal(BrowserSession::new(list_config()));

    // One listing fetch on mount; failure leaves the list empty.
    spawn_local(async move {
        let config = session.with_untracked(|s| s.config().clone());
        match fetch_tracks(&BrowserTransport, &config).await {
            Ok(tracks) => session.update(|s| s.replace_tracks(tracks)),
            Err(e) => log::error!("Error fetching music list: {}", e),
        }
    });

    view! {
        <Hero
            title="Music Uploader"
            subtitle="Upload an audio file and copy its public URL."
        />
        <UploadSection session=session/>
        <TrackList session=session/>
    }
}

/// Upload page showing only the latest result.
#[component]
fn QuickUploadPage() -> impl IntoView {
    let session = create_rw_signal(BrowserSession::new(single_config()));

    view! {
        <Hero
            title="Quick Upload"
            subtitle="Upload one file and listen to it right away."
        />
        <UploadSection session=session/>
        <LatestResult session=session/>
    }
}
