//! Audio upload component with drag & drop support.
//!
//! Turns a picked or dropped file into a selection on the session, then runs
//! the upload with live progress.

use futures::StreamExt;
use leptos::*;
use web_sys::{Event, File, HtmlInputElement};

use uploader_core::{progress_channel, PendingFile};

use crate::components::ProgressBar;
use crate::config::ACCEPTED_TYPES;
use crate::services::BrowserTransport;
use crate::BrowserSession;

#[component]
pub fn UploadSection(session: RwSignal<BrowserSession>) -> impl IntoView {
    let file_input = create_node_ref::<html::Input>();

    let select_file = move |file: File| {
        let pending = PendingFile::new(file.name(), file.size() as u64, file.type_(), file);
        session.update(|s| {
            // Rejections land in the session's error banner.
            let _ = s.select(pending);
        });
    };

    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            select_file(file);
        }
        // Allow picking the same file again.
        input.set_value("");
    };

    let on_drag_over = move |ev: ev::DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
    };

    let on_drop = move |ev: ev::DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        if session.with_untracked(|s| s.is_uploading()) {
            return;
        }
        let file = ev
            .data_transfer()
            .and_then(|dt| dt.files())
            .and_then(|files| files.get(0));
        if let Some(file) = file {
            select_file(file);
        }
    };

    let trigger_file_input = move |_| {
        if session.with_untracked(|s| s.is_uploading()) {
            return;
        }
        if let Some(input) = file_input.get() {
            input.click();
        }
    };

    let on_upload = move |_| {
        let Some(Ok(ticket)) = session.try_update(|s| s.begin_upload()) else {
            return;
        };

        spawn_local(async move {
            let (sender, mut progress) = progress_channel();

            spawn_local(async move {
                while let Some(pct) = progress.next().await {
                    session.update(|s| s.record_progress(pct));
                }
            });

            let outcome = ticket.send(&BrowserTransport, sender).await;
            session.update(|s| {
                let _ = s.finish_upload(outcome);
            });
        });
    };

    let selected = move || {
        session.with(|s| s.pending().map(|file| (file.name.clone(), file.size_label())))
    };

    view! {
        <div class="upload-section">
            <div
                class="drop-zone"
                on:dragover=on_drag_over
                on:drop=on_drop
                on:click=trigger_file_input
            >
                {move || match selected() {
                    Some((name, size)) => view! {
                        <div class="selected-file">
                            <p class="file-name">"Selected file: " {name}</p>
                            <p class="file-size">{size}</p>
                        </div>
                    }.into_view(),
                    None => view! {
                        <div class="upload-prompt">
                            <div class="upload-icon">"🎵"</div>
                            <p class="upload-text">"Drag & drop your music file here"</p>
                            <p class="upload-hint">"or"</p>
                            <span class="upload-link">"click to browse files"</span>
                            <p class="upload-hint">"Supports: MP3, WAV"</p>
                        </div>
                    }.into_view(),
                }}
            </div>

            <input
                type="file"
                accept=ACCEPTED_TYPES
                style="display:none"
                node_ref=file_input
                on:change=on_file_change
            />

            <Show
                when=move || session.with(|s| s.error().is_some())
                fallback=|| view! { }
            >
                <div class="error-message" on:click=move |_| session.update(|s| s.clear_error())>
                    {move || session.with(|s| s.error().unwrap_or_default().to_string())}
                </div>
            </Show>

            <Show
                when=move || session.with(|s| s.can_upload())
                fallback=|| view! { }
            >
                <button class="upload-button" on:click=on_upload>
                    "Upload Music"
                </button>
            </Show>

            <Show
                when=move || session.with(|s| s.is_uploading())
                fallback=|| view! { }
            >
                <ProgressBar percent=Signal::derive(move || session.with(|s| s.progress().unwrap_or(0)))/>
            </Show>
        </div>
    }
}
