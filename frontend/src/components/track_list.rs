//! Uploaded tracks with copy-to-clipboard URLs.

use gloo_timers::future::TimeoutFuture;
use leptos::*;

use uploader_core::COPY_FEEDBACK_MS;

use crate::services::copy_to_clipboard;
use crate::BrowserSession;

#[component]
pub fn TrackList(session: RwSignal<BrowserSession>) -> impl IntoView {
    let copy_url = move |index: usize| {
        let Some(ticket) = session.try_update(|s| s.mark_copied(index)).flatten() else {
            return;
        };

        let url = ticket.url.clone();
        spawn_local(async move {
            if let Err(e) = copy_to_clipboard(&url).await {
                log::error!("❌ {}", e);
            }
        });

        spawn_local(async move {
            TimeoutFuture::new(COPY_FEEDBACK_MS).await;
            session.update(|s| {
                s.clear_copied(&ticket);
            });
        });
    };

    view! {
        <div class="tracks-section">
            <h2>"Uploaded Music"</h2>

            <Show
                when=move || !session.with(|s| s.tracks().is_empty())
                fallback=|| view! { <p class="tracks-empty">"No music files uploaded yet"</p> }
            >
                <ul class="track-list">
                    <For
                        each=move || session.with(|s| s.tracks().to_vec().into_iter().enumerate().collect::<Vec<_>>())
                        key=|(index, track)| (*index, track.url.clone())
                        children=move |(index, track)| {
                            let copied = move || session.with(|s| s.copied_index() == Some(index));
                            view! {
                                <li class="track-row">
                                    <div class="track-info">
                                        <p class="track-name">{track.display_name().to_string()}</p>
                                        <p class="track-url">{track.url.clone()}</p>
                                    </div>
                                    <button
                                        class="copy-button"
                                        class:copied=copied
                                        on:click=move |_| copy_url(index)
                                    >
                                        {move || if copied() { "Copied!" } else { "Copy URL" }}
                                    </button>
                                </li>
                            }
                        }
                    />
                </ul>
            </Show>
        </div>
    }
}
