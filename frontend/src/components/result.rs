//! Result panel of the single-result page: the latest upload with a player.

use leptos::*;

use crate::BrowserSession;

#[component]
pub fn LatestResult(session: RwSignal<BrowserSession>) -> impl IntoView {
    let latest = move || session.with(|s| s.latest().cloned());

    view! {
        <Show
            when=move || latest().is_some()
            fallback=|| view! { }
        >
            {move || latest().map(|track| view! {
                <div class="result-panel">
                    <h2>"Upload Successful!"</h2>
                    <p class="track-name">{track.display_name().to_string()}</p>
                    <a class="track-url" href=track.url.clone() target="_blank">
                        {track.url.clone()}
                    </a>
                    <audio class="track-player" controls=true src=track.url.clone()></audio>
                </div>
            })}
        </Show>
    }
}
