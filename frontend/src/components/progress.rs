use leptos::*;

#[component]
pub fn ProgressBar(#[prop(into)] percent: Signal<u8>) -> impl IntoView {
    view! {
        <div class="progress-section">
            <div class="progress-bar">
                <div
                    class="progress-fill"
                    style=move || format!("width: {}%;", percent.get())
                ></div>
            </div>
            <p class="progress-text">"Uploading: " {move || percent.get()} "%"</p>
        </div>
    }
}
