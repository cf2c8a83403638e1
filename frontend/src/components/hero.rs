//! Hero section component

use leptos::*;

#[component]
pub fn Hero(
    /// Page heading
    #[prop(into)]
    title: String,
    /// Line under the heading
    #[prop(into)]
    subtitle: String,
) -> impl IntoView {
    view! {
        <div class="hero">
            <h1>{title}</h1>
            <p class="subtitle">{subtitle}</p>
        </div>
    }
}
