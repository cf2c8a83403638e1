use leptos::*;
use leptos_router::*;

use crate::APP_NAME;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header>
            <div class="header-left">
                <A href="/" class="logo">{APP_NAME}</A>
            </div>
            <nav class="header-right">
                <A href="/" class="nav-link" exact=true>"Library"</A>
                <A href="/quick" class="nav-link">"Quick upload"</A>
            </nav>
        </header>
    }
}
