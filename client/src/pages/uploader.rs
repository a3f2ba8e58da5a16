//! Upload section placeholder.

use leptos::prelude::*;

#[component]
pub fn UploaderPage() -> impl IntoView {
    view! { <h1>"Upload"</h1> }
}
