//! History section placeholder.

use leptos::prelude::*;

#[component]
pub fn HistoryPage() -> impl IntoView {
    view! { <h1>"History"</h1> }
}
