//! Navigation bar linking the protected sections.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::routes::{BASE_PATH, RouteTable};

/// Horizontal navigation built from the protected route entries.
#[component]
pub fn NavBar() -> impl IntoView {
    let links = RouteTable::fauno()
        .protected_entries()
        .map(|entry| {
            let href = entry.href();
            let label = entry.view.label();
            view! {
                <li class="nav-bar__item">
                    <A href=href>{label}</A>
                </li>
            }
        })
        .collect_view();

    view! {
        <nav class="nav-bar">
            <A href=BASE_PATH>
                <span class="nav-bar__brand">"Fauno"</span>
            </A>
            <ul class="nav-bar__links">{links}</ul>
        </nav>
    }
}
