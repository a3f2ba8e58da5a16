//! Landing page served at the base route.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::routes::{RouteTable, RouteView};

#[component]
pub fn AuthPage() -> impl IntoView {
    let enter_href = RouteTable::fauno()
        .protected_entries()
        .find(|e| e.view == RouteView::Layers)
        .map(|e| e.href())
        .unwrap_or_default();

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Fauno"</h1>
                <p class="auth-card__subtitle">"Shapefile publishing for GeoServer"</p>
                <A href=enter_href>"Enter"</A>
            </div>
        </div>
    }
}
