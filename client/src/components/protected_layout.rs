//! Layout route wrapping the protected sections.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered by the `ParentRoute` that encloses `/layers`, `/upload` and
//! `/history`. Whether the outlet is shown is decided by the `AccessState`
//! context supplied by the host; this layout never decides on its own.

use leptos::prelude::*;
use leptos_router::components::{A, Outlet};

use crate::components::nav_bar::NavBar;
use crate::routes::BASE_PATH;
use crate::state::access::AccessState;

#[component]
pub fn ProtectedLayout() -> impl IntoView {
    let access = use_context::<RwSignal<AccessState>>();
    let is_open = move || access.is_some_and(|a| a.get().open);

    view! {
        <div class="protected-layout">
            <NavBar/>
            <main class="protected-layout__content">
                <Show when=is_open fallback=RestrictedNotice>
                    <Outlet/>
                </Show>
            </main>
        </div>
    }
}

/// Shown in place of the outlet when the gate is closed.
#[component]
fn RestrictedNotice() -> impl IntoView {
    view! {
        <div class="restricted-notice">
            <h2>"Restricted"</h2>
            <p>"This section is not available in the current session."</p>
            <A href=BASE_PATH>"Back to start"</A>
        </div>
    }
}
