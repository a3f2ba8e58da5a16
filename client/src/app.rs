//! Root application component with routing and context providers.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Outlet, ParentRoute, Route, Router, Routes},
    hooks::use_location,
};

use crate::components::protected_layout::ProtectedLayout;
use crate::pages::{auth::AuthPage, history::HistoryPage, layers::LayersPage, uploader::UploaderPage};
use crate::routes::{RouteTable, RouteView};
use crate::state::access::AccessState;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="pt-BR">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Everything lives under the `fauno` segment so the server-generated route
/// list and client-side matching share the same base path.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    // Authentication is handled outside this app; the gate is left open.
    provide_context(RwSignal::new(AccessState::open()));

    view! {
        <Stylesheet id="leptos" href="/pkg/fauno.css"/>

        <Router>
            <PageTitle/>
            <Routes fallback=|| "Page not found.".into_view()>
                <ParentRoute path=StaticSegment("fauno") view=Outlet>
                    <Route path=StaticSegment("") view=AuthPage/>
                    <ParentRoute path=StaticSegment("") view=ProtectedLayout>
                        <Route path=StaticSegment("layers") view=LayersPage/>
                        <Route path=StaticSegment("upload") view=UploaderPage/>
                        <Route path=StaticSegment("history") view=HistoryPage/>
                    </ParentRoute>
                </ParentRoute>
            </Routes>
        </Router>
    }
}

/// Keeps the document title in step with the matched route.
#[component]
fn PageTitle() -> impl IntoView {
    let location = use_location();
    let title = move || document_title(&location.pathname.get());
    view! { <Title text=title/> }
}

pub(crate) fn document_title(pathname: &str) -> String {
    match RouteTable::fauno().resolve(pathname) {
        Some(entry) if entry.view != RouteView::Auth => format!("{} | Fauno", entry.view.label()),
        _ => "Fauno".to_owned(),
    }
}
