//! Layers page listing the layers published in the configured schema.
//!
//! SYSTEM CONTEXT
//! ==============
//! Data is fetched from the browser after hydration. The server render shows
//! the loading state so both sides produce the same initial markup.

use leptos::prelude::*;

use crate::net::types::LayerRecord;
use crate::state::layers::LayersState;

#[component]
pub fn LayersPage() -> impl IntoView {
    let state = RwSignal::new(LayersState { loading: true, ..LayersState::default() });
    load_layers(state);

    let on_refresh = move |_| {
        if state.get_untracked().loading {
            return;
        }
        state.update(LayersState::begin_fetch);
        load_layers(state);
    };

    let rows = move || {
        state
            .get()
            .layers
            .into_iter()
            .map(|layer| view! { <LayerRow layer=layer/> })
            .collect_view()
    };

    view! {
        <section class="layers-page">
            <header class="layers-page__header">
                <h1>"Layers"</h1>
                <button class="layers-page__refresh" on:click=on_refresh disabled=move || state.get().loading>
                    "Refresh"
                </button>
            </header>
            <Show when=move || state.get().loading>
                <p class="layers-page__status">"Loading layers..."</p>
            </Show>
            <Show when=move || state.get().error.is_some()>
                <p class="layers-page__error">{move || state.get().error.unwrap_or_default()}</p>
            </Show>
            <Show when=move || state.get().is_empty()>
                <p class="layers-page__status">"No layers published yet."</p>
            </Show>
            <table class="layers-table">
                <thead>
                    <tr>
                        <th>"Layer"</th>
                        <th>"Geometry"</th>
                        <th>"Column"</th>
                        <th>"SRID"</th>
                        <th>"Dimensions"</th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
        </section>
    }
}

#[component]
fn LayerRow(layer: LayerRecord) -> impl IntoView {
    let name = layer.qualified_name();
    view! {
        <tr>
            <td>{name}</td>
            <td>{layer.geometry_type}</td>
            <td>{layer.f_geometry_column}</td>
            <td>{layer.srid.to_string()}</td>
            <td>{layer.coord_dimension.to_string()}</td>
        </tr>
    }
}

fn load_layers(state: RwSignal<LayersState>) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let result = crate::net::api::fetch_layers().await;
        if let Err(e) = &result {
            log::warn!("layer fetch failed: {e}");
        }
        state.update(|s| s.finish_fetch(result));
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = state;
}
