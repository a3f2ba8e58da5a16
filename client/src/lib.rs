//! # client
//!
//! Leptos frontend for Fauno. Declares the `/fauno` route table (a landing
//! view plus the protected Layers, Upload and History sections) and the pages
//! rendered for each entry. The same crate is compiled for SSR by the server
//! and to WASM for hydration in the browser.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod routes;
pub mod state;

/// WASM entry point: hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
