//! Playlist Converter UI entry point for WASM.

#![no_main]

use leptos::prelude::*;
use playlist_converter_ui::App;
use playlist_converter_ui::browser::load_config;
use playlist_converter_ui::logging::init_logging;
use wasm_bindgen::prelude::wasm_bindgen;

/// Entry point for the WASM application.
/// This function is called automatically when the WASM module is loaded.
#[wasm_bindgen(start)]
pub fn start() {
    // Set up better panic messages in the browser console
    console_error_panic_hook::set_once();

    let config = load_config();
    init_logging(&config.log_level);

    // Remove the loading spinner
    if let Some(window) = web_sys::window()
        && let Some(document) = window.document()
        && let Some(loading) = document.get_element_by_id("loading")
    {
        loading.remove();
    }

    mount_to_body(move || view! { <App config=config /> });
}
