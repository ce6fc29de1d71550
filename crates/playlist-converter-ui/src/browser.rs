//! Browser bindings: the `document.cookie` session store, location helpers
//! and config loading.

use chrono::Utc;
use leptos::logging::{error, warn};
use playlist_converter_core::cookie::{delete_cookie_header, set_cookie_header};
use playlist_converter_core::{
    ClientConfig, CookieTtl, Error, Result, SessionStatus, SessionStore, find_cookie,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlDocument;

/// Id of the optional `<script type="application/json">` element holding a
/// [`ClientConfig`] override.
pub const CONFIG_ELEMENT_ID: &str = "playlist-converter-config";

fn js_error(value: &JsValue) -> Error {
    Error::CookieAccess(
        value
            .as_string()
            .unwrap_or_else(|| format!("{value:?}")),
    )
}

/// [`SessionStore`] backed by the page's `document.cookie`.
#[derive(Debug, Clone)]
pub struct BrowserCookieStore {
    document: HtmlDocument,
}

impl BrowserCookieStore {
    /// Bind to the current document.
    pub fn new() -> Result<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| Error::CookieAccess("no document available".to_string()))?;
        let document = document
            .dyn_into::<HtmlDocument>()
            .map_err(|_| Error::CookieAccess("document is not an HTML document".to_string()))?;
        Ok(Self { document })
    }
}

impl SessionStore for BrowserCookieStore {
    fn get(&self, name: &str) -> Result<Option<String>> {
        let cookies = self.document.cookie().map_err(|e| js_error(&e))?;
        Ok(find_cookie(&cookies, name).map(str::to_string))
    }

    fn set(&self, name: &str, value: &str, ttl: CookieTtl) -> Result<()> {
        self.document
            .set_cookie(&set_cookie_header(name, value, ttl, Utc::now()))
            .map_err(|e| js_error(&e))
    }

    fn delete(&self, name: &str) -> Result<()> {
        self.document
            .set_cookie(&delete_cookie_header(name))
            .map_err(|e| js_error(&e))
    }
}

/// Read both platform cookies. Any failure reads as logged out.
pub fn current_session_status() -> SessionStatus {
    match BrowserCookieStore::new() {
        Ok(store) => SessionStatus::check(&store),
        Err(e) => {
            error!("Cookie store unavailable: {}", e);
            SessionStatus::default()
        }
    }
}

/// Full URL of the current page.
pub fn current_href() -> Option<String> {
    web_sys::window().and_then(|w| w.location().href().ok())
}

/// Origin of the current page.
pub fn current_origin() -> Option<String> {
    web_sys::window().and_then(|w| w.location().origin().ok())
}

/// Path of the current page.
pub fn current_pathname() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// Navigate the page to `href`.
pub fn navigate(href: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) = window.location().set_href(href) {
        error!("Failed to navigate to {}: {:?}", href, e);
    }
}

/// Reload the page.
pub fn reload() {
    if let Some(window) = web_sys::window()
        && let Err(e) = window.location().reload()
    {
        error!("Failed to reload: {:?}", e);
    }
}

/// Show a blocking browser alert.
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window()
        && let Err(e) = window.alert_with_message(message)
    {
        error!("Failed to show alert: {:?}", e);
    }
}

/// Whether the page runs inside the Tauri desktop shell rather than a plain
/// browser tab.
pub fn is_tauri_available() -> bool {
    web_sys::window().is_some_and(|window| {
        js_sys::Reflect::get(&window, &JsValue::from_str("__TAURI__"))
            .is_ok_and(|tauri| !tauri.is_undefined())
    })
}

/// Load the config override embedded in the page, or the defaults.
pub fn load_config() -> ClientConfig {
    let json = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .map(|el| el.inner_html());

    match json {
        Some(json) if !json.trim().is_empty() => ClientConfig::from_json(&json)
            .unwrap_or_else(|e| {
                warn!("Ignoring embedded config: {}", e);
                ClientConfig::default()
            }),
        _ => ClientConfig::default(),
    }
}
