//! `Playlist Converter` UI - Leptos-based user interface.
//!
//! This crate provides the browser front end: the root screen with the
//! login buttons and conversion wizard, and the login redirect landing
//! screens. All state transitions live in `playlist-converter-core`.

// Component files tend to be large by nature - they contain view logic
#![allow(clippy::too_many_lines)]
// Pass by value suggestions for small types like bool - not always clearer
#![allow(clippy::trivially_copy_pass_by_ref)]
// Leptos components take their props by value
#![allow(clippy::needless_pass_by_value)]

pub mod app;
pub mod browser;
pub mod components;
pub mod logging;
pub mod theme;

pub use app::{App, Route};
pub use browser::BrowserCookieStore;
