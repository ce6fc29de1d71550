//! Main application component and path routing.

use leptos::prelude::*;
use playlist_converter_core::{AuthCookie, ClientConfig};

use crate::browser;
use crate::components::{HomeScreen, RedirectScreen};
use crate::theme::generate_css_variables;

/// Landing path after a Spotify login.
pub const REDIRECT_SPOTIFY_PATH: &str = "/redirectSpotifyLogin";
/// Landing path after a YouTube login.
pub const REDIRECT_YOUTUBE_PATH: &str = "/redirectYoutubeLogin";

/// Screen selected by the page path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Root screen; also the fallback for unknown paths.
    Home,
    /// Login redirect landing for a platform.
    Redirect(AuthCookie),
}

impl Route {
    /// Resolve a `location.pathname`.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        let path = path.trim_end_matches('/');
        if path == REDIRECT_SPOTIFY_PATH {
            Self::Redirect(AuthCookie::Spotify)
        } else if path == REDIRECT_YOUTUBE_PATH {
            Self::Redirect(AuthCookie::YouTube)
        } else {
            Self::Home
        }
    }
}

/// Main application component.
#[component]
pub fn App(
    /// Configuration; read from the page when absent.
    #[prop(optional)]
    config: Option<ClientConfig>,
) -> impl IntoView {
    let config = config.unwrap_or_else(browser::load_config);
    let (theme, set_theme) = signal(config.theme);
    provide_context(config);

    let route = Route::from_path(&browser::current_pathname());

    view! {
        <style>{move || generate_css_variables(theme.get())}</style>
        <style>{include_str!("../styles/main.css")}</style>
        {match route {
            Route::Home => view! { <HomeScreen theme=theme set_theme=set_theme /> }.into_any(),
            Route::Redirect(cookie) => view! { <RedirectScreen cookie=cookie /> }.into_any(),
        }}
    }
}
