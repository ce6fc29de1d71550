//! Login buttons for the two platforms.

use leptos::logging::error;
use leptos::prelude::*;
use playlist_converter_core::{AuthCookie, ClientConfig, SessionStatus};

use crate::browser;

/// Where a login button leads. Falls back to the bare path when the page
/// origin is unknown or does not parse.
fn login_target(config: &ClientConfig, cookie: AuthCookie, origin: Option<String>) -> String {
    origin
        .and_then(|origin| match config.login_url(cookie, &origin) {
            Ok(url) => Some(url.to_string()),
            Err(e) => {
                error!("Invalid {} login URL: {}", cookie, e);
                None
            }
        })
        .unwrap_or_else(|| config.login_path(cookie).to_string())
}

fn start_login(config: &ClientConfig, cookie: AuthCookie) {
    browser::navigate(&login_target(config, cookie, browser::current_origin()));
}

/// One button per platform. A logged-in platform keeps its button, marked
/// `logged-in`, so the user can log in again.
#[component]
pub fn LoginPanel(
    /// Current session flags.
    #[prop(into)]
    status: Signal<SessionStatus>,
) -> impl IntoView {
    let config = use_context::<ClientConfig>().unwrap_or_default();

    view! {
        <div class="login-panel">
            {AuthCookie::ALL
                .into_iter()
                .map(|cookie| {
                    let config = config.clone();
                    view! {
                        <button
                            class="button login-button"
                            class:logged-in=move || status.get().is_authenticated(cookie)
                            on:click=move |_| start_login(&config, cookie)
                        >
                            {move || status.get().label(cookie)}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}
