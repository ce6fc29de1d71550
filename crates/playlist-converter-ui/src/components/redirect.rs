//! Landing screen of the backend login redirect.

use chrono::Utc;
use leptos::logging::{error, log, warn};
use leptos::prelude::*;
use playlist_converter_core::{AuthCookie, BootstrapRequest, Navigation};

use crate::browser::{self, BrowserCookieStore};
use crate::components::LoadingIndicator;

/// Write the requested session cookie and pick the next page.
fn bootstrap(expected: AuthCookie) -> Navigation {
    let Some(href) = browser::current_href() else {
        error!("Cannot read the redirect URL");
        return Navigation::Home;
    };

    let request = match BootstrapRequest::from_url(&href) {
        Ok(request) => request,
        Err(e) => {
            error!("Invalid redirect URL: {}", e);
            return Navigation::Home;
        }
    };

    if let Some(name) = request.cookie_name.as_deref()
        && AuthCookie::from_cookie_name(name) != Some(expected)
    {
        warn!("{} redirect asked for cookie {}", expected, name);
    }

    match BrowserCookieStore::new() {
        Ok(store) => {
            let outcome = request.run(&store, Utc::now());
            if let Some((name, ttl)) = outcome.written {
                log!("Stored {} ({:?})", name, ttl);
            }
            outcome.navigation
        }
        Err(e) => {
            error!("Cookie store unavailable: {}", e);
            Navigation::Home
        }
    }
}

/// Runs the login bootstrap once on mount, then leaves for the root screen.
#[component]
pub fn RedirectScreen(
    /// Platform whose login just completed.
    cookie: AuthCookie,
) -> impl IntoView {
    Effect::new(move || {
        let navigation = bootstrap(cookie);
        browser::navigate(navigation.path());
    });

    view! {
        <div class="redirect-screen">
            <LoadingIndicator label=format!("Finishing {cookie} login...") size=48 />
        </div>
    }
}
