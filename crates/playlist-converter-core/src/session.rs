//! Authentication status derived from the two session cookies.
//!
//! The backend sets no secret on the client: each cookie is a liveness flag
//! whose presence means "authenticated against that platform".

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::store::SessionStore;

/// Value written into a session cookie once a login completes.
pub const SESSION_COOKIE_VALUE: &str = "1";

/// The two session cookies shared with the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthCookie {
    /// Authenticated against Spotify.
    Spotify,
    /// Authenticated against YouTube.
    YouTube,
}

impl AuthCookie {
    /// Both cookies, Spotify first.
    pub const ALL: [Self; 2] = [Self::Spotify, Self::YouTube];

    /// Cookie name as set by the backend redirect.
    #[must_use]
    pub const fn cookie_name(self) -> &'static str {
        match self {
            Self::Spotify => "playeRCookieSF",
            Self::YouTube => "playeRCookieYT",
        }
    }

    /// Look up the cookie for a name, if it is one of ours.
    #[must_use]
    pub fn from_cookie_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.cookie_name() == name)
    }

    /// Button label for the login button, depending on status.
    #[must_use]
    pub const fn status_label(self, logged_in: bool) -> &'static str {
        match (self, logged_in) {
            (Self::Spotify, true) => "Logged In On Spotify!",
            (Self::Spotify, false) => "Login to Spotify",
            (Self::YouTube, true) => "Logged In On Youtube!",
            (Self::YouTube, false) => "Login to Youtube",
        }
    }
}

impl std::fmt::Display for AuthCookie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Spotify => write!(f, "Spotify"),
            Self::YouTube => write!(f, "YouTube"),
        }
    }
}

/// Snapshot of both authentication flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatus {
    /// Spotify cookie present and live.
    pub spotify: bool,
    /// YouTube cookie present and live.
    pub youtube: bool,
}

impl SessionStatus {
    /// Read both cookies from `store`.
    ///
    /// A failing lookup is logged and counts as "not logged in".
    pub fn check<S: SessionStore + ?Sized>(store: &S) -> Self {
        Self {
            spotify: is_authenticated(store, AuthCookie::Spotify),
            youtube: is_authenticated(store, AuthCookie::YouTube),
        }
    }

    /// Logged in on both platforms.
    #[must_use]
    pub const fn logged_in(self) -> bool {
        self.spotify && self.youtube
    }

    /// Flag for a single platform.
    #[must_use]
    pub const fn is_authenticated(self, cookie: AuthCookie) -> bool {
        match cookie {
            AuthCookie::Spotify => self.spotify,
            AuthCookie::YouTube => self.youtube,
        }
    }

    /// Login button label for a platform.
    #[must_use]
    pub const fn label(self, cookie: AuthCookie) -> &'static str {
        cookie.status_label(self.is_authenticated(cookie))
    }
}

fn is_authenticated<S: SessionStore + ?Sized>(store: &S, cookie: AuthCookie) -> bool {
    match store.get(cookie.cookie_name()) {
        Ok(value) => value.is_some_and(|v| !v.is_empty()),
        Err(e) => {
            error!("Error checking login for {}: {}", cookie, e);
            false
        }
    }
}
