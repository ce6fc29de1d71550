//! Post-login bootstrap: turn the backend redirect into a session cookie.
//!
//! After an external login completes, the backend redirects the browser to one
//! of the redirect screens with `?setCookie=<name>&tokenTime=<epoch secs>`.
//! The screen writes `<name>=1` expiring at `tokenTime`, then goes home.

use chrono::{DateTime, Utc};
use reqwest::Url;
use tracing::{error, info, warn};

use crate::cookie::CookieTtl;
use crate::error::{Error, Result};
use crate::session::SESSION_COOKIE_VALUE;
use crate::store::SessionStore;

/// Query parameter carrying the cookie name to create.
pub const SET_COOKIE_PARAM: &str = "setCookie";

/// Query parameter carrying the absolute expiry in epoch seconds.
pub const TOKEN_TIME_PARAM: &str = "tokenTime";

/// Where the screen navigates once bootstrap has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// The root screen.
    Home,
}

impl Navigation {
    /// Path to assign to `window.location`.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
        }
    }
}

/// Minutes between `now` and an absolute expiry in epoch seconds.
///
/// Negative when the expiry is already in the past.
#[must_use]
pub fn minutes_to_live(token_time_secs: f64, now: DateTime<Utc>) -> f64 {
    let now_secs = now.timestamp_millis() as f64 / 1000.0;
    (token_time_secs - now_secs) / 60.0
}

/// Numeric value of a `tokenTime` parameter: blank is zero, text that is not
/// a number is NaN.
fn parse_token_time(value: &str) -> f64 {
    let value = value.trim();
    if value.is_empty() {
        return 0.0;
    }
    value.parse::<f64>().unwrap_or_else(|_| {
        warn!("Unparseable {} value: {}", TOKEN_TIME_PARAM, value);
        f64::NAN
    })
}

/// Parameters read from the redirect URL.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BootstrapRequest {
    /// Cookie to create, if the redirect asked for one.
    pub cookie_name: Option<String>,
    /// Absolute expiry in epoch seconds. Parsing fills it in: zero when the
    /// parameter is missing or blank, NaN when it is not a number. `None`
    /// (only for hand-built requests) means a session cookie.
    pub token_time: Option<f64>,
}

impl BootstrapRequest {
    /// Parse the full redirect URL (`window.location.href`).
    pub fn from_url(href: &str) -> Result<Self> {
        let url = Url::parse(href).map_err(|e| Error::InvalidUrl(format!("{href}: {e}")))?;
        Ok(Self::from_pairs(url.query_pairs()))
    }

    /// Parse a bare query string, with or without the leading `?`.
    pub fn from_query(query: &str) -> Result<Self> {
        let mut url = Url::parse("http://localhost/")
            .map_err(|e| Error::InvalidUrl(format!("base url: {e}")))?;
        url.set_query(Some(query.trim_start_matches('?')));
        Ok(Self::from_pairs(url.query_pairs()))
    }

    fn from_pairs<'a>(
        pairs: impl Iterator<Item = (std::borrow::Cow<'a, str>, std::borrow::Cow<'a, str>)>,
    ) -> Self {
        let mut request = Self::default();
        for (key, value) in pairs {
            match key.as_ref() {
                SET_COOKIE_PARAM if request.cookie_name.is_none() => {
                    request.cookie_name = Some(value.into_owned());
                }
                TOKEN_TIME_PARAM if request.token_time.is_none() => {
                    request.token_time = Some(parse_token_time(&value));
                }
                _ => {}
            }
        }
        // An absent expiry reads as epoch zero, so the cookie is dead on arrival.
        if request.token_time.is_none() {
            request.token_time = Some(0.0);
        }
        request
    }

    /// Lifetime of the cookie to write, relative to `now`.
    ///
    /// A non-numeric `tokenTime` (NaN) yields a session cookie. An expiry in
    /// the past, including a missing or blank `tokenTime`, yields a negative
    /// lifetime, so the cookie is dead on arrival.
    #[must_use]
    pub fn ttl(&self, now: DateTime<Utc>) -> CookieTtl {
        self.token_time.map_or(CookieTtl::Session, |token_time| {
            CookieTtl::from_minutes(minutes_to_live(token_time, now))
        })
    }

    /// Write the session cookie (when requested) and return where to go next.
    ///
    /// Runs once; a failing write is logged and navigation still happens.
    pub fn run<S: SessionStore + ?Sized>(
        &self,
        store: &S,
        now: DateTime<Utc>,
    ) -> BootstrapOutcome {
        let Some(name) = self.cookie_name.as_deref() else {
            info!("No {} parameter, skipping cookie write", SET_COOKIE_PARAM);
            return BootstrapOutcome {
                written: None,
                navigation: Navigation::Home,
            };
        };

        let ttl = self.ttl(now);
        if let CookieTtl::Minutes(minutes) = ttl
            && minutes < 0.0
        {
            warn!("Cookie {} expires {:.1} minutes in the past", name, -minutes);
        }

        let written = match store.set(name, SESSION_COOKIE_VALUE, ttl) {
            Ok(()) => {
                info!("Session cookie {} written ({:?})", name, ttl);
                Some((name.to_string(), ttl))
            }
            Err(e) => {
                error!("Failed to write session cookie {}: {}", name, e);
                None
            }
        };

        BootstrapOutcome {
            written,
            navigation: Navigation::Home,
        }
    }
}

/// Result of running a bootstrap.
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapOutcome {
    /// The cookie written and its lifetime, if any.
    pub written: Option<(String, CookieTtl)>,
    /// Where to navigate next.
    pub navigation: Navigation,
}
