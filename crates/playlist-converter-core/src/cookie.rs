//! Cookie string codec.
//!
//! Builds and scans the `name=value; expires=...; path=/` strings that a
//! browser cookie jar accepts on assignment and returns on read. The same
//! codec is used by the browser store and by [`MemoryCookieJar`](crate::MemoryCookieJar)
//! so both agree on what a session cookie looks like.

use std::sync::Mutex;

use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};

/// Path attribute attached to every cookie written by the application.
pub const COOKIE_PATH: &str = "/";

/// Expiry date used to make the browser drop a cookie.
pub const EPOCH_EXPIRY: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

/// IMF-fixdate format used for the `expires` attribute.
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// How long a written cookie should live.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CookieTtl {
    /// No `expires` attribute; the browser drops it when the session ends.
    Session,
    /// Expires this many minutes from now. Negative values yield a cookie
    /// that is already expired when written.
    Minutes(f64),
}

impl CookieTtl {
    /// Build a TTL from a minute count. Zero and NaN mean "session cookie".
    #[must_use]
    pub fn from_minutes(minutes: f64) -> Self {
        if minutes == 0.0 || minutes.is_nan() {
            Self::Session
        } else {
            Self::Minutes(minutes)
        }
    }

    /// Absolute expiry instant relative to `now`, or `None` for session cookies.
    #[must_use]
    pub fn expires_at(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Self::Session => None,
            Self::Minutes(minutes) => {
                let millis = (minutes * 60_000.0) as i64;
                let shifted = TimeDelta::try_milliseconds(millis)
                    .and_then(|delta| now.checked_add_signed(delta));
                Some(shifted.unwrap_or(if millis.is_negative() {
                    DateTime::<Utc>::default()
                } else {
                    DateTime::<Utc>::MAX_UTC
                }))
            }
        }
    }
}

/// Source of the current time, injectable for tests.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock (`Utc::now`, backed by `Date.now()` in the browser).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Create a clock frozen at `now`.
    #[must_use]
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Move the clock forward (or backward for negative deltas).
    pub fn advance(&self, delta: TimeDelta) {
        if let Ok(mut now) = self.now.lock() {
            *now += delta;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.lock().map_or_else(|_| Utc::now(), |now| *now)
    }
}

/// Format an instant as a cookie `expires` value.
#[must_use]
pub fn format_expiry(at: DateTime<Utc>) -> String {
    at.format(HTTP_DATE_FORMAT).to_string()
}

/// Parse a cookie `expires` value produced by [`format_expiry`].
#[must_use]
pub fn parse_expiry(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value.trim(), HTTP_DATE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Build the assignment string that writes `name=value` with the given TTL.
#[must_use]
pub fn set_cookie_header(name: &str, value: &str, ttl: CookieTtl, now: DateTime<Utc>) -> String {
    match ttl.expires_at(now) {
        Some(at) => format!(
            "{name}={value}; expires={}; path={COOKIE_PATH}",
            format_expiry(at)
        ),
        None => format!("{name}={value}; path={COOKIE_PATH}"),
    }
}

/// Build the assignment string that makes the browser drop `name`.
#[must_use]
pub fn delete_cookie_header(name: &str) -> String {
    format!("{name}=; expires={EPOCH_EXPIRY}; path={COOKIE_PATH};")
}

/// Find the value of `name` in a `;`-delimited cookie string.
///
/// Returns the raw remainder of the first entry that starts with `name=`.
#[must_use]
pub fn find_cookie<'a>(cookies: &'a str, name: &str) -> Option<&'a str> {
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|entry| entry.strip_prefix(name)?.strip_prefix('='))
}

/// A cookie assignment split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieAssignment {
    /// Cookie name.
    pub name: String,
    /// Cookie value.
    pub value: String,
    /// Parsed `expires` attribute, if any.
    pub expires: Option<DateTime<Utc>>,
}

impl CookieAssignment {
    /// Parse an assignment such as `a=1; expires=...; path=/`.
    ///
    /// Returns `None` when the first segment has no `=`.
    #[must_use]
    pub fn parse(assignment: &str) -> Option<Self> {
        let mut segments = assignment.split(';');
        let (name, value) = segments.next()?.trim().split_once('=')?;
        let expires = segments
            .filter_map(|attr| attr.trim().split_once('='))
            .find(|(key, _)| key.eq_ignore_ascii_case("expires"))
            .and_then(|(_, value)| parse_expiry(value));

        Some(Self {
            name: name.trim().to_string(),
            value: value.trim().to_string(),
            expires,
        })
    }

    /// Whether the cookie is already expired at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires.is_some_and(|at| at <= now)
    }
}
