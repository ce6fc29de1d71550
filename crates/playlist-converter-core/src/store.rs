//! Session store abstraction over a named key-value cookie jar.
//!
//! Every consumer receives a [`SessionStore`] instead of touching the browser
//! cookie jar directly, so the poller, the bootstrap flow and the tests can run
//! against [`MemoryCookieJar`].

use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::cookie::{
    Clock, CookieAssignment, CookieTtl, SystemClock, delete_cookie_header, find_cookie,
    set_cookie_header,
};
use crate::error::{Error, Result};

/// Named key-value capability backing session status.
/// This trait allows for mocking in tests.
#[cfg_attr(test, mockall::automock)]
pub trait SessionStore {
    /// Read the raw value of `name`, or `None` when it is not set.
    fn get(&self, name: &str) -> Result<Option<String>>;

    /// Write `name=value` with the given lifetime.
    fn set(&self, name: &str, value: &str, ttl: CookieTtl) -> Result<()>;

    /// Remove `name` by overwriting it with an expired date.
    fn delete(&self, name: &str) -> Result<()>;
}

impl<S: SessionStore + ?Sized> SessionStore for Arc<S> {
    fn get(&self, name: &str) -> Result<Option<String>> {
        (**self).get(name)
    }

    fn set(&self, name: &str, value: &str, ttl: CookieTtl) -> Result<()> {
        (**self).set(name, value, ttl)
    }

    fn delete(&self, name: &str) -> Result<()> {
        (**self).delete(name)
    }
}

#[derive(Debug, Clone)]
struct StoredCookie {
    name: String,
    value: String,
    expires: Option<chrono::DateTime<chrono::Utc>>,
}

/// In-memory cookie jar with browser semantics.
///
/// Writes go through the same assignment strings a browser receives, expired
/// cookies vanish from reads, and an assignment that is already expired drops
/// any existing entry of that name.
#[derive(Debug)]
pub struct MemoryCookieJar<C: Clock = SystemClock> {
    entries: Mutex<Vec<StoredCookie>>,
    clock: C,
}

impl MemoryCookieJar<SystemClock> {
    /// Create an empty jar using the wall clock.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for MemoryCookieJar<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> MemoryCookieJar<C> {
    /// Create an empty jar driven by `clock`.
    #[must_use]
    pub const fn with_clock(clock: C) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            clock,
        }
    }

    /// The clock driving expiry checks.
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Apply a raw assignment string, as `document.cookie = ...` would.
    pub fn assign(&self, assignment: &str) -> Result<()> {
        let Some(parsed) = CookieAssignment::parse(assignment) else {
            debug!("Ignoring malformed cookie assignment: {}", assignment);
            return Ok(());
        };
        let now = self.clock.now();
        let mut entries = self.lock()?;
        entries.retain(|c| c.name != parsed.name);
        if parsed.is_expired_at(now) {
            debug!("Cookie {} written already expired, dropped", parsed.name);
            return Ok(());
        }
        entries.push(StoredCookie {
            name: parsed.name,
            value: parsed.value,
            expires: parsed.expires,
        });
        Ok(())
    }

    /// Render the live cookies as `a=1; b=2`, as `document.cookie` reads.
    pub fn cookie_string(&self) -> Result<String> {
        let now = self.clock.now();
        let entries = self.lock()?;
        Ok(entries
            .iter()
            .filter(|c| c.expires.is_none_or(|at| at > now))
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; "))
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<StoredCookie>>> {
        self.entries
            .lock()
            .map_err(|_| Error::CookieAccess("cookie jar lock poisoned".to_string()))
    }
}

impl<C: Clock> SessionStore for MemoryCookieJar<C> {
    fn get(&self, name: &str) -> Result<Option<String>> {
        let cookies = self.cookie_string()?;
        Ok(find_cookie(&cookies, name).map(str::to_string))
    }

    fn set(&self, name: &str, value: &str, ttl: CookieTtl) -> Result<()> {
        self.assign(&set_cookie_header(name, value, ttl, self.clock.now()))
    }

    fn delete(&self, name: &str) -> Result<()> {
        self.assign(&delete_cookie_header(name))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use chrono::{DateTime, TimeDelta};

    use super::*;
    use crate::cookie::ManualClock;

    fn jar() -> MemoryCookieJar<ManualClock> {
        MemoryCookieJar::with_clock(ManualClock::new(
            DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        ))
    }

    #[test]
    fn test_get_missing_returns_none() {
        let jar = jar();
        assert_eq!(jar.get("playeRCookieYT").unwrap(), None);
    }

    #[test]
    fn test_get_with_unrelated_cookies() {
        let jar = jar();
        jar.set("theme", "dark", CookieTtl::Session).unwrap();
        jar.set("playeRCookieYT", "1", CookieTtl::Minutes(10.0))
            .unwrap();
        jar.set("other", "x", CookieTtl::Session).unwrap();

        assert_eq!(jar.get("playeRCookieYT").unwrap().as_deref(), Some("1"));
        assert_eq!(jar.get("playeRCookieSF").unwrap(), None);
    }

    #[test]
    fn test_overwrite_keeps_single_entry() {
        let jar = jar();
        jar.set("a", "1", CookieTtl::Session).unwrap();
        jar.set("a", "2", CookieTtl::Session).unwrap();
        assert_eq!(jar.cookie_string().unwrap(), "a=2");
    }

    #[test]
    fn test_cookie_expires_with_clock() {
        let jar = jar();
        jar.set("playeRCookieSF", "1", CookieTtl::Minutes(10.0))
            .unwrap();
        jar.clock().advance(TimeDelta::minutes(9));
        assert!(jar.get("playeRCookieSF").unwrap().is_some());
        jar.clock().advance(TimeDelta::minutes(1));
        assert!(jar.get("playeRCookieSF").unwrap().is_none());
    }

    #[test]
    fn test_negative_ttl_is_expired_immediately() {
        let jar = jar();
        jar.set("playeRCookieSF", "1", CookieTtl::Minutes(5.0))
            .unwrap();
        jar.set("playeRCookieSF", "1", CookieTtl::Minutes(-5.0))
            .unwrap();
        assert_eq!(jar.get("playeRCookieSF").unwrap(), None);
    }

    #[test]
    fn test_session_cookie_never_expires() {
        let jar = jar();
        jar.set("a", "1", CookieTtl::Session).unwrap();
        jar.clock().advance(TimeDelta::days(365));
        assert_eq!(jar.get("a").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn test_delete_drops_cookie() {
        let jar = jar();
        jar.set("playeRCookieYT", "1", CookieTtl::Session).unwrap();
        jar.delete("playeRCookieYT").unwrap();
        assert_eq!(jar.get("playeRCookieYT").unwrap(), None);
    }

    #[test]
    fn test_malformed_assignment_is_ignored() {
        let jar = jar();
        jar.assign("garbage").unwrap();
        assert_eq!(jar.cookie_string().unwrap(), "");
    }

    #[test]
    fn test_arc_store_delegates() {
        let jar = Arc::new(jar());
        SessionStore::set(&jar, "a", "1", CookieTtl::Session).unwrap();
        assert_eq!(SessionStore::get(&jar, "a").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn test_mock_store_get() {
        let mut mock = MockSessionStore::new();
        mock.expect_get()
            .withf(|name| name == "playeRCookieYT")
            .returning(|_| Ok(Some("1".to_string())));

        assert_eq!(mock.get("playeRCookieYT").unwrap().as_deref(), Some("1"));
    }
}
