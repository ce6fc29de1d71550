//! Background session status polling for native targets.
//!
//! Library-only API: nothing in this workspace starts it. The browser build
//! drives [`SessionStatus::check`] from a `gloo-timers` interval owned by the
//! root screen; this watcher is the tokio equivalent for native embedders
//! (a desktop shell or a CLI) that hold a [`SessionStore`].

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

use crate::session::SessionStatus;
use crate::store::SessionStore;

/// Default polling interval for session checks (2 seconds).
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Events emitted by a running [`SessionWatcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Initial status when the watcher starts.
    Refreshed(SessionStatus),
    /// The status differs from the previous tick.
    Changed {
        /// Status before this tick.
        previous: SessionStatus,
        /// Status after this tick.
        current: SessionStatus,
    },
}

impl SessionEvent {
    /// The status carried by this event.
    #[must_use]
    pub const fn status(&self) -> SessionStatus {
        match self {
            Self::Refreshed(status) | Self::Changed { current: status, .. } => *status,
        }
    }
}

/// Handle for controlling a running session watcher.
///
/// Dropping the handle cancels the polling task.
#[derive(Debug)]
pub struct SessionWatcherHandle {
    shutdown_tx: mpsc::Sender<()>,
    task: JoinHandle<()>,
}

impl SessionWatcherHandle {
    /// Stop the session watcher.
    pub async fn stop(&self) {
        let _ = self.shutdown_tx.send(()).await;
    }

    /// Whether the polling task has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for SessionWatcherHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Session watcher that re-reads the session cookies on a fixed interval.
pub struct SessionWatcher<S> {
    /// The store the cookies are read from.
    store: S,
    /// Polling interval for checking session changes.
    poll_interval: Duration,
}

impl<S> SessionWatcher<S>
where
    S: SessionStore + Send + Sync + 'static,
{
    /// Create a new session watcher with the default polling interval.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self {
            store,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Create a new session watcher with a custom polling interval.
    #[must_use]
    pub const fn with_interval(store: S, poll_interval: Duration) -> Self {
        Self {
            store,
            poll_interval,
        }
    }

    /// Start watching for session changes.
    ///
    /// Returns a channel receiver for session events and a handle to stop the
    /// watcher. The receiver closes once the watcher stops.
    #[must_use]
    pub fn start(self) -> (mpsc::Receiver<SessionEvent>, SessionWatcherHandle) {
        let (event_tx, event_rx) = mpsc::channel::<SessionEvent>(16);
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        let store = self.store;
        let poll_interval = self.poll_interval;

        let task = tokio::spawn(async move {
            let mut interval_timer = interval(poll_interval);
            interval_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; the initial check covers it.
            interval_timer.tick().await;

            let mut last = SessionStatus::check(&store);
            if event_tx.send(SessionEvent::Refreshed(last)).await.is_err() {
                return;
            }

            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => {
                        debug!("Session watcher shutting down");
                        break;
                    }
                    _ = interval_timer.tick() => {
                        let current = SessionStatus::check(&store);
                        if current == last {
                            continue;
                        }
                        info!(
                            "Session changed: spotify={} youtube={}",
                            current.spotify, current.youtube
                        );
                        let event = SessionEvent::Changed { previous: last, current };
                        last = current;
                        if event_tx.send(event).await.is_err() {
                            debug!("Session event receiver dropped, stopping watcher");
                            break;
                        }
                    }
                }
            }
        });

        (event_rx, SessionWatcherHandle { shutdown_tx, task })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::cookie::CookieTtl;
    use crate::session::AuthCookie;
    use crate::store::MemoryCookieJar;

    #[tokio::test(start_paused = true)]
    async fn test_watcher_emits_initial_refresh() {
        let jar = Arc::new(MemoryCookieJar::new());
        let (mut rx, _handle) = SessionWatcher::new(Arc::clone(&jar)).start();

        let event = rx.recv().await.unwrap();
        assert_eq!(event, SessionEvent::Refreshed(SessionStatus::default()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_watcher_detects_login() {
        let jar = Arc::new(MemoryCookieJar::new());
        let (mut rx, _handle) = SessionWatcher::new(Arc::clone(&jar)).start();
        let _ = rx.recv().await.unwrap();

        for cookie in AuthCookie::ALL {
            jar.set(cookie.cookie_name(), "1", CookieTtl::Session).unwrap();
        }

        let event = rx.recv().await.unwrap();
        match event {
            SessionEvent::Changed { previous, current } => {
                assert!(!previous.logged_in());
                assert!(current.logged_in());
            }
            SessionEvent::Refreshed(_) => panic!("expected a change event"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_watcher_detects_logout() {
        let jar = Arc::new(MemoryCookieJar::new());
        jar.set("playeRCookieSF", "1", CookieTtl::Session).unwrap();
        let (mut rx, _handle) =
            SessionWatcher::with_interval(Arc::clone(&jar), Duration::from_millis(500)).start();
        assert!(rx.recv().await.unwrap().status().spotify);

        jar.delete("playeRCookieSF").unwrap();
        let event = rx.recv().await.unwrap();
        assert!(!event.status().spotify);
    }

    #[tokio::test(start_paused = true)]
    async fn test_watcher_stop_closes_channel() {
        let jar = Arc::new(MemoryCookieJar::new());
        let (mut rx, handle) = SessionWatcher::new(jar).start();
        let _ = rx.recv().await.unwrap();

        handle.stop().await;
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_watcher_drop_handle_cancels() {
        let jar = Arc::new(MemoryCookieJar::new());
        let (mut rx, handle) = SessionWatcher::new(jar).start();
        let _ = rx.recv().await.unwrap();

        drop(handle);
        assert!(rx.recv().await.is_none());
    }
}
