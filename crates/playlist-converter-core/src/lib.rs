//! `Playlist Converter` Core Library
//!
//! This crate provides the platform-independent logic of the Playlist
//! Converter front end:
//! - Cookie codec and the [`SessionStore`] abstraction over the cookie jar
//! - Session status derived from the two platform cookies, plus a cancelable
//!   background watcher on native targets
//! - The post-login bootstrap that turns a backend redirect into a cookie
//! - The step-by-step conversion wizard
//! - The HTTP client for the two conversion endpoints
//! - The conversion result model and its table view
//! - Client configuration
//!
//! # Error Handling
//!
//! Fallible setup operations return [`Result`] with the crate [`Error`].
//! Wizard validation and conversion failures have their own enums,
//! [`WizardError`] and [`ConversionError`].
//!
//! ```rust,ignore
//! use playlist_converter_core::{ConversionWizard, Mode, Platform};
//!
//! let mut wizard = ConversionWizard::new(Platform::Spotify);
//! wizard.choose_mode(Mode::Update)?;
//! ```

pub mod bootstrap;
pub mod client;
pub mod config;
pub mod cookie;
pub mod error;
pub mod result;
pub mod session;
pub mod store;
#[cfg(not(target_arch = "wasm32"))]
pub mod watcher;
pub mod wizard;

pub use bootstrap::{
    BootstrapOutcome, BootstrapRequest, Navigation, SET_COOKIE_PARAM, TOKEN_TIME_PARAM,
    minutes_to_live,
};
pub use client::{
    ConversionClient, ConversionError, ConversionRequest, DEFAULT_BASE_URL, ErrorKind,
    HttpResponse, HttpTransport, ReqwestTransport, TransportError,
};
pub use config::{ClientConfig, DEFAULT_POLL_INTERVAL_MS, Theme};
pub use cookie::{Clock, CookieTtl, ManualClock, SystemClock, find_cookie};
pub use error::{Error, Result};
pub use result::{ConversionResult, ResultSummary, ResultTab, TrackEntry, TrackRow};
pub use session::{AuthCookie, SESSION_COOKIE_VALUE, SessionStatus};
pub use store::{MemoryCookieJar, SessionStore};
#[cfg(not(target_arch = "wasm32"))]
pub use watcher::{DEFAULT_POLL_INTERVAL, SessionEvent, SessionWatcher, SessionWatcherHandle};
pub use wizard::{
    Advance, ConversionWizard, FieldDescriptor, FieldKind, FormState, Mode, NEXT_LABEL,
    PREVIOUS_LABEL, Platform, SELECT_OPTIONS, SUBMIT_LABEL, SelectOption, WizardError,
    WizardState, fields_for,
};
