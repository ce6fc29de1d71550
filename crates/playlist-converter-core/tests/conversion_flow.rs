//! End-to-end tests: login bootstrap, session status, wizard submission and
//! result rendering against a recording transport.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::cell::RefCell;
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use playlist_converter_core::{
    Advance, AuthCookie, BootstrapRequest, ConversionClient, ConversionError, ConversionWizard,
    HttpResponse, HttpTransport, ManualClock, MemoryCookieJar, Mode, Navigation, Platform,
    SessionStatus, SessionStore, TransportError, WizardState,
};
use reqwest::Url;

const BACKEND: &str = "https://backend.example";

struct RecordingTransport {
    responses: RefCell<Vec<Result<HttpResponse, TransportError>>>,
    requests: RefCell<Vec<Url>>,
}

impl RecordingTransport {
    fn replying(response: Result<HttpResponse, TransportError>) -> Self {
        Self {
            responses: RefCell::new(vec![response]),
            requests: RefCell::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<Url> {
        self.requests.borrow().clone()
    }
}

impl HttpTransport for RecordingTransport {
    async fn get(&self, url: Url) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push(url);
        self.responses
            .borrow_mut()
            .pop()
            .unwrap_or_else(|| Err(TransportError::Other("no scripted response".to_string())))
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn now() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

fn query(url: &Url) -> Vec<(String, String)> {
    url.query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

#[test]
fn test_bootstrap_then_status() {
    init_tracing();
    let jar = Arc::new(MemoryCookieJar::with_clock(ManualClock::new(now())));

    for (page, cookie) in [
        ("redirectSpotifyLogin", AuthCookie::Spotify),
        ("redirectYoutubeLogin", AuthCookie::YouTube),
    ] {
        let href = format!(
            "https://app.example/{page}?setCookie={}&tokenTime={}",
            cookie.cookie_name(),
            now().timestamp() + 600
        );
        let outcome = BootstrapRequest::from_url(&href).unwrap().run(&jar, now());
        assert_eq!(outcome.navigation, Navigation::Home);
    }

    assert!(SessionStatus::check(&jar).logged_in());

    // Both cookies were written with a ten minute lifetime.
    jar.clock().advance(TimeDelta::minutes(10));
    assert_eq!(SessionStatus::check(&jar), SessionStatus::default());
}

#[test]
fn test_lookup_with_unrelated_cookies() {
    let jar = MemoryCookieJar::with_clock(ManualClock::new(now()));
    jar.assign("theme=dark; path=/").unwrap();
    assert_eq!(jar.get("playeRCookieYT").unwrap(), None);

    jar.assign("playeRCookieYT=1; path=/").unwrap();
    jar.assign("lang=en; path=/").unwrap();
    assert_eq!(jar.get("playeRCookieYT").unwrap().as_deref(), Some("1"));
}

#[tokio::test]
async fn test_create_spotify_conversion_end_to_end() {
    init_tracing();
    let transport = RecordingTransport::replying(Ok(HttpResponse {
        status: 200,
        body: r#"{
            "result": {"status": "ok", "message": "done"},
            "Tracks Deleted": [{"track": "A", "artist": "B"}],
            "New Tracks Detected": []
        }"#
        .to_string(),
    }));
    let client = ConversionClient::with_transport(transport, BACKEND);

    let mut wizard = ConversionWizard::new(Platform::Spotify);
    wizard.choose_mode(Mode::Create).unwrap();
    let mut submitted = None;
    for (label, value) in [
        ("Spotify Playlist Link", "abc"),
        ("Name of New Playlist", "Mix"),
        ("Collaborative", "Public"),
        ("Description Of The Playlist", "test"),
        ("Make Your Playlist Available To The Public", "Public"),
    ] {
        assert_eq!(wizard.current_field().unwrap().label, label);
        wizard.set_value(value).unwrap();
        if let Advance::Submit(request) = wizard.next().unwrap() {
            submitted = Some(request);
        }
    }

    let request = submitted.expect("last step submits");
    assert!(matches!(wizard.state(), WizardState::Submitting { .. }));

    let result = client.convert(&request).await.unwrap();
    wizard.finish_submission().unwrap();
    assert!(matches!(wizard.state(), WizardState::Editing { step: 4 }));

    let requests = client.transport().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path(), "/player/convertSpotifyToYoutube");
    assert_eq!(
        query(&requests[0]),
        vec![
            ("param".to_string(), "abc".to_string()),
            ("name".to_string(), "Mix".to_string()),
            ("collaborative".to_string(), "Public".to_string()),
            ("description".to_string(), "test".to_string()),
        ]
    );

    let rows = result.table_rows();
    assert_eq!(rows.iter().filter(|r| r.deleted_label() == "Yes").count(), 1);
    assert_eq!(rows.iter().filter(|r| r.deleted_label() == "No").count(), 0);
}

#[tokio::test]
async fn test_update_youtube_conversion_hits_youtube_endpoint() {
    init_tracing();
    let transport = RecordingTransport::replying(Ok(HttpResponse {
        status: 200,
        body: r#"{"result": {"status": "ok", "message": "synced"}}"#.to_string(),
    }));
    let client = ConversionClient::with_transport(transport, BACKEND);

    let mut wizard = ConversionWizard::new(Platform::YouTube);
    wizard.choose_mode(Mode::Update).unwrap();
    wizard.set_value("yt").unwrap();
    wizard.next().unwrap();
    wizard.set_value("sp").unwrap();
    let Advance::Submit(request) = wizard.next().unwrap() else {
        panic!("expected submission");
    };

    let result = client.convert(&request).await.unwrap();
    assert_eq!(result.result.message, "synced");

    let requests = client.transport().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path(), "/player/convertYoutubeToSpotify");
    assert_eq!(
        query(&requests[0]),
        vec![
            ("param".to_string(), "yt".to_string()),
            ("existing_param".to_string(), "sp".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_failed_submission_returns_to_final_step_unchanged() {
    init_tracing();
    let transport = RecordingTransport::replying(Err(TransportError::Network(
        "Network Error".to_string(),
    )));
    let client = ConversionClient::with_transport(transport, BACKEND);

    let mut wizard = ConversionWizard::new(Platform::YouTube);
    wizard.choose_mode(Mode::Update).unwrap();
    wizard.set_value("yt").unwrap();
    wizard.next().unwrap();
    wizard.set_value("sp").unwrap();
    let Advance::Submit(request) = wizard.next().unwrap() else {
        panic!("expected submission");
    };
    let form_before = wizard.form().clone();

    let err = client.convert(&request).await.unwrap_err();
    assert!(matches!(err, ConversionError::Network(_)));
    assert!(err.requires_session_recheck());

    wizard.finish_submission().unwrap();
    assert_eq!(wizard.state(), WizardState::Editing { step: 1 });
    assert_eq!(wizard.form(), &form_before);
    assert_eq!(client.transport().requests().len(), 1);
}
