//! Root screen: login state, conversion menu and result viewer.

use gloo_timers::callback::Interval;
use gloo_timers::future::TimeoutFuture;
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use playlist_converter_core::{
    ClientConfig, ConversionResult, Platform, SessionStatus, Theme,
};

use crate::browser;
use crate::components::{ConversionForm, ConversionView, LoginPanel};

/// How long the "New!" badge stays up after a result arrives.
pub const NEW_BADGE_MS: u32 = 5_000;

/// Which half of the root screen is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HomeView {
    /// Platform buttons and the conversion form.
    #[default]
    Menu,
    /// Latest conversion result.
    Conversions,
}

/// What the root screen shows below the view toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HomeBody {
    Conversions,
    Login,
    Menu,
}

impl HomeBody {
    /// The result viewer is reachable without a session; the menu is not.
    const fn select(view: HomeView, logged_in: bool) -> Self {
        match (view, logged_in) {
            (HomeView::Conversions, _) => Self::Conversions,
            (HomeView::Menu, false) => Self::Login,
            (HomeView::Menu, true) => Self::Menu,
        }
    }
}

fn refresh_status(status: RwSignal<SessionStatus>) {
    let next = browser::current_session_status();
    if status.get_untracked() != next {
        log!("Session status changed: {:?}", next);
        status.set(next);
    }
}

/// The root screen.
#[component]
pub fn HomeScreen(
    /// Active theme.
    theme: ReadSignal<Theme>,
    /// Theme setter.
    set_theme: WriteSignal<Theme>,
) -> impl IntoView {
    let config = use_context::<ClientConfig>().unwrap_or_default();

    let status = RwSignal::new(browser::current_session_status());
    let (view_mode, set_view_mode) = signal(HomeView::default());
    let (platform, set_platform) = signal::<Option<Platform>>(None);
    let (conversion, set_conversion) = signal::<Option<ConversionResult>>(None);
    let new_badge = RwSignal::new(None::<u32>);
    let badge_generation = StoredValue::new(0_u32);

    // Session polling, stopped when the screen unmounts.
    let poll_ms = u32::try_from(config.poll_interval_ms).unwrap_or(u32::MAX);
    let poller = StoredValue::new_local(Some(Interval::new(poll_ms, move || {
        refresh_status(status);
    })));
    on_cleanup(move || {
        poller.try_update_value(Option::take);
    });

    let on_result = Callback::new(move |result: ConversionResult| {
        set_conversion.set(Some(result));
        badge_generation.update_value(|g| *g = g.wrapping_add(1));
        let id = badge_generation.get_value();
        new_badge.set(Some(id));
        spawn_local(async move {
            TimeoutFuture::new(NEW_BADGE_MS).await;
            if new_badge.get_untracked() == Some(id) {
                new_badge.set(None);
            }
        });
    });

    let on_network_error = Callback::new(move |()| {
        refresh_status(status);
        if browser::is_tauri_available() {
            browser::reload();
        }
    });

    // A different platform remounts the form, which starts over empty.
    let select_platform = move |p: Platform| {
        if platform.get_untracked() != Some(p) {
            log!("Switched conversion to {}", p);
            set_platform.set(Some(p));
        }
    };

    view! {
        <div class="app">
            <header class="app-header">
                <h1 class="app-title">"Playlist Converter"</h1>
                <button
                    class="button theme-toggle"
                    on:click=move |_| set_theme.update(|t| *t = t.toggled())
                >
                    {move || theme.get().toggle_label()}
                </button>
            </header>

            <nav class="view-toggle">
                <button
                    class="button"
                    class:active=move || view_mode.get() == HomeView::Menu
                    on:click=move |_| set_view_mode.set(HomeView::Menu)
                >
                    "Menu"
                </button>
                <button
                    class="button"
                    class:active=move || view_mode.get() == HomeView::Conversions
                    on:click=move |_| set_view_mode.set(HomeView::Conversions)
                >
                    "View Conversions"
                    <Show when=move || new_badge.get().is_some()>
                        <span class="badge">"New!"</span>
                    </Show>
                </button>
            </nav>

            {move || match HomeBody::select(view_mode.get(), status.get().logged_in()) {
                HomeBody::Conversions => {
                    view! { <ConversionView data=conversion /> }.into_any()
                }
                HomeBody::Login => {
                    view! {
                        <LoginPanel status=status />
                        <p class="hint">
                            "Log in to both Spotify and YouTube to start converting."
                        </p>
                    }
                        .into_any()
                }
                HomeBody::Menu => {
                    view! {
                        <div class="menu">
                            <div class="platform-buttons">
                                {Platform::ALL
                                    .into_iter()
                                    .map(|p| {
                                        view! {
                                            <button
                                                class="button"
                                                class:active=move || platform.get() == Some(p)
                                                on:click=move |_| select_platform(p)
                                            >
                                                {p.action_label()}
                                            </button>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                            {move || {
                                platform
                                    .get()
                                    .map(|p| {
                                        view! {
                                            <ConversionForm
                                                platform=p
                                                on_result=on_result
                                                on_network_error=on_network_error
                                            />
                                        }
                                    })
                            }}
                        </div>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}
