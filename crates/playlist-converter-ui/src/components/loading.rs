//! Loading indicators shown while a conversion is in flight or the login
//! redirect is being processed.

use leptos::prelude::*;

/// A spinning loading indicator.
///
/// Customizable size via the `size` prop (in pixels).
#[component]
pub fn Spinner(
    /// Size of the spinner in pixels.
    #[prop(default = 16)]
    size: u32,
) -> impl IntoView {
    let style = format!("width: {size}px; height: {size}px;");

    view! {
        <div class="spinner" style=style></div>
    }
}

/// A spinner with an optional label below it.
#[component]
pub fn LoadingIndicator(
    /// Optional label to display below the spinner.
    #[prop(optional, into)]
    label: Option<String>,
    /// Size of the spinner in pixels.
    #[prop(default = 24)]
    size: u32,
) -> impl IntoView {
    view! {
        <div class="loading-indicator">
            <Spinner size=size />
            {label.map(|text| {
                view! {
                    <span class="loading-indicator-label">{text}</span>
                }
            })}
        </div>
    }
}

/// Full-screen mask that blocks interaction while `visible` is true.
#[component]
pub fn LoadingOverlay(
    /// Whether the overlay is visible.
    #[prop(into)]
    visible: Signal<bool>,
    /// Optional label to display.
    #[prop(optional, into)]
    label: Option<String>,
) -> impl IntoView {
    view! {
        <div class="loading-overlay" class:visible=move || visible.get()>
            {if let Some(text) = label {
                view! { <LoadingIndicator label=text size=48 /> }.into_any()
            } else {
                view! { <LoadingIndicator size=48 /> }.into_any()
            }}
        </div>
    }
}
