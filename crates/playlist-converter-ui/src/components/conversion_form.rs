//! Step-by-step conversion form.
//!
//! Renders one field of the [`ConversionWizard`] at a time, validates on
//! "Next" and sends the request on the last step.

use leptos::logging::{error, log, warn};
use leptos::prelude::*;
use leptos::task::spawn_local;
use playlist_converter_core::{
    Advance, ClientConfig, ConversionClient, ConversionError, ConversionRequest,
    ConversionResult, ConversionWizard, ErrorKind, FieldDescriptor, FieldKind, Mode,
    PREVIOUS_LABEL, Platform, ReqwestTransport, SELECT_OPTIONS,
};

use crate::browser;
use crate::components::LoadingOverlay;

fn set_field(wizard: RwSignal<ConversionWizard>, value: String) {
    wizard.update(|w| {
        if let Err(e) = w.set_value(value) {
            warn!("Ignoring input: {}", e);
        }
    });
}

fn choose_mode(wizard: RwSignal<ConversionWizard>, mode: Mode) {
    wizard.update(|w| {
        if let Err(e) = w.choose_mode(mode) {
            warn!("Cannot change mode: {}", e);
        }
    });
}

fn report_failure(err: &ConversionError, on_network_error: Callback<()>) {
    match err.kind() {
        ErrorKind::Server => error!("Server Error: {}", err),
        ErrorKind::Network => {
            error!("Network Error or No Response Received: {}", err);
            on_network_error.run(());
        }
        ErrorKind::Unexpected => error!("Unexpected Error: {}", err),
    }
}

fn submit(
    request: ConversionRequest,
    api_base_url: String,
    wizard: RwSignal<ConversionWizard>,
    on_result: Callback<ConversionResult>,
    on_network_error: Callback<()>,
) {
    spawn_local(async move {
        let client = ConversionClient::with_transport(ReqwestTransport::new(), api_base_url);
        let outcome = client.convert(&request).await;

        // The form may have been unmounted while the request was in flight.
        if wizard.try_update(ConversionWizard::finish_submission).is_none() {
            log!("Submission settled after the form was closed");
        }

        match outcome {
            Ok(result) => {
                log!("Conversion finished: {}", result.result.status);
                on_result.run(result);
            }
            Err(e) => report_failure(&e, on_network_error),
        }
    });
}

/// Input control for one field.
fn field_control(
    field: &'static FieldDescriptor,
    wizard: RwSignal<ConversionWizard>,
) -> impl IntoView {
    let value = move || wizard.with(|w| w.value(field.label).to_string());

    match field.kind {
        FieldKind::Text => view! {
            <input
                type="text"
                class="form-input"
                placeholder=field.placeholder()
                prop:value=value
                on:input=move |ev| set_field(wizard, event_target_value(&ev))
            />
        }
        .into_any(),
        FieldKind::TextArea => view! {
            <textarea
                class="form-input form-textarea"
                placeholder=field.placeholder()
                prop:value=value
                on:input=move |ev| set_field(wizard, event_target_value(&ev))
            ></textarea>
        }
        .into_any(),
        FieldKind::Select => view! {
            <select
                class="form-input"
                on:change=move |ev| set_field(wizard, event_target_value(&ev))
            >
                {SELECT_OPTIONS
                    .iter()
                    .map(|option| {
                        view! {
                            <option
                                value=option.value
                                selected=move || {
                                    wizard.with(|w| w.value(field.label) == option.value)
                                }
                            >
                                {option.label}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        }
        .into_any(),
    }
}

/// Conversion form for `platform`. Every mount starts from mode selection
/// with an empty form.
#[component]
pub fn ConversionForm(
    /// Source platform.
    platform: Platform,
    /// Called with the parsed result of a successful conversion.
    on_result: Callback<ConversionResult>,
    /// Called when the backend could not be reached.
    on_network_error: Callback<()>,
) -> impl IntoView {
    let api_base_url = use_context::<ClientConfig>()
        .unwrap_or_default()
        .api_base_url;

    let wizard = RwSignal::new(ConversionWizard::new(platform));
    let mode = Memo::new(move |_| wizard.with(ConversionWizard::mode));
    let current_field = Memo::new(move |_| wizard.with(ConversionWizard::current_field));
    let submitting = Signal::derive(move || wizard.with(ConversionWizard::is_submitting));
    let can_go_back = Signal::derive(move || wizard.with(ConversionWizard::can_go_back));
    let next_label = move || wizard.with(ConversionWizard::next_label);

    let on_next = move |_| match wizard.try_update(ConversionWizard::next) {
        Some(Ok(Advance::Submit(request))) => submit(
            request,
            api_base_url.clone(),
            wizard,
            on_result,
            on_network_error,
        ),
        Some(Ok(Advance::Moved { .. })) | None => {}
        Some(Err(e)) => {
            warn!("{}", e);
            browser::alert(&e.to_string());
        }
    };

    view! {
        <div class="conversion-form">
            <h2 class="form-title">{platform.action_label()}</h2>

            <div class="mode-buttons">
                {Mode::ALL
                    .into_iter()
                    .map(|m| {
                        view! {
                            <button
                                class="button"
                                class:active=move || mode.get() == Some(m)
                                disabled=move || submitting.get()
                                on:click=move |_| choose_mode(wizard, m)
                            >
                                {m.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>

            <Show when=move || mode.get().is_some()>
                {move || {
                    current_field
                        .get()
                        .map(|field| {
                            view! {
                                <label class="form-label">{field.label}</label>
                                {field_control(field, wizard)}
                            }
                        })
                }}
                <div class="form-actions">
                    <Show when=move || can_go_back.get()>
                        <button
                            class="button"
                            on:click=move |_| {
                                wizard.update(|w| {
                                    w.previous();
                                });
                            }
                        >
                            {PREVIOUS_LABEL}
                        </button>
                    </Show>
                    <button
                        class="button button-primary"
                        disabled=move || submitting.get()
                        on:click=on_next.clone()
                    >
                        {next_label}
                    </button>
                </div>
            </Show>

            <LoadingOverlay visible=submitting label="Converting your playlist..." />
        </div>
    }
}
