//! Result viewer with a summary tab and a combined tracks table.

use leptos::prelude::*;
use playlist_converter_core::{ConversionResult, ResultTab, TrackRow};

#[component]
fn TracksTable(rows: Vec<TrackRow>) -> impl IntoView {
    if rows.is_empty() {
        return view! { <p class="empty-state">"No tracks were added or removed."</p> }
            .into_any();
    }

    view! {
        <table class="tracks-table">
            <thead>
                <tr>
                    <th>"Track"</th>
                    <th>"Artist"</th>
                    <th>"Deleted"</th>
                </tr>
            </thead>
            <tbody>
                {rows
                    .into_iter()
                    .map(|row| {
                        let label = row.deleted_label();
                        view! {
                            <tr class:deleted=row.deleted>
                                <td>{row.track}</td>
                                <td>{row.artist}</td>
                                <td>{label}</td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
    .into_any()
}

/// Shows the latest conversion result. Renders nothing until one arrives.
#[component]
pub fn ConversionView(
    /// Latest result.
    #[prop(into)]
    data: Signal<Option<ConversionResult>>,
) -> impl IntoView {
    let (tab, set_tab) = signal(ResultTab::default());

    view! {
        <Show when=move || has_result(data)>
            <div class="conversion-view">
                <div class="tabs">
                    {ResultTab::ALL
                        .into_iter()
                        .map(|t| {
                            view! {
                                <button
                                    class="tab"
                                    class:active=move || tab.get() == t
                                    on:click=move |_| set_tab.set(t)
                                >
                                    {t.label()}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
                {move || data.get().map(|result| match tab.get() {
                    ResultTab::Result => {
                        view! {
                            <div class="result-summary">
                                <p>
                                    <strong>"Status: "</strong>
                                    {result.result.status.clone()}
                                </p>
                                <p>
                                    <strong>"Message: "</strong>
                                    {result.result.message.clone()}
                                </p>
                            </div>
                        }
                            .into_any()
                    }
                    ResultTab::Table => view! { <TracksTable rows=result.table_rows() /> }.into_any(),
                })}
            </div>
        </Show>
    }
}

fn has_result(data: Signal<Option<ConversionResult>>) -> bool {
    data.with(Option::is_some)
}
