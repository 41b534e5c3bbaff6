//! Client Table Component
//!
//! Renders the current rows and forwards clicks through one delegated
//! handler on `<tbody>`. Each status button carries its row index, client
//! and target group; the synchronizer checks them against the current row.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::models::RenderedRow;
use crate::table::{RowClick, STATUS_BUTTON_SELECTOR};

/// Data of the status button under the click, if any
fn clicked_row(ev: &web_sys::MouseEvent) -> Option<RowClick> {
    let target = ev.target()?.dyn_into::<web_sys::Element>().ok()?;
    let button = target.closest(STATUS_BUTTON_SELECTOR).ok()??;
    RowClick::from_attributes(|name| button.get_attribute(name))
}

#[component]
fn ClientRow(index: usize, row: RenderedRow) -> impl IntoView {
    let class = format!("status-button {}", row.status_class());
    let icon = row.status_icon();
    let label = row.status_label();
    let client_attr = row.client.clone();
    let target_group = row.target_group.to_string();

    view! {
        <tr>
            <td title=row.name>{row.client}</td>
            <td>{row.comment}</td>
            <td class="center-content">
                <button
                    class=class
                    data-row=index.to_string()
                    data-client=client_attr
                    data-target-group=target_group
                >
                    <span class="icon">{icon}</span>
                    " "
                    {label}
                </button>
            </td>
        </tr>
    }
}

#[component]
pub fn ClientTable(
    rows: RwSignal<Vec<RenderedRow>>,
    #[prop(into)] on_row_click: Callback<Option<RowClick>>,
) -> impl IntoView {
    view! {
        <table class="client-table">
            <thead>
                <tr>
                    <th>"Client"</th>
                    <th>"Comment"</th>
                    <th class="center-content">"Ad-Blocking"</th>
                </tr>
            </thead>
            <tbody on:click=move |ev| on_row_click.run(clicked_row(&ev))>
                // Rebuilt wholesale on every render pass
                {move || {
                    rows.get()
                        .into_iter()
                        .enumerate()
                        .map(|(index, row)| view! { <ClientRow index=index row=row /> })
                        .collect_view()
                }}
            </tbody>
        </table>
    }
}
