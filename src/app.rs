//! Dashboard App
//!
//! Root component: owns the row signal and the table synchronizer,
//! starts the refresh loop on mount and stops it on cleanup.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::HttpApi;
use crate::components::ClientTable;
use crate::config::DashboardConfig;
use crate::groups::GroupResolver;
use crate::models::RenderedRow;
use crate::scheduler::BrowserScheduler;
use crate::synchronizer::TableSynchronizer;
use crate::table::RowClick;

pub type BrowserSynchronizer =
    TableSynchronizer<HttpApi, RwSignal<Vec<RenderedRow>>, BrowserScheduler>;

pub fn build_synchronizer(
    config: &DashboardConfig,
    rows: Option<RwSignal<Vec<RenderedRow>>>,
) -> BrowserSynchronizer {
    let api = Rc::new(HttpApi::new(config));
    TableSynchronizer::new(
        Rc::clone(&api),
        GroupResolver::new(api),
        rows,
        BrowserScheduler,
        config.refresh_interval_ms,
    )
}

#[component]
pub fn App(config: DashboardConfig) -> impl IntoView {
    let rows = RwSignal::new(Vec::<RenderedRow>::new());
    let synchronizer = build_synchronizer(&config, Some(rows));

    let starting = synchronizer.clone();
    spawn_local(async move {
        starting.initialize().await;
        log::info!("Dashboard Application Initialized.");
    });

    // Rc-based, so keep it in local arena storage
    let sync = StoredValue::new_local(synchronizer);
    on_cleanup(move || {
        let _ = sync.try_with_value(|s| s.teardown());
    });

    let on_row_click = Callback::new(move |click: Option<RowClick>| {
        sync.with_value(|s| s.handle_click(click));
    });

    view! {
        <ClientTable rows=rows on_row_click=on_row_click />
    }
}
