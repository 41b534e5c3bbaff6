#![allow(warnings)]
//! Ad-Block Dashboard Frontend Entry Point

mod api;
mod app;
mod components;
mod config;
mod error;
mod groups;
mod logging;
mod models;
mod scheduler;
mod synchronizer;
mod table;

#[cfg(test)]
mod test_support;

use app::{build_synchronizer, App};
use config::{DashboardConfig, TABLE_HOST_ID};
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::LevelFilter;
use wasm_bindgen::JsCast;

fn main() {
    console_error_panic_hook::set_once();
    logging::init(LevelFilter::Info);

    let host = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(TABLE_HOST_ID))
        .and_then(|element| element.dyn_into::<web_sys::HtmlElement>().ok());

    match host {
        Some(host) => {
            let config = DashboardConfig::from_attributes(|name| host.get_attribute(name));
            logging::init(config.log_level);
            leptos::mount::mount_to(host, move || view! { <App config=config /> }).forget();
        }
        None => {
            // No table to render into: groups still resolve, the loop stays off
            let synchronizer = build_synchronizer(&DashboardConfig::default(), None);
            spawn_local(async move {
                synchronizer.initialize().await;
            });
        }
    }
}
