//! UI Components
//!
//! Leptos components for the dashboard.

mod client_table;

pub use client_table::ClientTable;
