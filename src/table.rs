//! Table Body
//!
//! The attachment point a render pass writes into. Every pass replaces
//! the whole row set; rows are looked up by index when a status button
//! is clicked.

use leptos::prelude::*;

use crate::models::{ClientRecord, GroupIdentifiers, RenderedRow};

/// CSS selector for the per-row control
pub const STATUS_BUTTON_SELECTOR: &str = ".status-button";
/// Attributes the status button carries
pub const ROW_INDEX_ATTR: &str = "data-row";
pub const CLIENT_ATTR: &str = "data-client";
pub const TARGET_GROUP_ATTR: &str = "data-target-group";

/// What a status button says about its row when clicked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowClick {
    pub index: usize,
    pub client: String,
    pub target_group: i64,
}

impl RowClick {
    pub fn for_row(index: usize, row: &RenderedRow) -> Self {
        Self {
            index,
            client: row.client.clone(),
            target_group: row.target_group,
        }
    }

    /// Decode from an attribute lookup such as `Element::get_attribute`
    pub fn from_attributes(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        Some(Self {
            index: lookup(ROW_INDEX_ATTR)?.parse().ok()?,
            client: lookup(CLIENT_ATTR)?,
            target_group: lookup(TARGET_GROUP_ATTR)?.parse().ok()?,
        })
    }
}

pub trait TableBody {
    fn replace_rows(&self, rows: Vec<RenderedRow>);

    fn row(&self, index: usize) -> Option<RenderedRow>;

    fn row_count(&self) -> usize;
}

/// Rows in server order; no sorting, no diffing
pub fn build_rows(clients: &[ClientRecord], ids: &GroupIdentifiers) -> Vec<RenderedRow> {
    clients
        .iter()
        .map(|record| RenderedRow::from_record(record, ids))
        .collect()
}

impl TableBody for RwSignal<Vec<RenderedRow>> {
    fn replace_rows(&self, rows: Vec<RenderedRow>) {
        self.set(rows);
    }

    fn row(&self, index: usize) -> Option<RenderedRow> {
        self.with_untracked(|rows| rows.get(index).cloned())
    }

    fn row_count(&self) -> usize {
        self.with_untracked(|rows| rows.len())
    }
}
