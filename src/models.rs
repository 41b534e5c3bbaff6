//! Frontend Models
//!
//! Data structures exchanged with the dashboard backend, plus the
//! per-row view model derived from them on every render pass.

use serde::{Deserialize, Deserializer, Serialize};

use crate::table::RowClick;

/// Client entry as returned by `/clients` (read-only per refresh)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    /// MAC, IP or hostname
    pub client: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub comment: String,
    #[serde(default)]
    pub groups: Vec<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// The two groups that tell a filtered client from an unfiltered one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupIdentifiers {
    /// Ad-blocking active
    #[serde(rename = "adblock_group_id")]
    pub restricted: i64,
    /// Ad-blocking inactive
    #[serde(rename = "non_adblock_group_id")]
    pub unrestricted: i64,
}

impl GroupIdentifiers {
    pub const FALLBACK: Self = Self {
        restricted: 0,
        unrestricted: 1,
    };

    pub fn is_distinct(&self) -> bool {
        self.restricted != self.unrestricted
    }

    pub fn is_restricted(&self, groups: &[i64]) -> bool {
        groups.contains(&self.restricted)
    }

    /// Group a client moves to when its status button is clicked
    pub fn toggle_target(&self, groups: &[i64]) -> i64 {
        if self.is_restricted(groups) {
            self.unrestricted
        } else {
            self.restricted
        }
    }
}

impl Default for GroupIdentifiers {
    fn default() -> Self {
        Self::FALLBACK
    }
}

/// One table row, rebuilt from scratch on every render pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    pub client: String,
    pub comment: String,
    pub name: Option<String>,
    pub is_restricted: bool,
    pub target_group: i64,
}

impl RenderedRow {
    pub fn from_record(record: &ClientRecord, ids: &GroupIdentifiers) -> Self {
        Self {
            client: record.client.clone(),
            comment: record.comment.clone(),
            name: record.name.clone(),
            is_restricted: ids.is_restricted(&record.groups),
            target_group: ids.toggle_target(&record.groups),
        }
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_restricted { "Disabled" } else { "Enabled" }
    }

    pub fn status_icon(&self) -> &'static str {
        if self.is_restricted { "✖" } else { "✓" }
    }

    pub fn status_class(&self) -> &'static str {
        if self.is_restricted { "disabled" } else { "enabled" }
    }

    /// Whether a click carrying `click` still refers to this row
    pub fn matches(&self, click: &RowClick) -> bool {
        self.client == click.client && self.target_group == click.target_group
    }

    pub fn edit_request(&self) -> EditRequest {
        EditRequest {
            client: self.client.clone(),
            comment: self.comment.clone(),
            group: self.target_group,
        }
    }
}

/// Body of `POST /editclient`; `group` is always the post-toggle group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditRequest {
    pub client: String,
    pub comment: String,
    pub group: i64,
}
