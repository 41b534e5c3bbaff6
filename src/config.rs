//! Dashboard Configuration
//!
//! Endpoint paths, refresh interval and log level. Values come from the
//! `data-*` attributes of the host element; anything missing or invalid
//! keeps its default.

use log::LevelFilter;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Deserialize;

/// Id of the element the client table mounts into
pub const TABLE_HOST_ID: &str = "client-table";

pub const DEFAULT_REFRESH_INTERVAL_MS: u32 = 5000;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Prefix for every endpoint; empty means same origin
    pub base_url: String,
    pub clients_path: String,
    pub group_ids_path: String,
    pub edit_client_path: String,
    pub refresh_interval_ms: u32,
    /// Upstream the backend should read clients from (`?ep=`)
    pub endpoint: Option<String>,
    #[serde(deserialize_with = "level_from_str")]
    pub log_level: LevelFilter,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            clients_path: "/clients".to_string(),
            group_ids_path: "/group-ids".to_string(),
            edit_client_path: "/editclient".to_string(),
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            endpoint: None,
            log_level: LevelFilter::Info,
        }
    }
}

fn level_from_str<'de, D>(deserializer: D) -> Result<LevelFilter, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
}

impl DashboardConfig {
    /// Build from an attribute lookup such as `Element::get_attribute`
    pub fn from_attributes(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        let text = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(base) = text("data-base-url") {
            config.base_url = base.trim_end_matches('/').to_string();
        }
        if let Some(path) = text("data-clients-path") {
            config.clients_path = path;
        }
        if let Some(path) = text("data-group-ids-path") {
            config.group_ids_path = path;
        }
        if let Some(path) = text("data-edit-client-path") {
            config.edit_client_path = path;
        }
        if let Some(raw) = text("data-refresh-ms") {
            match raw.parse::<u32>() {
                Ok(ms) if ms > 0 => config.refresh_interval_ms = ms,
                _ => log::warn!(
                    "Invalid data-refresh-ms {:?}, keeping {}ms",
                    raw,
                    config.refresh_interval_ms
                ),
            }
        }
        config.endpoint = text("data-endpoint");
        if let Some(raw) = text("data-log-level") {
            match raw.parse::<LevelFilter>() {
                Ok(level) => config.log_level = level,
                Err(_) => log::warn!("Invalid data-log-level {:?}, keeping {}", raw, config.log_level),
            }
        }

        config
    }

    pub fn clients_url(&self) -> String {
        let mut url = format!("{}{}", self.base_url, self.clients_path);
        if let Some(ep) = &self.endpoint {
            url.push_str("?ep=");
            url.push_str(&utf8_percent_encode(ep, NON_ALPHANUMERIC).to_string());
        }
        url
    }

    pub fn group_ids_url(&self) -> String {
        format!("{}{}", self.base_url, self.group_ids_path)
    }

    pub fn edit_client_url(&self) -> String {
        format!("{}{}", self.base_url, self.edit_client_path)
    }
}
