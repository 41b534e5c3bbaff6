//! Backend Command Wrappers
//!
//! The three HTTP calls the dashboard makes. `DashboardApi` is the seam
//! the synchronizer is written against; `HttpApi` is the browser
//! implementation over `gloo-net`.

use gloo_net::http::Request;

use crate::config::DashboardConfig;
use crate::error::DashboardError;
use crate::models::{ClientRecord, EditRequest, GroupIdentifiers};

pub trait DashboardApi {
    /// Client list in server order. The endpoint answers with text that
    /// holds JSON, so implementations decode twice.
    async fn fetch_clients(&self) -> Result<Vec<ClientRecord>, DashboardError>;

    async fn fetch_group_ids(&self) -> Result<GroupIdentifiers, DashboardError>;

    /// Any 2xx is success; the response body is ignored
    async fn edit_client(&self, request: &EditRequest) -> Result<(), DashboardError>;
}

/// Second decode step for the clients endpoint
pub fn decode_client_list(url: &str, contents: &str) -> Result<Vec<ClientRecord>, DashboardError> {
    serde_json::from_str(contents).map_err(|source| DashboardError::Decode {
        url: url.to_string(),
        source,
    })
}

#[derive(Debug, Clone)]
pub struct HttpApi {
    clients_url: String,
    group_ids_url: String,
    edit_client_url: String,
}

impl HttpApi {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            clients_url: config.clients_url(),
            group_ids_url: config.group_ids_url(),
            edit_client_url: config.edit_client_url(),
        }
    }
}

fn ensure_ok(url: &str, response: &gloo_net::http::Response) -> Result<(), DashboardError> {
    if response.ok() {
        Ok(())
    } else {
        Err(DashboardError::Status {
            url: url.to_string(),
            status: response.status(),
        })
    }
}

impl DashboardApi for HttpApi {
    async fn fetch_clients(&self) -> Result<Vec<ClientRecord>, DashboardError> {
        let url = &self.clients_url;
        let response = Request::get(url)
            .send()
            .await
            .map_err(|e| DashboardError::transport(url, e))?;
        ensure_ok(url, &response)?;
        let contents = response.text().await.map_err(|e| DashboardError::transport(url, e))?;
        decode_client_list(url, &contents)
    }

    async fn fetch_group_ids(&self) -> Result<GroupIdentifiers, DashboardError> {
        let url = &self.group_ids_url;
        let response = Request::get(url)
            .send()
            .await
            .map_err(|e| DashboardError::transport(url, e))?;
        ensure_ok(url, &response)?;
        let text = response.text().await.map_err(|e| DashboardError::transport(url, e))?;
        serde_json::from_str(&text).map_err(|source| DashboardError::Decode {
            url: url.clone(),
            source,
        })
    }

    async fn edit_client(&self, request: &EditRequest) -> Result<(), DashboardError> {
        let url = &self.edit_client_url;
        let response = Request::post(url)
            .json(request)
            .map_err(|e| DashboardError::transport(url, e))?
            .send()
            .await
            .map_err(|e| DashboardError::transport(url, e))?;
        ensure_ok(url, &response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_client_list_keeps_server_order() {
        let text = r#"[{"client":"b","comment":"","groups":[1]},{"client":"a","comment":"x","groups":[0]}]"#;
        let clients = decode_client_list("/clients", text).unwrap();

        let order: Vec<_> = clients.iter().map(|c| c.client.as_str()).collect();
        assert_eq!(order, vec!["b", "a"]);
    }

    #[test]
    fn test_decode_client_list_rejects_malformed() {
        for bad in ["", "not json", r#"{"clients":[]}"#, r#"[{"comment":"no client"}]"#] {
            let err = decode_client_list("/clients", bad).unwrap_err();
            assert!(matches!(err, DashboardError::Decode { .. }), "{bad:?} gave {err}");
        }
    }

    #[test]
    fn test_http_api_urls_follow_config() {
        let config = DashboardConfig {
            base_url: "http://pi.lan".to_string(),
            endpoint: Some("a".to_string()),
            ..DashboardConfig::default()
        };
        let api = HttpApi::new(&config);

        assert_eq!(api.clients_url, "http://pi.lan/clients?ep=a");
        assert_eq!(api.edit_client_url, "http://pi.lan/editclient");
    }
}
