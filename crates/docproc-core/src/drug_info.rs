//! Drug label lookups used to enrich medical report prescriptions.
//!
//! Lookups are best-effort: every failure collapses to [`NO_INFORMATION`]
//! and nothing is retried.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::error::{DocprocError, Result};
use crate::models::config::DrugInfoConfig;

/// Description substituted whenever drug information cannot be obtained.
pub const NO_INFORMATION: &str = "No information available";

/// Source of drug descriptions.
#[async_trait]
pub trait DrugInfoSource: Send + Sync {
    /// Look up a description for `drug_name`. Never fails; returns
    /// [`NO_INFORMATION`] when nothing could be found.
    async fn lookup(&self, drug_name: &str) -> String;
}

/// Client for an openFDA-style drug label endpoint.
pub struct OpenFdaClient {
    client: Client,
    base_url: String,
}

impl OpenFdaClient {
    /// Create a client from configuration.
    pub fn new(config: &DrugInfoConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(|e| DocprocError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch(&self, drug_name: &str) -> std::result::Result<String, String> {
        let resp = self
            .client
            .get(&self.base_url)
            .query(&[("search", drug_name)])
            .send()
            .await
            .map_err(|e| format!("request failed: {}", e))?;

        if !resp.status().is_success() {
            return Err(format!("HTTP {}", resp.status()));
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| format!("invalid JSON: {}", e))?;

        first_description(&body).ok_or_else(|| "no description in response".to_string())
    }
}

#[async_trait]
impl DrugInfoSource for OpenFdaClient {
    async fn lookup(&self, drug_name: &str) -> String {
        if drug_name.trim().is_empty() {
            return NO_INFORMATION.to_string();
        }

        match self.fetch(drug_name).await {
            Ok(description) => description,
            Err(reason) => {
                debug!("Drug info unavailable for {:?}: {}", drug_name, reason);
                NO_INFORMATION.to_string()
            }
        }
    }
}

/// Drug info source that never touches the network.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineDrugInfo;

#[async_trait]
impl DrugInfoSource for OfflineDrugInfo {
    async fn lookup(&self, _drug_name: &str) -> String {
        NO_INFORMATION.to_string()
    }
}

/// Build the drug info source selected by configuration.
pub fn from_config(config: &DrugInfoConfig) -> Result<Box<dyn DrugInfoSource>> {
    if config.enabled {
        let client = OpenFdaClient::new(config)?;
        debug!("Drug info lookups via {}", client.base_url());
        Ok(Box::new(client))
    } else {
        debug!("Drug info lookups disabled");
        Ok(Box::new(OfflineDrugInfo))
    }
}

/// `description` of the first element of `results`, coerced to a string.
fn first_description(body: &Value) -> Option<String> {
    let description = body.get("results")?.as_array()?.first()?.get("description")?;
    coerce_to_string(description)
}

fn coerce_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(parts) => Some(
            parts
                .iter()
                .filter_map(coerce_to_string)
                .collect::<Vec<_>>()
                .join(" "),
        ),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::routing::get;
    use axum::Router;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::HashMap;

    /// Fake label API keyed on the `search` parameter.
    async fn fake_label_api(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
        let search = params.get("search").cloned().unwrap_or_default();
        match search.as_str() {
            "Amoxicillin" => (
                StatusCode::OK,
                json!({"results": [{"description": "Amoxicillin is a penicillin antibiotic."}]})
                    .to_string(),
            ),
            "Cough Syrup" => (
                StatusCode::OK,
                json!({"results": [{"description": ["Syrup for", "coughs."]}]}).to_string(),
            ),
            "Empty" => (StatusCode::OK, json!({"results": []}).to_string()),
            "NoDescription" => (StatusCode::OK, json!({"results": [{"id": 1}]}).to_string()),
            "NoResults" => (StatusCode::OK, json!({"meta": {}}).to_string()),
            "Garbage" => (StatusCode::OK, "<html>not json</html>".to_string()),
            "Slow" => {
                tokio::time::sleep(Duration::from_secs(3)).await;
                (
                    StatusCode::OK,
                    json!({"results": [{"description": "too late"}]}).to_string(),
                )
            }
            _ => (
                StatusCode::NOT_FOUND,
                json!({"error": {"code": "NOT_FOUND"}}).to_string(),
            ),
        }
    }

    async fn spawn_fake_api() -> String {
        let app = Router::new().route("/drug/label.json", get(fake_label_api));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/drug/label.json", addr)
    }

    fn client_for(base_url: String) -> OpenFdaClient {
        OpenFdaClient::new(&DrugInfoConfig {
            enabled: true,
            base_url,
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_lookup_returns_first_description() {
        let client = client_for(spawn_fake_api().await);
        assert_eq!(
            client.lookup("Amoxicillin").await,
            "Amoxicillin is a penicillin antibiotic."
        );
    }

    #[tokio::test]
    async fn test_lookup_encodes_query_and_joins_array_description() {
        let client = client_for(spawn_fake_api().await);
        assert_eq!(client.lookup("Cough Syrup").await, "Syrup for coughs.");
    }

    #[tokio::test]
    async fn test_lookup_failures_return_sentinel() {
        let client = client_for(spawn_fake_api().await);
        for name in ["Empty", "NoDescription", "NoResults", "Garbage", "Unknown", "", "  "] {
            assert_eq!(client.lookup(name).await, NO_INFORMATION, "drug {:?}", name);
        }
    }

    #[tokio::test]
    async fn test_lookup_connection_refused_returns_sentinel() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(format!("http://{}/drug/label.json", addr));
        assert_eq!(client.lookup("Amoxicillin").await, NO_INFORMATION);
    }

    #[tokio::test]
    async fn test_lookup_timeout_returns_sentinel() {
        let client = OpenFdaClient::new(&DrugInfoConfig {
            enabled: true,
            base_url: spawn_fake_api().await,
            timeout_secs: 1,
        })
        .unwrap();

        let start = std::time::Instant::now();
        assert_eq!(client.lookup("Slow").await, NO_INFORMATION);
        assert!(start.elapsed() < Duration::from_secs(3));
    }

    #[test]
    fn test_from_config_selects_source() {
        let mut config = DrugInfoConfig::default();
        assert!(from_config(&config).is_ok());
        config.enabled = false;
        assert!(from_config(&config).is_ok());
    }

    #[tokio::test]
    async fn test_offline_source() {
        assert_eq!(OfflineDrugInfo.lookup("Amoxicillin").await, NO_INFORMATION);
    }

    #[test]
    fn test_coerce_to_string() {
        assert_eq!(coerce_to_string(&json!("text")), Some("text".to_string()));
        assert_eq!(coerce_to_string(&json!(["a", "b"])), Some("a b".to_string()));
        assert_eq!(coerce_to_string(&json!(42)), Some("42".to_string()));
        assert_eq!(coerce_to_string(&Value::Null), None);
    }
}
