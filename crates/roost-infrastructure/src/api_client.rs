//! Thin HTTP client for the Roost REST backend.
//!
//! Screens call the backend, then feed results into the session store. The
//! session store and navigation gate never call this directly.

use roost_core::api::ApiEnvelope;
use roost_core::config::ClientConfig;
use roost_core::error::{Result, RoostError};
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| RoostError::network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Joins `path` onto the base URL with exactly one slash.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GETs `path` and unwraps the envelope's `data`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        tracing::debug!("[ApiClient] GET {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| RoostError::network(format!("GET {} failed: {}", url, e)))?;
        Self::decode(response).await
    }

    /// POSTs a JSON body to `path` and unwraps the envelope's `data`.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        tracing::debug!("[ApiClient] POST {}", url);

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| RoostError::network(format!("POST {} failed: {}", url, e)))?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RoostError::network(format!("Failed to read response body: {}", e)))?;
        decode_body(status, &body)
    }
}

/// Error statuses still carry an envelope with a message most of the time, so
/// the message is preferred. An error status is never returned as data, even
/// when the body claims `success: true`.
fn decode_body<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T> {
    if status.is_success() {
        return serde_json::from_str::<ApiEnvelope<T>>(body)?.into_result();
    }

    let message = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(body)
        .ok()
        .and_then(|envelope| envelope.message)
        .unwrap_or_else(|| format!("HTTP {}", status));
    if status.is_client_error() {
        Err(RoostError::api(message))
    } else {
        Err(RoostError::network(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(base: &str) -> ApiClient {
        ApiClient::new(&ClientConfig {
            api_base_url: base.to_string(),
            ..ClientConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_url_joins_with_single_slash() {
        let client = client_for("https://api.roost.example/api/");
        assert_eq!(
            client.url("/hostels"),
            "https://api.roost.example/api/hostels"
        );
        assert_eq!(
            client.url("tiffins/42"),
            "https://api.roost.example/api/tiffins/42"
        );
    }

    #[test]
    fn test_error_status_is_never_data() {
        let body = r#"{"success":true,"data":{"id":"1"}}"#;
        let err = decode_body::<serde_json::Value>(StatusCode::INTERNAL_SERVER_ERROR, body)
            .unwrap_err();
        assert!(matches!(err, RoostError::Network(_)));
        assert_eq!(err.to_string(), "Network error: HTTP 500 Internal Server Error");
    }

    #[test]
    fn test_client_error_prefers_envelope_message() {
        let body = r#"{"success":false,"message":"Invalid OTP"}"#;
        let err = decode_body::<serde_json::Value>(StatusCode::UNAUTHORIZED, body).unwrap_err();
        assert_eq!(err.to_string(), "API error: Invalid OTP");

        let err = decode_body::<serde_json::Value>(StatusCode::NOT_FOUND, "<html>").unwrap_err();
        assert_eq!(err.to_string(), "API error: HTTP 404 Not Found");
    }

    #[test]
    fn test_success_status_unwraps_data() {
        let body = r#"{"success":true,"data":[1,2]}"#;
        let data: Vec<u32> = decode_body(StatusCode::OK, body).unwrap();
        assert_eq!(data, vec![1, 2]);

        let err = decode_body::<Vec<u32>>(StatusCode::OK, "not json").unwrap_err();
        assert!(err.is_serialization());
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        // Port 9 (discard) on loopback is closed on any sane test host.
        let client = client_for("http://127.0.0.1:9");
        let err = client.get::<serde_json::Value>("/ping").await.unwrap_err();
        assert!(matches!(err, RoostError::Network(_)));
    }
}
