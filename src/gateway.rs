//! HTTP read adapter for indexer gateways
//!
//! Implements [`NewsReadView`] against a gateway that indexes the news
//! contract and serves its state over HTTP. Writes always need a wallet
//! signer and stay behind the [`crate::traits::NewsWriteView`] seam.

use crate::error::{ChainError, ChainResult};
use crate::model::{CiphertextHandle, RecordFields};
use crate::traits::NewsReadView;
use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Gateway client configuration
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL for the gateway HTTP API
    pub base_url: String,
    /// Contract address the gateway scopes requests by
    pub contract: String,
    /// Optional API key for authenticated access
    pub api_key: Option<String>,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            contract: String::new(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

/// Response from the record listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordIdsResponse {
    /// Contract the listing is scoped to
    pub contract: String,
    /// All record ids, in creation order
    pub ids: Vec<String>,
}

/// Response from the ciphertext handle endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandleResponse {
    pub id: String,
    /// Opaque on-chain ciphertext reference
    pub handle: String,
}

/// Response from the availability endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub available: bool,
}

/// HTTP client for a news-contract indexer gateway
///
/// # Example
///
/// ```rust,no_run
/// use cipherfeed_sdk::{GatewayClient, GatewayConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let gateway = GatewayClient::new(GatewayConfig {
///     base_url: "https://gateway.example.com".into(),
///     contract: "0xcontract".into(),
///     ..Default::default()
/// });
///
/// let ids = gateway.record_ids().await?;
/// # Ok(())
/// # }
/// ```
pub struct GatewayClient {
    config: GatewayConfig,
    client: Client,
}

impl GatewayClient {
    /// Create a new gateway client
    pub fn new(config: GatewayConfig) -> Self {
        let mut headers = header::HeaderMap::new();
        if let Some(ref api_key) = config.api_key {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", api_key))
                    .expect("Invalid API key"),
            );
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to build HTTP client");

        Self { config, client }
    }

    /// List all record ids the gateway has indexed
    pub async fn record_ids(&self) -> ChainResult<Vec<String>> {
        let url = format!(
            "{}/chain/v1/{}/records",
            self.config.base_url,
            urlencoding::encode(&self.config.contract)
        );

        let response = self.client.get(&url).send().await?;
        let body: RecordIdsResponse = self.handle_response(response).await?;
        Ok(body.ids)
    }

    /// Fetch a single record's fields
    pub async fn record(&self, id: &str) -> ChainResult<RecordFields> {
        let url = format!(
            "{}/chain/v1/{}/records/{}",
            self.config.base_url,
            urlencoding::encode(&self.config.contract),
            urlencoding::encode(id)
        );

        let response = self.client.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ChainError::NotFound(id.to_string()));
        }
        self.handle_response(response).await
    }

    /// Fetch a record's ciphertext handle
    pub async fn ciphertext_handle(&self, id: &str) -> ChainResult<CiphertextHandle> {
        let url = format!(
            "{}/chain/v1/{}/records/{}/handle",
            self.config.base_url,
            urlencoding::encode(&self.config.contract),
            urlencoding::encode(id)
        );

        let response = self.client.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ChainError::NotFound(id.to_string()));
        }
        let body: HandleResponse = self.handle_response(response).await?;
        Ok(CiphertextHandle::new(body.handle))
    }

    /// Probe whether the contract is reachable through the gateway
    pub async fn available(&self) -> ChainResult<bool> {
        let url = format!(
            "{}/chain/v1/{}/available",
            self.config.base_url,
            urlencoding::encode(&self.config.contract)
        );

        let response = self.client.get(&url).send().await?;
        let body: AvailabilityResponse = self.handle_response(response).await?;
        Ok(body.available)
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ChainResult<T> {
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ChainError::NotFound("resource not found".to_string()));
        }

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ChainError::Call(format!("HTTP {} - {}", status, body)));
        }

        let body = response
            .json()
            .await
            .map_err(|e| ChainError::Call(e.to_string()))?;
        Ok(body)
    }
}

#[async_trait]
impl NewsReadView for GatewayClient {
    async fn list_record_ids(&self) -> ChainResult<Vec<String>> {
        self.record_ids().await
    }

    async fn get_record(&self, id: &str) -> ChainResult<RecordFields> {
        self.record(id).await
    }

    async fn get_ciphertext_handle(&self, id: &str) -> ChainResult<CiphertextHandle> {
        self.ciphertext_handle(id).await
    }

    async fn check_availability(&self) -> ChainResult<bool> {
        self.available().await
    }
}
