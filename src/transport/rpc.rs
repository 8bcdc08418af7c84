//! transport::rpc
//!
//! JSON-RPC fetcher for `state_getMetadata`.
//!
//! # Design
//!
//! Metadata is one request/response, so the fetcher speaks plain HTTP
//! JSON-RPC. WebSocket endpoints from the config are addressed through their
//! HTTP equivalent (`wss://` to `https://`, `ws://` to `http://`); Substrate
//! nodes serve both on the same port.
//!
//! Connection failures are retried a few times. Each attempt is logged at
//! `debug` level so the retries stay silent unless the user asked for
//! diagnostics.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::traits::{FetchError, MetadataFetcher};
use crate::core::types::{ChainName, RpcEndpoint};

/// Connection attempts before giving up.
const MAX_ATTEMPTS: u32 = 3;

/// Pause between connection attempts.
const RETRY_DELAY: Duration = Duration::from_millis(250);

/// Fetches metadata over HTTP JSON-RPC.
#[derive(Debug, Clone)]
pub struct RpcFetcher {
    client: Client,
    endpoint: RpcEndpoint,
    url: String,
}

impl RpcFetcher {
    /// Create a fetcher for an endpoint.
    pub fn new(endpoint: RpcEndpoint) -> Self {
        Self {
            client: Client::new(),
            url: endpoint.http_url(),
            endpoint,
        }
    }

    /// The endpoint as configured.
    pub fn endpoint(&self) -> &RpcEndpoint {
        &self.endpoint
    }

    async fn request_once(&self) -> Result<Vec<u8>, Attempt> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method: "state_getMetadata",
            params: [],
        };

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    Attempt::Retry(FetchError::Network(e.to_string()))
                } else {
                    Attempt::Fatal(FetchError::Network(e.to_string()))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Attempt::Fatal(FetchError::Network(format!(
                "HTTP {} from {}",
                status, self.endpoint
            ))));
        }

        let body: JsonRpcResponse = response
            .json()
            .await
            .map_err(|e| Attempt::Fatal(FetchError::InvalidResponse(e.to_string())))?;

        if let Some(error) = body.error {
            return Err(Attempt::Fatal(FetchError::Rpc {
                code: error.code,
                message: error.message,
            }));
        }

        let result = body.result.ok_or_else(|| {
            Attempt::Fatal(FetchError::InvalidResponse("missing result".into()))
        })?;
        decode_hex(&result).map_err(Attempt::Fatal)
    }
}

#[async_trait]
impl MetadataFetcher for RpcFetcher {
    async fn fetch_metadata_bytes(&self, chain: &ChainName) -> Result<Vec<u8>, FetchError> {
        let mut attempt = 1;
        loop {
            debug!(chain = %chain, endpoint = %self.endpoint, attempt, "requesting metadata");
            match self.request_once().await {
                Ok(bytes) => {
                    debug!(chain = %chain, bytes = bytes.len(), "metadata received");
                    return Ok(bytes);
                }
                Err(Attempt::Retry(err)) if attempt < MAX_ATTEMPTS => {
                    debug!(chain = %chain, attempt, error = %err, "unable to connect, retrying");
                    tokio::time::sleep(RETRY_DELAY).await;
                    attempt += 1;
                }
                Err(Attempt::Retry(err)) | Err(Attempt::Fatal(err)) => return Err(err),
            }
        }
    }
}

/// Outcome of a failed attempt.
enum Attempt {
    Retry(FetchError),
    Fatal(FetchError),
}

#[derive(Serialize)]
struct JsonRpcRequest {
    jsonrpc: &'static str,
    id: u32,
    method: &'static str,
    params: [(); 0],
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    result: Option<String>,
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

fn decode_hex(value: &str) -> Result<Vec<u8>, FetchError> {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    hex::decode(digits).map_err(|e| FetchError::InvalidResponse(format!("bad hex: {}", e)))
}
