//! Soroban JSON-RPC 2.0 client.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use soro_types::TxHash;
use tracing::debug;

use crate::error::RpcError;
use crate::responses::{
    GetTransactionResponse, SendTransactionResponse, SimulateTransactionResponse,
};
use crate::{http_client, LedgerRpc, DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT};

pub struct SorobanRpcClient {
    http: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

impl SorobanRpcClient {
    pub fn new(url: &str) -> Result<Self, RpcError> {
        Self::with_timeouts(url, DEFAULT_REQUEST_TIMEOUT, DEFAULT_CONNECT_TIMEOUT)
    }

    pub fn with_timeouts(url: &str, request: Duration, connect: Duration) -> Result<Self, RpcError> {
        Ok(Self {
            http: http_client(request, connect)?,
            url: url.to_string(),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Issue one JSON-RPC call with object params and decode `result`.
    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T, RpcError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        debug!(method, id, "soroban rpc call");

        let response = self.http.post(&self.url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RpcError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: JsonRpcResponse<T> = response
            .json()
            .await
            .map_err(|e| RpcError::InvalidResponse(format!("{method}: {e}")))?;

        if let Some(err) = envelope.error {
            return Err(RpcError::Server {
                code: err.code,
                message: err.message,
            });
        }
        envelope
            .result
            .ok_or_else(|| RpcError::InvalidResponse(format!("{method}: missing result")))
    }
}

impl LedgerRpc for SorobanRpcClient {
    async fn simulate_transaction(
        &self,
        envelope_xdr: &str,
    ) -> Result<SimulateTransactionResponse, RpcError> {
        self.call("simulateTransaction", json!({ "transaction": envelope_xdr }))
            .await
    }

    async fn send_transaction(
        &self,
        envelope_xdr: &str,
    ) -> Result<SendTransactionResponse, RpcError> {
        self.call("sendTransaction", json!({ "transaction": envelope_xdr }))
            .await
    }

    async fn get_transaction(&self, hash: &TxHash) -> Result<GetTransactionResponse, RpcError> {
        self.call("getTransaction", json!({ "hash": hash.to_hex() }))
            .await
    }
}
