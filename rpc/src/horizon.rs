//! Horizon REST client.

use std::time::Duration;

use soro_types::{Account, PublicKey};
use tracing::debug;

use crate::error::RpcError;
use crate::responses::{HorizonAccountResponse, HorizonTransactionResponse};
use crate::{http_client, AccountDirectory, ClassicSubmitter};
use crate::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT};

/// Client for a Horizon server.
///
/// Only reads account state and posts classic transactions; contract
/// transactions go through [`crate::SorobanRpcClient`].
pub struct HorizonClient {
    http: reqwest::Client,
    base_url: String,
}

impl HorizonClient {
    pub fn new(base_url: &str) -> Result<Self, RpcError> {
        Self::with_timeouts(base_url, DEFAULT_REQUEST_TIMEOUT, DEFAULT_CONNECT_TIMEOUT)
    }

    pub fn with_timeouts(
        base_url: &str,
        request: Duration,
        connect: Duration,
    ) -> Result<Self, RpcError> {
        Ok(Self {
            http: http_client(request, connect)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET {base}/accounts/{G...}`
    pub async fn account(&self, id: &PublicKey) -> Result<HorizonAccountResponse, RpcError> {
        let account_id = id.account_id();
        let url = format!("{}/accounts/{}", self.base_url, account_id);
        debug!(%account_id, "fetching account");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RpcError::AccountNotFound(account_id));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RpcError::Http {
                status: status.as_u16(),
                body,
            });
        }
        response
            .json()
            .await
            .map_err(|e| RpcError::InvalidResponse(format!("account response: {e}")))
    }

    /// `POST {base}/transactions` with form field `tx`.
    pub async fn submit_transaction(
        &self,
        envelope_xdr: &str,
    ) -> Result<HorizonTransactionResponse, RpcError> {
        let url = format!("{}/transactions", self.base_url);
        let response = self
            .http
            .post(&url)
            .form(&[("tx", envelope_xdr)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Horizon puts result codes in `extras.result_codes`; keep the raw body.
            let body = response.text().await.unwrap_or_default();
            return Err(RpcError::Http {
                status: status.as_u16(),
                body,
            });
        }
        response
            .json()
            .await
            .map_err(|e| RpcError::InvalidResponse(format!("submit response: {e}")))
    }
}

impl AccountDirectory for HorizonClient {
    async fn get_account(&self, id: &PublicKey) -> Result<Account, RpcError> {
        let response = self.account(id).await?;
        Ok(Account::new(*id, response.sequence()?))
    }
}

impl ClassicSubmitter for HorizonClient {
    async fn submit_classic(
        &self,
        envelope_xdr: &str,
    ) -> Result<HorizonTransactionResponse, RpcError> {
        self.submit_transaction(envelope_xdr).await
    }
}
