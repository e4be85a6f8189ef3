//! Anchor client.
//!
//! Talks to a Stellar anchor in the order the protocols require:
//! discovery via stellar.toml, capability lookup via SEP-6 `/info`, SEP-10
//! authentication when the asset needs it, then the withdraw request itself.

pub mod auth;
pub mod discovery;
pub mod error;
pub mod info;
pub mod transfer;

use std::time::Duration;

use soro_types::{Clock, KeyPair};
pub use auth::{authenticate, sign_challenge, validate_challenge, AnchorSession, ChallengeExpectations};
pub use discovery::{fetch_stellar_toml, stellar_toml_url, StellarToml};
pub use error::AnchorError;
pub use info::{AssetInfo, FieldInfo, InfoResponse, TypeInfo};
pub use transfer::{withdraw, WithdrawMethod, WithdrawRequest, WithdrawResponse};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for one anchor, identified by its home domain.
pub struct AnchorClient {
    http: reqwest::Client,
    home_domain: String,
    toml_url: String,
}

impl AnchorClient {
    pub fn new(home_domain: &str) -> Result<Self, AnchorError> {
        Self::with_timeouts(home_domain, DEFAULT_TIMEOUT, DEFAULT_CONNECT_TIMEOUT)
    }

    pub fn with_timeouts(
        home_domain: &str,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, AnchorError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| AnchorError::Client(e.to_string()))?;
        Ok(Self {
            http,
            home_domain: home_domain.to_string(),
            toml_url: stellar_toml_url(home_domain),
        })
    }

    /// Read stellar.toml from `url` instead of the well-known location.
    pub fn with_toml_url(mut self, url: &str) -> Self {
        self.toml_url = url.to_string();
        self
    }

    pub fn home_domain(&self) -> &str {
        &self.home_domain
    }

    pub async fn discover(&self) -> Result<StellarToml, AnchorError> {
        fetch_stellar_toml(&self.http, &self.toml_url).await
    }

    /// `GET {TRANSFER_SERVER}/info`.
    pub async fn info(&self, toml: &StellarToml) -> Result<InfoResponse, AnchorError> {
        let url = format!("{}/info", toml.transfer_server()?);
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(AnchorError::InvalidResponse(format!(
                "{url} returned HTTP {}",
                response.status()
            )));
        }
        response
            .json()
            .await
            .map_err(|e| AnchorError::InvalidResponse(format!("info response: {e}")))
    }

    /// SEP-10 against the anchor's `WEB_AUTH_ENDPOINT`.
    pub async fn authenticate(
        &self,
        toml: &StellarToml,
        keypair: &KeyPair,
        network_passphrase: &str,
        clock: &impl Clock,
    ) -> Result<AnchorSession, AnchorError> {
        if let Some(declared) = &toml.network_passphrase {
            if declared != network_passphrase {
                return Err(AnchorError::Auth(format!(
                    "anchor serves {declared:?}, client is on {network_passphrase:?}"
                )));
            }
        }
        let server_key = toml.signing_key()?;
        let expect = ChallengeExpectations {
            server_key: &server_key,
            client: &keypair.public,
            home_domain: &self.home_domain,
            network_passphrase,
        };
        authenticate(&self.http, toml.web_auth_endpoint()?, &expect, keypair, clock).await
    }

    /// `{TRANSFER_SERVER}/withdraw`, with the session's token when given.
    pub async fn withdraw(
        &self,
        toml: &StellarToml,
        session: Option<&AnchorSession>,
        request: &WithdrawRequest,
        method: WithdrawMethod,
    ) -> Result<WithdrawResponse, AnchorError> {
        withdraw(
            &self.http,
            toml.transfer_server()?,
            session.map(|s| s.token.as_str()),
            request,
            method,
        )
        .await
    }
}
