//! Client configuration with TOML file support.
//!
//! There is no secret seed field; the seed comes from the command line or
//! the environment only.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use soro_anchor::WithdrawMethod;
use soro_types::{ContractId, Network};
use soro_utils::LogFormat;

use crate::error::ClientError;

/// Configuration for the pool client.
///
/// Can be loaded from a TOML file via [`ClientConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Endpoint URLs left unset fall
/// back to the network's well-known defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_network")]
    pub network: Network,

    /// Horizon base URL override.
    #[serde(default)]
    pub horizon_url: Option<String>,

    /// Soroban RPC URL override. Required on networks without a public default.
    #[serde(default)]
    pub rpc_url: Option<String>,

    /// Lending pool contract (`C...`).
    #[serde(default)]
    pub pool_contract: Option<String>,

    /// Reserve asset contract deposited into the pool (`C...`).
    #[serde(default)]
    pub asset_contract: Option<String>,

    /// Anchor home domain, e.g. `testanchor.stellar.org`.
    #[serde(default)]
    pub anchor_domain: Option<String>,

    /// Inclusion fee per operation, in stroops.
    #[serde(default = "default_base_fee")]
    pub base_fee: u32,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_max_polls")]
    pub max_polls: u32,

    #[serde(default)]
    pub withdraw_method: WithdrawMethod,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_network() -> Network {
    Network::Testnet
}

fn default_base_fee() -> u32 {
    100
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_poll_interval_ms() -> u64 {
    2_000
}

fn default_max_polls() -> u32 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ClientConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ClientError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ClientError> {
        let config: Self = toml::from_str(s).map_err(|e| ClientError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ClientError> {
        toml::to_string_pretty(self).map_err(|e| ClientError::Config(e.to_string()))
    }

    /// Reject values no request could succeed with.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.base_fee == 0 {
            return Err(ClientError::Config("base_fee must be positive".into()));
        }
        if self.request_timeout_secs == 0 || self.connect_timeout_secs == 0 {
            return Err(ClientError::Config("timeouts must be positive".into()));
        }
        if self.max_polls == 0 {
            return Err(ClientError::Config("max_polls must be positive".into()));
        }
        for (name, value) in [
            ("pool_contract", &self.pool_contract),
            ("asset_contract", &self.asset_contract),
        ] {
            if let Some(id) = value {
                ContractId::from_strkey(id)
                    .map_err(|e| ClientError::Config(format!("{name}: {e}")))?;
            }
        }
        Ok(())
    }

    pub fn horizon_url(&self) -> &str {
        self.horizon_url
            .as_deref()
            .unwrap_or_else(|| self.network.default_horizon_url())
    }

    pub fn rpc_url(&self) -> Result<&str, ClientError> {
        self.rpc_url
            .as_deref()
            .or_else(|| self.network.default_rpc_url())
            .ok_or_else(|| {
                ClientError::Config(format!(
                    "rpc_url must be set for network {}",
                    self.network.as_str()
                ))
            })
    }

    pub fn pool_contract(&self) -> Result<ContractId, ClientError> {
        contract(&self.pool_contract, "pool_contract")
    }

    pub fn asset_contract(&self) -> Result<ContractId, ClientError> {
        contract(&self.asset_contract, "asset_contract")
    }

    pub fn anchor_domain(&self) -> Result<&str, ClientError> {
        self.anchor_domain
            .as_deref()
            .ok_or_else(|| ClientError::Config("anchor_domain is not set".into()))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

fn contract(value: &Option<String>, name: &str) -> Result<ContractId, ClientError> {
    let id = value
        .as_deref()
        .ok_or_else(|| ClientError::Config(format!("{name} is not set")))?;
    ContractId::from_strkey(id).map_err(|e| ClientError::Config(format!("{name}: {e}")))
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            network: default_network(),
            horizon_url: None,
            rpc_url: None,
            pool_contract: None,
            asset_contract: None,
            anchor_domain: None,
            base_fee: default_base_fee(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            poll_interval_ms: default_poll_interval_ms(),
            max_polls: default_max_polls(),
            withdraw_method: WithdrawMethod::default(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}
