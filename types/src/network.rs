//! Network identifier.
//!
//! Every network signs under its own passphrase, so a signature produced for
//! one network is never valid on another.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;

/// Identifies which Stellar network the client talks to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// The production network.
    Public,
    /// The public test network.
    Testnet,
    /// The preview network for upcoming protocol versions.
    Futurenet,
    /// A local quickstart container.
    Standalone,
}

impl Network {
    /// Passphrase hashed into every transaction signature payload.
    pub fn passphrase(&self) -> &'static str {
        match self {
            Self::Public => "Public Global Stellar Network ; September 2015",
            Self::Testnet => "Test SDF Network ; September 2015",
            Self::Futurenet => "Test SDF Future Network ; October 2022",
            Self::Standalone => "Standalone Network ; February 2017",
        }
    }

    /// Look a network up by its passphrase.
    pub fn from_passphrase(passphrase: &str) -> Option<Self> {
        [Self::Public, Self::Testnet, Self::Futurenet, Self::Standalone]
            .into_iter()
            .find(|n| n.passphrase() == passphrase)
    }

    /// Default Horizon REST endpoint.
    pub fn default_horizon_url(&self) -> &'static str {
        match self {
            Self::Public => "https://horizon.stellar.org",
            Self::Testnet => "https://horizon-testnet.stellar.org",
            Self::Futurenet => "https://horizon-futurenet.stellar.org",
            Self::Standalone => "http://localhost:8000",
        }
    }

    /// Default Soroban RPC endpoint. There is no public default for the production network.
    pub fn default_rpc_url(&self) -> Option<&'static str> {
        match self {
            Self::Public => None,
            Self::Testnet => Some("https://soroban-testnet.stellar.org"),
            Self::Futurenet => Some("https://rpc-futurenet.stellar.org"),
            Self::Standalone => Some("http://localhost:8000/soroban/rpc"),
        }
    }

    /// Human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Testnet => "testnet",
            Self::Futurenet => "futurenet",
            Self::Standalone => "standalone",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "public" | "mainnet" | "pubnet" => Ok(Self::Public),
            "testnet" | "test" => Ok(Self::Testnet),
            "futurenet" => Ok(Self::Futurenet),
            "standalone" | "local" => Ok(Self::Standalone),
            other => Err(TypesError::UnknownNetwork(other.to_string())),
        }
    }
}
