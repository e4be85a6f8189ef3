//! Ledger addresses: classic accounts (`G...`) and contracts (`C...`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;
use crate::keys::PublicKey;

/// A 32-byte contract identifier, rendered as a `C...` strkey.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContractId(pub [u8; 32]);

impl ContractId {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Parse a `C...` contract id.
    pub fn from_strkey(s: &str) -> Result<Self, TypesError> {
        stellar_strkey::Contract::from_string(s)
            .map(|c| Self(c.0))
            .map_err(|_| TypesError::InvalidContractId(s.to_string()))
    }

    pub fn to_strkey(&self) -> String {
        stellar_strkey::Contract(self.0).to_string()
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_strkey())
    }
}

impl fmt::Debug for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContractId({})", self.to_strkey())
    }
}

impl FromStr for ContractId {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_strkey(s)
    }
}

/// Any address a contract argument can name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Address {
    Account(PublicKey),
    Contract(ContractId),
}

impl Address {
    /// Parse either a `G...` account id or a `C...` contract id.
    pub fn parse(s: &str) -> Result<Self, TypesError> {
        match s.chars().next() {
            Some('G') => PublicKey::from_account_id(s).map(Self::Account),
            Some('C') => ContractId::from_strkey(s).map(Self::Contract),
            _ => Err(TypesError::InvalidAddress(s.to_string())),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Account(pk) => fmt::Display::fmt(pk, f),
            Self::Contract(id) => fmt::Display::fmt(id, f),
        }
    }
}

impl FromStr for Address {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<PublicKey> for Address {
    fn from(pk: PublicKey) -> Self {
        Self::Account(pk)
    }
}

impl From<ContractId> for Address {
    fn from(id: ContractId) -> Self {
        Self::Contract(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POOL: &str = "CAZSVHNUMHVC6O5I7M2IVK2EC34CSSLCPAVHZ3MN6YRTT2LOTXXJT3AX";
    const ACCOUNT: &str = "GDL4EC5LSXLI4SQAGZOBEOEFG6CPHKWV4TR6LG6LPBASPR5V3WGXRIUC";

    #[test]
    fn parse_contract() {
        let addr = Address::parse(POOL).unwrap();
        assert!(matches!(addr, Address::Contract(_)));
        assert_eq!(addr.to_string(), POOL);
    }

    #[test]
    fn parse_account() {
        let addr: Address = ACCOUNT.parse().unwrap();
        assert!(matches!(addr, Address::Account(_)));
        assert_eq!(addr.to_string(), ACCOUNT);
    }

    #[test]
    fn reject_other_prefixes() {
        assert!(Address::parse("SAG2Z5YXJTMCLBXHFKG34VBHHPHYSU4BTRZZGZDDXY3NWJLIRDB5MX5J").is_err());
        assert!(Address::parse("").is_err());
    }

    #[test]
    fn contract_checksum_enforced() {
        let mut bad = POOL.to_string();
        bad.pop();
        bad.push('B');
        assert!(ContractId::from_strkey(&bad).is_err());
    }
}
