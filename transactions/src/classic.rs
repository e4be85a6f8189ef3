//! Classic trustline transactions.

use std::fmt;
use std::str::FromStr;

use soro_contract::xdr_account_id;
use soro_types::{Account, PublicKey};
use stellar_xdr::curr::{
    AlphaNum12, AlphaNum4, AssetCode12, AssetCode4, ChangeTrustAsset, ChangeTrustOp, Operation,
    OperationBody, Transaction,
};

use crate::builder::build_transaction;
use crate::error::TxError;

/// An issued asset, `CODE:ISSUER`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrustlineAsset {
    code: String,
    issuer: PublicKey,
}

impl TrustlineAsset {
    /// Asset codes are 1 to 12 ASCII letters or digits.
    pub fn new(code: &str, issuer: PublicKey) -> Result<Self, TxError> {
        if code.is_empty() || code.len() > 12 {
            return Err(TxError::InvalidAsset(format!(
                "asset code {code:?} must be 1 to 12 characters"
            )));
        }
        if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(TxError::InvalidAsset(format!(
                "asset code {code:?} must be alphanumeric"
            )));
        }
        Ok(Self {
            code: code.to_string(),
            issuer,
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn issuer(&self) -> &PublicKey {
        &self.issuer
    }

    fn to_xdr(&self) -> ChangeTrustAsset {
        let issuer = xdr_account_id(&self.issuer);
        let bytes = self.code.as_bytes();
        if bytes.len() <= 4 {
            let mut code = [0u8; 4];
            code[..bytes.len()].copy_from_slice(bytes);
            ChangeTrustAsset::CreditAlphanum4(AlphaNum4 {
                asset_code: AssetCode4(code),
                issuer,
            })
        } else {
            let mut code = [0u8; 12];
            code[..bytes.len()].copy_from_slice(bytes);
            ChangeTrustAsset::CreditAlphanum12(AlphaNum12 {
                asset_code: AssetCode12(code),
                issuer,
            })
        }
    }
}

impl FromStr for TrustlineAsset {
    type Err = TxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (code, issuer) = s
            .split_once(':')
            .ok_or_else(|| TxError::InvalidAsset(format!("expected CODE:ISSUER, got {s:?}")))?;
        let issuer = PublicKey::from_account_id(issuer)
            .map_err(|e| TxError::InvalidAsset(e.to_string()))?;
        Self::new(code, issuer)
    }
}

impl fmt::Display for TrustlineAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.code, self.issuer)
    }
}

/// A `ChangeTrust` operation. `None` means the maximum limit.
pub fn change_trust_operation(asset: &TrustlineAsset, limit: Option<i64>) -> Operation {
    Operation {
        source_account: None,
        body: OperationBody::ChangeTrust(ChangeTrustOp {
            line: asset.to_xdr(),
            limit: limit.unwrap_or(i64::MAX),
        }),
    }
}

pub fn build_change_trust(
    source: &Account,
    asset: &TrustlineAsset,
    limit: Option<i64>,
    base_fee: u32,
) -> Result<Transaction, TxError> {
    build_transaction(source, vec![change_trust_operation(asset, limit)], base_fee)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::BASE_FEE;

    fn issuer() -> PublicKey {
        PublicKey([6u8; 32])
    }

    #[test]
    fn short_codes_use_alphanum4() {
        let asset = TrustlineAsset::new("USDC", issuer()).unwrap();
        let op = change_trust_operation(&asset, None);
        let OperationBody::ChangeTrust(ct) = op.body else {
            panic!("expected change trust");
        };
        assert_eq!(ct.limit, i64::MAX);
        match ct.line {
            ChangeTrustAsset::CreditAlphanum4(a) => assert_eq!(&a.asset_code.0, b"USDC"),
            other => panic!("unexpected asset {other:?}"),
        }
    }

    #[test]
    fn long_codes_use_alphanum12_zero_padded() {
        let asset = TrustlineAsset::new("EUROC", issuer()).unwrap();
        let OperationBody::ChangeTrust(ct) = change_trust_operation(&asset, Some(5)).body else {
            panic!("expected change trust");
        };
        assert_eq!(ct.limit, 5);
        match ct.line {
            ChangeTrustAsset::CreditAlphanum12(a) => {
                assert_eq!(&a.asset_code.0[..5], b"EUROC");
                assert!(a.asset_code.0[5..].iter().all(|b| *b == 0));
            }
            other => panic!("unexpected asset {other:?}"),
        }
    }

    #[test]
    fn invalid_codes_rejected() {
        assert!(TrustlineAsset::new("", issuer()).is_err());
        assert!(TrustlineAsset::new("THIRTEENCHARS", issuer()).is_err());
        assert!(TrustlineAsset::new("US-D", issuer()).is_err());
    }

    #[test]
    fn parses_code_and_issuer() {
        let text = format!("USDC:{}", issuer());
        let asset: TrustlineAsset = text.parse().unwrap();
        assert_eq!(asset.code(), "USDC");
        assert_eq!(asset.issuer(), &issuer());
        assert_eq!(asset.to_string(), text);
        assert!("USDC".parse::<TrustlineAsset>().is_err());
    }

    #[test]
    fn trustline_transaction_single_op() {
        let account = Account::new(PublicKey([1u8; 32]), 7);
        let asset = TrustlineAsset::new("USDC", issuer()).unwrap();
        let tx = build_change_trust(&account, &asset, None, BASE_FEE).unwrap();
        assert_eq!(tx.operations.len(), 1);
        assert_eq!(tx.fee, BASE_FEE);
        assert_eq!(tx.seq_num.0, 8);
    }
}
