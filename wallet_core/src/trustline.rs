//! Classic trustline creation through Horizon.

use soro_rpc::{AccountDirectory, ClassicSubmitter};
use soro_transactions::{build_change_trust, envelope_xdr, sign_transaction, TrustlineAsset, TxError};
use soro_types::{KeyPair, Network, TxHash};
use tracing::{info, warn, Instrument};

use crate::error::ClientError;
use crate::tracing_spans;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrustlineResult {
    pub hash: TxHash,
    pub ledger: Option<u32>,
}

/// Establish a trustline from `keypair`'s account to `asset`.
///
/// `limit` of `None` trusts the maximum amount. Horizon applies the
/// transaction synchronously, so the result is final.
pub async fn create_trustline<D: AccountDirectory, S: ClassicSubmitter>(
    directory: &D,
    submitter: &S,
    keypair: &KeyPair,
    network: &Network,
    asset: &TrustlineAsset,
    limit: Option<i64>,
    base_fee: u32,
) -> Result<TrustlineResult, ClientError> {
    let span = tracing_spans::trustline_span(&asset.to_string());
    submit_change_trust(directory, submitter, keypair, network, asset, limit, base_fee)
        .instrument(span)
        .await
}

async fn submit_change_trust<D: AccountDirectory, S: ClassicSubmitter>(
    directory: &D,
    submitter: &S,
    keypair: &KeyPair,
    network: &Network,
    asset: &TrustlineAsset,
    limit: Option<i64>,
    base_fee: u32,
) -> Result<TrustlineResult, ClientError> {
    let account = directory.get_account(&keypair.public).await?;
    let tx = build_change_trust(&account, asset, limit, base_fee)?;
    let (envelope, local_hash) = sign_transaction(tx, keypair, network)?;

    let response = submitter.submit_classic(&envelope_xdr(&envelope)?).await?;
    let hash = TxHash::from_hex(&response.hash).unwrap_or(local_hash);
    if !response.successful {
        warn!(%hash, "trustline transaction failed");
        return Err(TxError::Submission {
            status: "FAILED".into(),
            detail: format!("transaction {hash} was not applied"),
        }
        .into());
    }
    info!(%hash, ledger = ?response.ledger, "trustline created");
    Ok(TrustlineResult {
        hash,
        ledger: response.ledger,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use soro_nullables::{NullAccountDirectory, NullClassicSubmitter};
    use soro_transactions::signature_matches;
    use stellar_xdr::curr::{Limits, OperationBody, ReadXdr, TransactionEnvelope};

    use crate::ErrorKind;

    const ISSUER: &str = "GCDNJUBQSX7AJWLJACMJ7I4BC3Z47BQUTMHEICZLE6MU4KQBRYG5JY6B";

    fn setup() -> (KeyPair, NullAccountDirectory, TrustlineAsset) {
        let kp = soro_crypto::keypair_from_seed(&[4u8; 32]);
        let directory = NullAccountDirectory::new().with_account(kp.public, 9);
        let issuer = soro_types::PublicKey::from_account_id(ISSUER).unwrap();
        (kp, directory, TrustlineAsset::new("USDC", issuer).unwrap())
    }

    #[tokio::test]
    async fn submits_signed_change_trust() {
        let (kp, directory, asset) = setup();
        let submitter = NullClassicSubmitter::new();

        let result = create_trustline(&directory, &submitter, &kp, &Network::Testnet, &asset, None, 100)
            .await
            .unwrap();
        assert_eq!(result.ledger, Some(1));

        let submitted = submitter.submitted();
        assert_eq!(submitted.len(), 1);
        let TransactionEnvelope::Tx(env) =
            TransactionEnvelope::from_xdr_base64(&submitted[0], Limits::none()).unwrap()
        else {
            panic!("expected a v1 envelope");
        };
        assert_eq!(env.tx.seq_num.0, 10);
        assert!(matches!(env.tx.operations[0].body, OperationBody::ChangeTrust(_)));

        let hash = soro_transactions::transaction_hash(&env.tx, &Network::Testnet).unwrap();
        assert!(signature_matches(hash.as_bytes(), &env.signatures[0], &kp.public));
    }

    #[tokio::test]
    async fn horizon_rejection_is_a_submission_error() {
        let (kp, directory, asset) = setup();
        let submitter = NullClassicSubmitter::new();
        submitter.reject(400, r#"{"title":"Transaction Failed"}"#);

        let err = create_trustline(&directory, &submitter, &kp, &Network::Testnet, &asset, None, 100)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Submission);
    }

    #[tokio::test]
    async fn unknown_account_is_not_found() {
        let (_, directory, asset) = setup();
        let stranger = soro_crypto::keypair_from_seed(&[5u8; 32]);
        let submitter = NullClassicSubmitter::new();

        let err = create_trustline(&directory, &submitter, &stranger, &Network::Testnet, &asset, None, 100)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(submitter.submitted().is_empty());
    }
}
