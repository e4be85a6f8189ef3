//! SEP-10 web authentication.
//!
//! The anchor hands out a challenge transaction that the client inspects,
//! co-signs, and returns in exchange for a JWT. A challenge is only signed
//! after it passes every check in [`validate_challenge`].

use serde::Deserialize;
use serde_json::json;
use soro_crypto::network_id_for_passphrase;
use soro_transactions::{decorated_signature, envelope_xdr, signature_matches, signature_payload_hash};
use soro_types::{Clock, KeyPair, PublicKey};
use stellar_xdr::curr::{
    Limits, MuxedAccount, OperationBody, Preconditions, ReadXdr, TimeBounds, TransactionEnvelope,
    Uint256, VecM,
};
use tracing::{debug, info, warn};

use crate::error::AnchorError;

/// A JWT issued for one account by one anchor.
#[derive(Clone, PartialEq, Eq)]
pub struct AnchorSession {
    pub token: String,
    pub domain: String,
    pub account: PublicKey,
}

impl std::fmt::Debug for AnchorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnchorSession")
            .field("domain", &self.domain)
            .field("account", &self.account)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct ChallengeResponse {
    transaction: String,
    #[serde(default)]
    network_passphrase: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

/// What a challenge must look like to be signed.
pub struct ChallengeExpectations<'a> {
    pub server_key: &'a PublicKey,
    pub client: &'a PublicKey,
    pub home_domain: &'a str,
    pub network_passphrase: &'a str,
}

fn auth_error(msg: impl Into<String>) -> AnchorError {
    AnchorError::Auth(msg.into())
}

fn is_account(account: &MuxedAccount, key: &PublicKey) -> bool {
    matches!(account, MuxedAccount::Ed25519(Uint256(bytes)) if bytes == &key.0)
}

fn time_bounds(cond: &Preconditions) -> Option<&TimeBounds> {
    match cond {
        Preconditions::Time(bounds) => Some(bounds),
        Preconditions::V2(v2) => v2.time_bounds.as_ref(),
        Preconditions::None => None,
    }
}

/// Check a challenge envelope against SEP-10's rules.
pub fn validate_challenge(
    envelope: &TransactionEnvelope,
    expect: &ChallengeExpectations<'_>,
    clock: &impl Clock,
) -> Result<(), AnchorError> {
    let TransactionEnvelope::Tx(env) = envelope else {
        return Err(auth_error("challenge is not a v1 transaction envelope"));
    };
    let tx = &env.tx;

    if tx.seq_num.0 != 0 {
        return Err(auth_error(format!(
            "challenge sequence number is {}, expected 0",
            tx.seq_num.0
        )));
    }
    if !is_account(&tx.source_account, expect.server_key) {
        return Err(auth_error("challenge source is not the anchor signing key"));
    }

    let bounds = time_bounds(&tx.cond).ok_or_else(|| auth_error("challenge has no time bounds"))?;
    let now = clock.now();
    if !now.within(bounds.min_time.0, bounds.max_time.0) {
        return Err(auth_error(format!(
            "challenge expired or not yet valid (now {now}, bounds {}..{})",
            bounds.min_time.0, bounds.max_time.0
        )));
    }

    let Some(first) = tx.operations.first() else {
        return Err(auth_error("challenge has no operations"));
    };
    let OperationBody::ManageData(data) = &first.body else {
        return Err(auth_error("first challenge operation is not manage data"));
    };
    if !first
        .source_account
        .as_ref()
        .is_some_and(|source| is_account(source, expect.client))
    {
        return Err(auth_error("first challenge operation is not sourced by the client"));
    }
    let expected_key = format!("{} auth", expect.home_domain);
    let key = data.data_name.0.to_utf8_string_lossy();
    if key != expected_key {
        return Err(auth_error(format!(
            "challenge key {key:?} does not match {expected_key:?}"
        )));
    }
    if data.data_value.is_none() {
        return Err(auth_error("challenge nonce is empty"));
    }

    for op in tx.operations.iter().skip(1) {
        if !matches!(op.body, OperationBody::ManageData(_)) {
            return Err(auth_error("challenge contains a non manage data operation"));
        }
        // Later operations (web_auth_domain) belong to the anchor.
        if !op
            .source_account
            .as_ref()
            .is_some_and(|source| is_account(source, expect.server_key))
        {
            return Err(auth_error("additional challenge operation not sourced by the anchor"));
        }
    }

    let payload = signature_payload_hash(tx, &network_id_for_passphrase(expect.network_passphrase))
        .map_err(|e| auth_error(e.to_string()))?;
    if !env
        .signatures
        .iter()
        .any(|sig| signature_matches(&payload, sig, expect.server_key))
    {
        return Err(auth_error("challenge is not signed by the anchor"));
    }
    Ok(())
}

/// Append the client's signature to a validated challenge.
pub fn sign_challenge(
    envelope: TransactionEnvelope,
    keypair: &KeyPair,
    network_passphrase: &str,
) -> Result<TransactionEnvelope, AnchorError> {
    let TransactionEnvelope::Tx(mut env) = envelope else {
        return Err(auth_error("challenge is not a v1 transaction envelope"));
    };
    let payload = signature_payload_hash(&env.tx, &network_id_for_passphrase(network_passphrase))
        .map_err(|e| auth_error(e.to_string()))?;
    let signature = decorated_signature(&payload, keypair).map_err(|e| auth_error(e.to_string()))?;

    let mut signatures = env.signatures.to_vec();
    signatures.push(signature);
    env.signatures = VecM::try_from(signatures).map_err(|e| auth_error(e.to_string()))?;
    Ok(TransactionEnvelope::Tx(env))
}

/// Run the full challenge/response exchange against `endpoint`.
///
/// No retries: any failure is returned as [`AnchorError::Auth`] and no token
/// is produced.
pub async fn authenticate(
    http: &reqwest::Client,
    endpoint: &str,
    expect: &ChallengeExpectations<'_>,
    keypair: &KeyPair,
    clock: &impl Clock,
) -> Result<AnchorSession, AnchorError> {
    let account = keypair.public.account_id();
    debug!(endpoint, %account, "requesting challenge");

    let response = http
        .get(endpoint)
        .query(&[("account", account.as_str())])
        .send()
        .await
        .map_err(|e| auth_error(format!("challenge request: {e}")))?;
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        warn!(%status, "challenge request refused");
        return Err(auth_error(format!("challenge request returned HTTP {status}: {body}")));
    }
    let challenge: ChallengeResponse = response
        .json()
        .await
        .map_err(|e| auth_error(format!("challenge response: {e}")))?;

    if let Some(passphrase) = &challenge.network_passphrase {
        if passphrase != expect.network_passphrase {
            return Err(auth_error(format!(
                "anchor is on network {passphrase:?}, expected {:?}",
                expect.network_passphrase
            )));
        }
    }

    let envelope = TransactionEnvelope::from_xdr_base64(&challenge.transaction, Limits::none())
        .map_err(|e| auth_error(format!("challenge xdr: {e}")))?;
    validate_challenge(&envelope, expect, clock)?;
    let signed = sign_challenge(envelope, keypair, expect.network_passphrase)?;
    let signed_xdr = envelope_xdr(&signed).map_err(|e| auth_error(e.to_string()))?;

    let response = http
        .post(endpoint)
        .json(&json!({ "transaction": signed_xdr }))
        .send()
        .await
        .map_err(|e| auth_error(format!("token request: {e}")))?;
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        warn!(%status, "token request refused");
        return Err(auth_error(format!("token request returned HTTP {status}: {body}")));
    }
    let token: TokenResponse = response
        .json()
        .await
        .map_err(|e| auth_error(format!("token response: {e}")))?;

    info!(domain = expect.home_domain, %account, "authenticated with anchor");
    Ok(AnchorSession {
        token: token.token,
        domain: expect.home_domain.to_string(),
        account: keypair.public,
    })
}
