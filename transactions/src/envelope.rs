//! Signature payloads, signing and envelope serialization.
//!
//! The signed message is `sha256(network_id || ENVELOPE_TYPE_TX || tx)`, which
//! is also the transaction hash the ledger reports.

use soro_crypto::{network_id, sha256, sign_message, verify_signature};
use soro_types::{KeyPair, Network, PublicKey, TxHash};
use stellar_xdr::curr::{
    self as xdr, BytesM, DecoratedSignature, Hash, Limits, SignatureHint, Transaction,
    TransactionEnvelope, TransactionSignaturePayload,
    TransactionSignaturePayloadTaggedTransaction, TransactionV1Envelope, VecM, WriteXdr,
};

use crate::error::TxError;

/// Hash of the signature payload for `tx` on the network with id `network_id`.
pub fn signature_payload_hash(tx: &Transaction, network_id: &[u8; 32]) -> Result<[u8; 32], TxError> {
    let payload = TransactionSignaturePayload {
        network_id: Hash(*network_id),
        tagged_transaction: TransactionSignaturePayloadTaggedTransaction::Tx(tx.clone()),
    };
    Ok(sha256(&payload.to_xdr(Limits::none())?))
}

pub fn transaction_hash(tx: &Transaction, network: &Network) -> Result<TxHash, TxError> {
    Ok(TxHash::new(signature_payload_hash(tx, &network_id(network))?))
}

/// Sign a payload hash, tagging the signature with the key's hint.
pub fn decorated_signature(
    payload_hash: &[u8; 32],
    keypair: &KeyPair,
) -> Result<DecoratedSignature, TxError> {
    let signature = sign_message(payload_hash, &keypair.secret);
    Ok(DecoratedSignature {
        hint: SignatureHint(keypair.public.hint()),
        signature: xdr::Signature(BytesM::try_from(signature.0.to_vec())?),
    })
}

/// Whether `signature` is a valid signature by `signer` over `payload_hash`.
///
/// Hints that don't match `signer` are rejected without verifying.
pub fn signature_matches(
    payload_hash: &[u8; 32],
    signature: &DecoratedSignature,
    signer: &PublicKey,
) -> bool {
    if signature.hint.0 != signer.hint() {
        return false;
    }
    let Ok(bytes) = <[u8; 64]>::try_from(signature.signature.0.as_slice()) else {
        return false;
    };
    verify_signature(payload_hash, &soro_types::Signature(bytes), signer)
}

pub fn unsigned_envelope(tx: Transaction) -> TransactionEnvelope {
    TransactionEnvelope::Tx(TransactionV1Envelope {
        tx,
        signatures: VecM::default(),
    })
}

/// Sign `tx` and wrap it in an envelope. Returns the envelope and its hash.
pub fn sign_transaction(
    tx: Transaction,
    keypair: &KeyPair,
    network: &Network,
) -> Result<(TransactionEnvelope, TxHash), TxError> {
    let payload_hash = signature_payload_hash(&tx, &network_id(network))?;
    let signature = decorated_signature(&payload_hash, keypair)?;
    let envelope = TransactionEnvelope::Tx(TransactionV1Envelope {
        tx,
        signatures: VecM::try_from(vec![signature])?,
    });
    Ok((envelope, TxHash::new(payload_hash)))
}

pub fn envelope_xdr(envelope: &TransactionEnvelope) -> Result<String, TxError> {
    Ok(envelope.to_xdr_base64(Limits::none())?)
}
