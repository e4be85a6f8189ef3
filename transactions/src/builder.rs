//! Transaction assembly shared by contract and classic flows.

use soro_types::Account;
use stellar_xdr::curr::{
    Memo, MuxedAccount, Operation, Preconditions, SequenceNumber, Transaction, TransactionExt,
    Uint256, VecM,
};

use crate::error::TxError;

/// Inclusion fee per operation, in stroops.
pub const BASE_FEE: u32 = 100;

/// Wrap `operations` in a transaction from `source` at its next sequence.
///
/// The fee is `base_fee` per operation; a Soroban transaction's resource fee
/// is added later, during finalization.
pub fn build_transaction(
    source: &Account,
    operations: Vec<Operation>,
    base_fee: u32,
) -> Result<Transaction, TxError> {
    let count = u32::try_from(operations.len())
        .map_err(|_| TxError::FeeOverflow("operation count".into()))?;
    let fee = base_fee
        .checked_mul(count)
        .ok_or_else(|| TxError::FeeOverflow(format!("{base_fee} x {count} operations")))?;

    Ok(Transaction {
        source_account: MuxedAccount::Ed25519(Uint256(source.id.0)),
        fee,
        seq_num: SequenceNumber(source.next_sequence()),
        cond: Preconditions::None,
        memo: Memo::None,
        operations: VecM::try_from(operations)?,
        ext: TransactionExt::V0,
    })
}
