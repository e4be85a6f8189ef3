//! Interpretation of `simulateTransaction` responses.

use soro_rpc::SimulateTransactionResponse;
use stellar_xdr::curr::{Limits, ReadXdr, SorobanAuthorizationEntry, SorobanTransactionData};

use crate::error::TxError;

/// What a successful simulation tells us about a transaction.
///
/// Both the resource data and the minimum resource fee are required; a
/// response lacking either cannot produce a valid transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationResult {
    pub transaction_data: SorobanTransactionData,
    pub min_resource_fee: i64,
    /// Authorization entries to attach to the invocation, in response order.
    pub auth: Vec<SorobanAuthorizationEntry>,
    pub latest_ledger: u32,
}

impl SimulationResult {
    pub fn from_response(response: SimulateTransactionResponse) -> Result<Self, TxError> {
        if let Some(error) = response.error {
            return Err(TxError::Simulation(error));
        }

        let data = response
            .transaction_data
            .filter(|d| !d.is_empty())
            .ok_or(TxError::SimulationIncomplete("transactionData"))?;
        let fee = response
            .min_resource_fee
            .ok_or(TxError::SimulationIncomplete("minResourceFee"))?
            .as_i64()?;
        if fee < 0 {
            return Err(TxError::Simulation(format!("negative resource fee {fee}")));
        }

        let transaction_data = SorobanTransactionData::from_xdr_base64(&data, Limits::none())?;
        let auth = response
            .results
            .iter()
            .flat_map(|r| r.auth.iter())
            .map(|entry| SorobanAuthorizationEntry::from_xdr_base64(entry, Limits::none()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            transaction_data,
            min_resource_fee: fee,
            auth,
            latest_ledger: response.latest_ledger,
        })
    }
}
