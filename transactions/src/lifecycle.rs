//! Typestate transaction lifecycle.
//!
//! `BuiltTransaction -> SimulatedTransaction -> FinalizedTransaction ->
//! SignedTransaction -> SubmissionResult`. Fields are private, so a state can
//! only be reached through the step before it; a transaction cannot be
//! signed without having been simulated, nor submitted unsigned.

use soro_contract::build_invocation;
use soro_rpc::{LedgerRpc, RpcError};
use soro_types::{Account, ContractInvocationRequest, KeyPair, Network, TxHash};
use stellar_xdr::curr::{OperationBody, Transaction, TransactionEnvelope, TransactionExt, VecM};
use tracing::{debug, info, warn};

use crate::builder::build_transaction;
use crate::envelope::{envelope_xdr, sign_transaction, transaction_hash, unsigned_envelope};
use crate::error::TxError;
use crate::simulation::SimulationResult;

/// A transaction that has not been simulated yet.
#[derive(Clone, Debug)]
pub struct BuiltTransaction {
    tx: Transaction,
}

impl BuiltTransaction {
    /// One contract invocation from `source` at its next sequence number.
    pub fn invocation(
        source: &Account,
        request: &ContractInvocationRequest,
        base_fee: u32,
    ) -> Result<Self, TxError> {
        let operation = build_invocation(request)?;
        let tx = build_transaction(source, vec![operation], base_fee)?;
        debug!(
            contract = %request.contract,
            function = %request.function,
            sequence = tx.seq_num.0,
            "built invocation"
        );
        Ok(Self { tx })
    }

    pub fn transaction(&self) -> &Transaction {
        &self.tx
    }

    /// Unsigned envelope, the form simulation expects.
    pub fn envelope_xdr(&self) -> Result<String, TxError> {
        envelope_xdr(&unsigned_envelope(self.tx.clone()))
    }

    /// Run `simulateTransaction` once.
    pub async fn simulate<R: LedgerRpc>(self, rpc: &R) -> Result<SimulatedTransaction, TxError> {
        let response = rpc
            .simulate_transaction(&self.envelope_xdr()?)
            .await
            .map_err(|e| match e {
                // The node refused the dry run outright, e.g. a malformed envelope.
                RpcError::Server { code, message } => {
                    warn!(code, %message, "simulation refused");
                    TxError::Simulation(format!("rpc error {code}: {message}"))
                }
                other => TxError::Rpc(other),
            })?;
        let simulation = SimulationResult::from_response(response).inspect_err(|e| {
            warn!(error = %e, "simulation rejected");
        })?;
        debug!(
            min_resource_fee = simulation.min_resource_fee,
            auth_entries = simulation.auth.len(),
            latest_ledger = simulation.latest_ledger,
            "simulated"
        );
        Ok(SimulatedTransaction {
            tx: self.tx,
            simulation,
        })
    }
}

#[derive(Clone, Debug)]
pub struct SimulatedTransaction {
    tx: Transaction,
    simulation: SimulationResult,
}

impl SimulatedTransaction {
    pub fn simulation(&self) -> &SimulationResult {
        &self.simulation
    }

    /// Attach resource data and auth entries, and add the resource fee.
    pub fn finalize(self) -> Result<FinalizedTransaction, TxError> {
        let Self { mut tx, simulation } = self;

        let resource_fee = u32::try_from(simulation.min_resource_fee)
            .map_err(|_| TxError::FeeOverflow(format!("resource fee {}", simulation.min_resource_fee)))?;
        tx.fee = tx
            .fee
            .checked_add(resource_fee)
            .ok_or_else(|| TxError::FeeOverflow(format!("{} + {resource_fee}", tx.fee)))?;

        let mut operations = tx.operations.to_vec();
        for op in &mut operations {
            if let OperationBody::InvokeHostFunction(invoke) = &mut op.body {
                invoke.auth = VecM::try_from(simulation.auth.clone())?;
            }
        }
        tx.operations = VecM::try_from(operations)?;
        tx.ext = TransactionExt::V1(simulation.transaction_data);

        debug!(fee = tx.fee, "finalized");
        Ok(FinalizedTransaction { tx })
    }
}

#[derive(Clone, Debug)]
pub struct FinalizedTransaction {
    tx: Transaction,
}

impl FinalizedTransaction {
    pub fn transaction(&self) -> &Transaction {
        &self.tx
    }

    /// Total fee: inclusion fee plus resource fee.
    pub fn fee(&self) -> u32 {
        self.tx.fee
    }

    pub fn hash(&self, network: &Network) -> Result<TxHash, TxError> {
        transaction_hash(&self.tx, network)
    }

    pub fn sign(self, keypair: &KeyPair, network: &Network) -> Result<SignedTransaction, TxError> {
        let (envelope, hash) = sign_transaction(self.tx, keypair, network)?;
        debug!(%hash, "signed");
        Ok(SignedTransaction { envelope, hash })
    }
}

#[derive(Clone, Debug)]
pub struct SignedTransaction {
    envelope: TransactionEnvelope,
    hash: TxHash,
}

impl SignedTransaction {
    pub fn hash(&self) -> TxHash {
        self.hash
    }

    pub fn envelope(&self) -> &TransactionEnvelope {
        &self.envelope
    }

    pub fn envelope_xdr(&self) -> Result<String, TxError> {
        envelope_xdr(&self.envelope)
    }

    /// Send via `sendTransaction`. Only `PENDING` and `DUPLICATE` count as
    /// accepted.
    pub async fn submit<R: LedgerRpc>(self, rpc: &R) -> Result<SubmissionResult, TxError> {
        let response = rpc
            .send_transaction(&self.envelope_xdr()?)
            .await
            .map_err(|e| match e {
                RpcError::Server { code, message } => {
                    warn!(hash = %self.hash, code, %message, "submission refused");
                    TxError::Submission {
                        status: RPC_ERROR_STATUS.to_string(),
                        detail: format!("rpc error {code}: {message}"),
                    }
                }
                other => TxError::Rpc(other),
            })?;
        let status = match response.status.as_str() {
            "PENDING" => SendStatus::Pending,
            "DUPLICATE" => SendStatus::Duplicate,
            other => {
                warn!(hash = %self.hash, status = other, "submission rejected");
                return Err(TxError::Submission {
                    status: other.to_string(),
                    detail: response.error_result_xdr.unwrap_or_default(),
                });
            }
        };

        // The node's hash is authoritative; fall back to ours if it is malformed.
        let hash = TxHash::from_hex(&response.hash).unwrap_or(self.hash);
        info!(%hash, status = status.as_str(), "submitted");
        Ok(SubmissionResult {
            hash,
            status,
            latest_ledger: response.latest_ledger,
        })
    }
}

/// Submission status reported when `sendTransaction` answers with a
/// JSON-RPC error object instead of a status.
pub const RPC_ERROR_STATUS: &str = "RPC_ERROR";

/// How the node accepted a submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendStatus {
    Pending,
    /// Already known to the node; the original submission stands.
    Duplicate,
}

impl SendStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SendStatus::Pending => "PENDING",
            SendStatus::Duplicate => "DUPLICATE",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionResult {
    pub hash: TxHash,
    pub status: SendStatus,
    pub latest_ledger: u32,
}
