use soro_contract::ContractError;
use soro_rpc::RpcError;
use thiserror::Error;

use crate::tracker::RequestId;

#[derive(Debug, Error)]
pub enum TxError {
    #[error("contract encoding: {0}")]
    Contract(#[from] ContractError),

    #[error("xdr: {0}")]
    Xdr(#[from] stellar_xdr::curr::Error),

    #[error(transparent)]
    Rpc(#[from] RpcError),

    /// The host function failed while simulating.
    #[error("simulation failed: {0}")]
    Simulation(String),

    /// Simulation answered without a field the transaction needs.
    #[error("simulation response is missing {0}")]
    SimulationIncomplete(&'static str),

    #[error("submission rejected ({status}): {detail}")]
    Submission { status: String, detail: String },

    #[error("fee overflow: {0}")]
    FeeOverflow(String),

    #[error("request {0} was already submitted")]
    DuplicateRequest(RequestId),

    #[error("invalid asset: {0}")]
    InvalidAsset(String),

    #[error("transaction {hash} still pending after {polls} polls")]
    PollTimeout { hash: String, polls: u32 },
}
