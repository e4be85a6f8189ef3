//! Ledger transport for the Soroban client.
//!
//! Two services are spoken to:
//! - Horizon REST, for account sequence numbers and classic submissions
//! - Soroban JSON-RPC 2.0, for simulation, submission and status lookups
//!
//! Both are exposed behind traits so orchestration code can run against the
//! deterministic doubles in `soro-nullables`.

pub mod error;
pub mod horizon;
pub mod responses;
pub mod soroban;

use std::time::Duration;

use soro_types::{Account, PublicKey, TxHash};

pub use error::RpcError;
pub use horizon::HorizonClient;
pub use responses::{
    GetTransactionResponse, HorizonAccountResponse, HorizonTransactionResponse,
    SendTransactionResponse, SimulateHostFunctionResult, SimulateTransactionResponse,
    StringOrNumber,
};
pub use soroban::SorobanRpcClient;

/// Default overall timeout for a single request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connection timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the shared HTTP client with the given timeouts.
pub fn http_client(
    request_timeout: Duration,
    connect_timeout: Duration,
) -> Result<reqwest::Client, RpcError> {
    reqwest::Client::builder()
        .timeout(request_timeout)
        .connect_timeout(connect_timeout)
        .build()
        .map_err(|e| RpcError::Client(e.to_string()))
}

/// Read-only account lookup.
#[allow(async_fn_in_trait)]
pub trait AccountDirectory {
    /// Fetch the account's current sequence number.
    async fn get_account(&self, id: &PublicKey) -> Result<Account, RpcError>;
}

/// Submission of classic (non-contract) transactions.
#[allow(async_fn_in_trait)]
pub trait ClassicSubmitter {
    async fn submit_classic(&self, envelope_xdr: &str)
        -> Result<HorizonTransactionResponse, RpcError>;
}

/// The three Soroban JSON-RPC methods the transaction pipeline needs.
///
/// Envelopes are passed as base64 XDR so this crate stays independent of the
/// XDR types.
#[allow(async_fn_in_trait)]
pub trait LedgerRpc {
    async fn simulate_transaction(
        &self,
        envelope_xdr: &str,
    ) -> Result<SimulateTransactionResponse, RpcError>;

    async fn send_transaction(&self, envelope_xdr: &str)
        -> Result<SendTransactionResponse, RpcError>;

    async fn get_transaction(&self, hash: &TxHash) -> Result<GetTransactionResponse, RpcError>;
}
