//! Nullable Soroban RPC: scripted responses, recorded calls.

use std::cell::RefCell;
use std::collections::VecDeque;

use soro_rpc::{
    GetTransactionResponse, LedgerRpc, RpcError, SendTransactionResponse,
    SimulateHostFunctionResult, SimulateTransactionResponse, StringOrNumber,
};
use soro_types::TxHash;

/// Base64 `SorobanTransactionData` with an empty footprint and zero fees.
pub const EMPTY_TX_DATA: &str = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RpcCall {
    Simulate(String),
    Send(String),
    Get(TxHash),
}

type Scripted<T> = RefCell<VecDeque<Result<T, RpcError>>>;

/// A ledger RPC that answers from per-method queues.
///
/// When a queue is empty the defaults apply: a complete simulation with a
/// resource fee of 100, a `PENDING` send, and a `NOT_FOUND` status. `fail_*`
/// scripts a transport failure ([`RpcError::Network`]); `refuse_*` scripts a
/// JSON-RPC error object from the node ([`RpcError::Server`]).
#[derive(Default)]
pub struct NullLedgerRpc {
    calls: RefCell<Vec<RpcCall>>,
    simulations: Scripted<SimulateTransactionResponse>,
    sends: Scripted<SendTransactionResponse>,
    statuses: Scripted<GetTransactionResponse>,
}

impl NullLedgerRpc {
    pub fn new() -> Self {
        Self::default()
    }

    /// A complete simulation with the given resource fee and auth entries.
    pub fn simulation_ok(min_resource_fee: i64, auth: Vec<String>) -> SimulateTransactionResponse {
        SimulateTransactionResponse {
            transaction_data: Some(EMPTY_TX_DATA.to_string()),
            min_resource_fee: Some(StringOrNumber::String(min_resource_fee.to_string())),
            results: vec![SimulateHostFunctionResult {
                auth,
                xdr: "AAAAAQ==".to_string(),
            }],
            latest_ledger: 100,
            error: None,
        }
    }

    pub fn respond_to_simulate(&self, response: SimulateTransactionResponse) {
        self.simulations.borrow_mut().push_back(Ok(response));
    }

    pub fn fail_simulate(&self, message: &str) {
        self.simulations
            .borrow_mut()
            .push_back(Err(RpcError::Network(message.to_string())));
    }

    pub fn refuse_simulate(&self, code: i64, message: &str) {
        self.simulations.borrow_mut().push_back(Err(RpcError::Server {
            code,
            message: message.to_string(),
        }));
    }

    pub fn refuse_send(&self, code: i64, message: &str) {
        self.sends.borrow_mut().push_back(Err(RpcError::Server {
            code,
            message: message.to_string(),
        }));
    }

    /// Script a `sendTransaction` status. An empty hash makes the caller keep
    /// its locally computed one.
    pub fn respond_to_send(&self, status: &str, hash: &str) {
        self.sends.borrow_mut().push_back(Ok(SendTransactionResponse {
            hash: hash.to_string(),
            status: status.to_string(),
            latest_ledger: 101,
            error_result_xdr: None,
        }));
    }

    pub fn respond_to_get(&self, status: &str) {
        self.statuses.borrow_mut().push_back(Ok(GetTransactionResponse {
            status: status.to_string(),
            latest_ledger: 102,
            ..Default::default()
        }));
    }

    pub fn fail_get(&self, message: &str) {
        self.statuses
            .borrow_mut()
            .push_back(Err(RpcError::Network(message.to_string())));
    }

    /// Every call made, in order.
    pub fn calls(&self) -> Vec<RpcCall> {
        self.calls.borrow().clone()
    }

    pub fn simulate_count(&self) -> usize {
        self.count(|c| matches!(c, RpcCall::Simulate(_)))
    }

    pub fn send_count(&self) -> usize {
        self.count(|c| matches!(c, RpcCall::Send(_)))
    }

    pub fn get_count(&self) -> usize {
        self.count(|c| matches!(c, RpcCall::Get(_)))
    }

    fn count(&self, pred: impl Fn(&RpcCall) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    fn next<T>(queue: &Scripted<T>, default: impl FnOnce() -> T) -> Result<T, RpcError> {
        match queue.borrow_mut().pop_front() {
            Some(Ok(v)) => Ok(v),
            Some(Err(e)) => Err(e),
            None => Ok(default()),
        }
    }
}

impl LedgerRpc for NullLedgerRpc {
    async fn simulate_transaction(
        &self,
        envelope_xdr: &str,
    ) -> Result<SimulateTransactionResponse, RpcError> {
        self.calls
            .borrow_mut()
            .push(RpcCall::Simulate(envelope_xdr.to_string()));
        Self::next(&self.simulations, || Self::simulation_ok(100, Vec::new()))
    }

    async fn send_transaction(
        &self,
        envelope_xdr: &str,
    ) -> Result<SendTransactionResponse, RpcError> {
        self.calls
            .borrow_mut()
            .push(RpcCall::Send(envelope_xdr.to_string()));
        Self::next(&self.sends, || SendTransactionResponse {
            hash: String::new(),
            status: "PENDING".to_string(),
            latest_ledger: 101,
            error_result_xdr: None,
        })
    }

    async fn get_transaction(&self, hash: &TxHash) -> Result<GetTransactionResponse, RpcError> {
        self.calls.borrow_mut().push(RpcCall::Get(*hash));
        Self::next(&self.statuses, || GetTransactionResponse {
            status: "NOT_FOUND".to_string(),
            latest_ledger: 102,
            ..Default::default()
        })
    }
}
