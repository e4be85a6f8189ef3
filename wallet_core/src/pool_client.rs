//! Lending-pool client.
//!
//! Drives a contract call through the whole transaction lifecycle: fresh
//! account lookup, build, simulate, finalize, sign, submit. Every
//! submission is recorded in a [`TransactionTracker`] under the caller's
//! [`RequestId`], so several transactions can be in flight at once.

use std::sync::Arc;
use std::time::Duration;

use soro_contract::SubmitCall;
use soro_rpc::{AccountDirectory, LedgerRpc};
use soro_transactions::{
    BuiltTransaction, RequestId, StatusPoller, SubmissionResult, TransactionTracker, TxError,
    BASE_FEE,
};
use soro_types::{
    Amount, ContractId, ContractInvocationRequest, ContractValue, KeyPair, Network,
    TransactionStatus,
};
use tracing::{debug, info, warn, Instrument};

use crate::error::ClientError;
use crate::metrics::ClientMetrics;
use crate::tracing_spans;

pub struct LendingPoolClient<D, R> {
    directory: D,
    rpc: R,
    network: Network,
    pool: ContractId,
    asset: ContractId,
    base_fee: u32,
    tracker: TransactionTracker,
    metrics: Arc<ClientMetrics>,
}

impl<D: AccountDirectory, R: LedgerRpc> LendingPoolClient<D, R> {
    pub fn new(directory: D, rpc: R, network: Network, pool: ContractId, asset: ContractId) -> Self {
        Self {
            directory,
            rpc,
            network,
            pool,
            asset,
            base_fee: BASE_FEE,
            tracker: TransactionTracker::new(),
            metrics: Arc::new(ClientMetrics::new()),
        }
    }

    pub fn with_base_fee(mut self, base_fee: u32) -> Self {
        self.base_fee = base_fee;
        self
    }

    /// Share a metrics registry with other clients.
    pub fn with_metrics(mut self, metrics: Arc<ClientMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn tracker(&self) -> &TransactionTracker {
        &self.tracker
    }

    pub fn metrics(&self) -> &ClientMetrics {
        &self.metrics
    }

    pub fn pool(&self) -> ContractId {
        self.pool
    }

    /// Deposit `amount` (a decimal string, e.g. `"10.5"`) of the pool's asset.
    ///
    /// The amount is validated before anything touches the network.
    pub async fn deposit(
        &self,
        id: RequestId,
        keypair: &KeyPair,
        amount: &str,
    ) -> Result<SubmissionResult, ClientError> {
        let span = tracing_spans::deposit_span(id.as_str(), amount);
        let amount = Amount::positive_from_decimal_str(amount)?;
        let request = SubmitCall::deposit(self.pool, self.asset, keypair.public, amount).into_request();
        self.run(id, keypair, request).instrument(span).await
    }

    /// Call any contract function with positional arguments.
    pub async fn invoke_contract(
        &self,
        id: RequestId,
        keypair: &KeyPair,
        contract: ContractId,
        function: &str,
        args: Vec<ContractValue>,
    ) -> Result<SubmissionResult, ClientError> {
        let span = tracing_spans::invoke_span(id.as_str(), &contract.to_strkey(), function);
        let request = ContractInvocationRequest::new(contract, function, args);
        self.run(id, keypair, request).instrument(span).await
    }

    async fn run(
        &self,
        id: RequestId,
        keypair: &KeyPair,
        request: ContractInvocationRequest,
    ) -> Result<SubmissionResult, ClientError> {
        // Claimed before any I/O so a concurrent call with the same id is
        // refused instead of reaching the node. Any early return below
        // releases the claim.
        let reservation = self.tracker.reserve(id.clone())?;

        // Always a fresh sequence number; nothing is cached between calls.
        let account = self.directory.get_account(&keypair.public).await?;
        let built = BuiltTransaction::invocation(&account, &request, self.base_fee)?;

        self.metrics.simulations.inc();
        let simulated = match built.simulate(&self.rpc).instrument(tracing_spans::simulate_span()).await {
            Ok(simulated) => simulated,
            Err(e) => {
                self.metrics.simulation_failures.inc();
                return Err(e.into());
            }
        };

        let signed = simulated.finalize()?.sign(keypair, &self.network)?;
        let span = tracing_spans::submit_span(&signed.hash().to_hex());
        let result = match signed.submit(&self.rpc).instrument(span).await {
            Ok(result) => result,
            Err(e) => {
                self.metrics.submissions_rejected.inc();
                return Err(e.into());
            }
        };
        self.metrics.submissions_accepted.inc();

        reservation.complete(result.hash);
        info!(request_id = %id, hash = %result.hash, "transaction in flight");
        Ok(result)
    }

    /// Current status of the transaction submitted under `id`.
    ///
    /// An id with no recorded submission is `Pending` and costs no RPC call.
    pub async fn check_status(&self, id: &RequestId) -> Result<TransactionStatus, ClientError> {
        let Some(hash) = self.tracker.hash_of(id) else {
            debug!(request_id = %id, "no submission recorded");
            return Ok(TransactionStatus::Pending);
        };

        self.metrics.status_polls.inc();
        let status = StatusPoller::new(&self.rpc)
            .check_status(&hash)
            .instrument(tracing_spans::status_poll_span(id.as_str()))
            .await?;
        self.tracker.observe(id, status);
        Ok(status)
    }

    /// Poll `id` until it succeeds or fails, at most `max_polls` times.
    pub async fn wait_for_terminal(
        &self,
        id: &RequestId,
        interval: Duration,
        max_polls: u32,
    ) -> Result<TransactionStatus, ClientError> {
        let Some(hash) = self.tracker.hash_of(id) else {
            return Ok(TransactionStatus::Pending);
        };
        for poll in 0..max_polls {
            if poll > 0 {
                tokio::time::sleep(interval).await;
            }
            let status = self.check_status(id).await?;
            if status.is_terminal() {
                return Ok(status);
            }
        }
        warn!(request_id = %id, %hash, max_polls, "gave up waiting");
        Err(TxError::PollTimeout {
            hash: hash.to_hex(),
            polls: max_polls,
        }
        .into())
    }
}
