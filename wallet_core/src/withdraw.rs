//! Anchor withdraw flow.
//!
//! discover → info → validate the request against the asset's declared
//! fields → authenticate when the asset requires it → withdraw. An
//! authentication failure ends the flow before `/withdraw` is called.

use std::sync::Arc;

use soro_anchor::{AnchorClient, InfoResponse, WithdrawMethod, WithdrawRequest, WithdrawResponse};
use soro_types::{Clock, KeyPair, Network};
use tracing::{debug, warn, Instrument};

use crate::error::ClientError;
use crate::metrics::ClientMetrics;
use crate::tracing_spans;

pub struct AnchorTransferClient<C> {
    anchor: AnchorClient,
    network: Network,
    method: WithdrawMethod,
    clock: C,
    metrics: Arc<ClientMetrics>,
}

impl<C: Clock> AnchorTransferClient<C> {
    pub fn new(anchor: AnchorClient, network: Network, clock: C) -> Self {
        Self {
            anchor,
            network,
            method: WithdrawMethod::default(),
            clock,
            metrics: Arc::new(ClientMetrics::new()),
        }
    }

    pub fn with_method(mut self, method: WithdrawMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<ClientMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &ClientMetrics {
        &self.metrics
    }

    /// The anchor's SEP-6 capabilities.
    pub async fn info(&self) -> Result<InfoResponse, ClientError> {
        let toml = self.anchor.discover().await?;
        Ok(self.anchor.info(&toml).await?)
    }

    pub async fn withdraw(
        &self,
        keypair: &KeyPair,
        request: &WithdrawRequest,
    ) -> Result<WithdrawResponse, ClientError> {
        let span = tracing_spans::anchor_withdraw_span(self.anchor.home_domain(), &request.asset_code);
        self.run_withdraw(keypair, request).instrument(span).await
    }

    async fn run_withdraw(
        &self,
        keypair: &KeyPair,
        request: &WithdrawRequest,
    ) -> Result<WithdrawResponse, ClientError> {
        let toml = self.anchor.discover().await?;
        let info = self.anchor.info(&toml).await?;
        let asset = info.withdraw_asset(&request.asset_code)?;
        request.check_required(asset)?;

        let session = if asset.authentication_required {
            let auth = self
                .anchor
                .authenticate(&toml, keypair, self.network.passphrase(), &self.clock)
                .instrument(tracing_spans::anchor_auth_span(self.anchor.home_domain()))
                .await;
            match auth {
                Ok(session) => {
                    self.metrics.anchor_auths.inc();
                    Some(session)
                }
                Err(e) => {
                    self.metrics.anchor_auth_failures.inc();
                    warn!(error = %e, "not withdrawing without a session");
                    return Err(e.into());
                }
            }
        } else {
            debug!(asset = %request.asset_code, "no authentication required");
            None
        };

        let response = self
            .anchor
            .withdraw(&toml, session.as_ref(), request, self.method)
            .await
            .inspect_err(|_| self.metrics.withdrawal_failures.inc())?;
        self.metrics.withdrawals.inc();
        Ok(response)
    }
}
