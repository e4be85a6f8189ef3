//! Prometheus metrics for the client.
//!
//! [`ClientMetrics`] owns a dedicated [`Registry`], so several clients in one
//! process never collide on metric names.

use prometheus::{register_int_counter_with_registry, Encoder, IntCounter, Opts, Registry, TextEncoder};

pub struct ClientMetrics {
    /// The Prometheus registry that owns every metric below.
    pub registry: Registry,

    /// `simulateTransaction` calls made.
    pub simulations: IntCounter,
    /// Simulations that errored or came back incomplete.
    pub simulation_failures: IntCounter,
    pub submissions_accepted: IntCounter,
    pub submissions_rejected: IntCounter,
    pub status_polls: IntCounter,
    pub anchor_auths: IntCounter,
    pub anchor_auth_failures: IntCounter,
    /// Withdraw requests the anchor accepted.
    pub withdrawals: IntCounter,
    pub withdrawal_failures: IntCounter,
}

fn counter(registry: &Registry, name: &str, help: &str) -> IntCounter {
    register_int_counter_with_registry!(Opts::new(name, help), registry)
        .expect("metric names are unique within a fresh registry")
}

impl ClientMetrics {
    pub fn new() -> Self {
        let registry = Registry::new();
        Self {
            simulations: counter(&registry, "soro_simulations_total", "Transaction simulations requested"),
            simulation_failures: counter(
                &registry,
                "soro_simulation_failures_total",
                "Simulations that failed or were incomplete",
            ),
            submissions_accepted: counter(
                &registry,
                "soro_submissions_accepted_total",
                "Transactions accepted by the RPC node",
            ),
            submissions_rejected: counter(
                &registry,
                "soro_submissions_rejected_total",
                "Transactions rejected at submission",
            ),
            status_polls: counter(&registry, "soro_status_polls_total", "getTransaction lookups"),
            anchor_auths: counter(&registry, "soro_anchor_auth_total", "Successful SEP-10 authentications"),
            anchor_auth_failures: counter(
                &registry,
                "soro_anchor_auth_failures_total",
                "Failed SEP-10 authentications",
            ),
            withdrawals: counter(&registry, "soro_withdrawals_total", "Withdraw requests accepted by an anchor"),
            withdrawal_failures: counter(
                &registry,
                "soro_withdrawal_failures_total",
                "Withdraw requests rejected or failed",
            ),
            registry,
        }
    }

    /// Prometheus text exposition of every metric.
    pub fn encode_text(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

impl Default for ClientMetrics {
    fn default() -> Self {
        Self::new()
    }
}
