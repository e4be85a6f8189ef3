//! Soroban lending-pool client core.
//!
//! Ties the lower crates together into the operations a wallet exposes:
//! pool deposits and arbitrary contract calls ([`LendingPoolClient`]),
//! classic trustlines ([`create_trustline`]) and anchor withdrawals
//! ([`AnchorTransferClient`]), plus configuration, the error taxonomy,
//! metrics and tracing spans shared by all of them.

pub mod config;
pub mod error;
pub mod metrics;
pub mod pool_client;
pub mod tracing_spans;
pub mod trustline;
pub mod withdraw;

pub use config::ClientConfig;
pub use error::{ClientError, ErrorKind};
pub use metrics::ClientMetrics;
pub use pool_client::LendingPoolClient;
pub use trustline::{create_trustline, TrustlineResult};
pub use withdraw::AnchorTransferClient;
