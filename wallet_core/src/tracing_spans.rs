//! Pre-built [`tracing::Span`] constructors for client operations.
//!
//! Consistent span names and field sets make it easy to filter and
//! correlate a single deposit or withdrawal across crates.

use tracing::{info_span, Span};

/// The full deposit pipeline for one request.
pub fn deposit_span(request_id: &str, amount: &str) -> Span {
    info_span!("deposit", request_id = %request_id, amount = %amount)
}

/// A generic contract call.
pub fn invoke_span(request_id: &str, contract: &str, function: &str) -> Span {
    info_span!("invoke", request_id = %request_id, contract = %contract, function = %function)
}

pub fn simulate_span() -> Span {
    info_span!("simulate")
}

pub fn submit_span(hash: &str) -> Span {
    info_span!("submit", hash = %hash)
}

pub fn status_poll_span(request_id: &str) -> Span {
    info_span!("status_poll", request_id = %request_id)
}

pub fn trustline_span(asset: &str) -> Span {
    info_span!("trustline", asset = %asset)
}

pub fn anchor_auth_span(domain: &str) -> Span {
    info_span!("anchor_auth", domain = %domain)
}

pub fn anchor_withdraw_span(domain: &str, asset: &str) -> Span {
    info_span!("anchor_withdraw", domain = %domain, asset = %asset)
}
