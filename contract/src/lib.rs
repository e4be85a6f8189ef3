//! Contract invocation builder.
//!
//! Turns [`ContractInvocationRequest`](soro_types::ContractInvocationRequest)s
//! into `InvokeHostFunction` operations and back. The lending-pool `submit`
//! call is assembled in [`pool`].

pub mod builder;
pub mod error;
pub mod pool;
pub mod scval;

pub use builder::{build_invocation, decode_invocation};
pub use error::ContractError;
pub use pool::{PoolRequest, SubmitCall, DEPOSIT_REQUEST_TYPE, SUBMIT_FUNCTION};
pub use scval::{decode_address, decode_value, encode_address, encode_symbol, encode_value, xdr_account_id};
