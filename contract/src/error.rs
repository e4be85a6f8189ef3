use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContractError {
    /// A value cannot be represented in the ledger encoding.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// A ledger value kind with no client-side counterpart.
    #[error("unsupported ledger value: {0}")]
    Unsupported(String),

    #[error("operation is not a contract invocation")]
    NotAnInvocation,
}
