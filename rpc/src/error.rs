//! RPC error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("account not found: {0}")]
    AccountNotFound(String),

    /// Connection refused, DNS failure, timeout.
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// A JSON-RPC error object.
    #[error("rpc error {code}: {message}")]
    Server { code: i64, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The HTTP client could not be constructed (TLS backend, settings).
    #[error("http client: {0}")]
    Client(String),
}

impl RpcError {
    /// Whether no server was able to answer: connection failures and
    /// timeouts, plus overload and gateway responses (HTTP 5xx, 429).
    pub fn is_transport(&self) -> bool {
        match self {
            RpcError::Network(_) => true,
            RpcError::Http { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for RpcError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            RpcError::Network(format!("request timed out: {e}"))
        } else if e.is_connect() {
            RpcError::Network(format!("connection failed: {e}"))
        } else if e.is_decode() {
            RpcError::InvalidResponse(e.to_string())
        } else {
            RpcError::Network(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_classification() {
        assert!(RpcError::Network("refused".into()).is_transport());
        assert!(RpcError::Http { status: 503, body: String::new() }.is_transport());
        assert!(RpcError::Http { status: 429, body: String::new() }.is_transport());

        assert!(!RpcError::Http { status: 400, body: String::new() }.is_transport());
        assert!(!RpcError::Server { code: -32602, message: "invalid params".into() }.is_transport());
        assert!(!RpcError::InvalidResponse("eof".into()).is_transport());
        assert!(!RpcError::Client("no tls".into()).is_transport());
    }

    #[test]
    fn http_client_keeps_configured_timeouts() {
        let client = crate::http_client(
            std::time::Duration::from_secs(3),
            std::time::Duration::from_secs(1),
        );
        assert!(client.is_ok());
    }
}
