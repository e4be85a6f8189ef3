//! Wire shapes of Horizon and Soroban RPC responses.

use serde::{Deserialize, Serialize};

use crate::error::RpcError;

/// Some RPC versions send 64-bit integers as strings, others as numbers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringOrNumber {
    Number(i64),
    String(String),
}

impl StringOrNumber {
    pub fn as_i64(&self) -> Result<i64, RpcError> {
        match self {
            StringOrNumber::Number(n) => Ok(*n),
            StringOrNumber::String(s) => s
                .trim()
                .parse()
                .map_err(|_| RpcError::InvalidResponse(format!("not an integer: {s:?}"))),
        }
    }
}

/// `GET /accounts/{id}`.
#[derive(Clone, Debug, Deserialize)]
pub struct HorizonAccountResponse {
    pub id: String,
    /// Decimal string.
    pub sequence: String,
}

impl HorizonAccountResponse {
    pub fn sequence(&self) -> Result<i64, RpcError> {
        self.sequence.parse().map_err(|_| {
            RpcError::InvalidResponse(format!("account sequence {:?}", self.sequence))
        })
    }
}

/// `POST /transactions`.
#[derive(Clone, Debug, Deserialize)]
pub struct HorizonTransactionResponse {
    pub hash: String,
    #[serde(default)]
    pub successful: bool,
    #[serde(default)]
    pub ledger: Option<u32>,
}

/// One entry of `simulateTransaction.results`.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct SimulateHostFunctionResult {
    /// Base64 `SorobanAuthorizationEntry` values.
    #[serde(default)]
    pub auth: Vec<String>,
    /// Base64 return value.
    #[serde(default)]
    pub xdr: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateTransactionResponse {
    /// Base64 `SorobanTransactionData`.
    #[serde(default)]
    pub transaction_data: Option<String>,
    #[serde(default)]
    pub min_resource_fee: Option<StringOrNumber>,
    #[serde(default)]
    pub results: Vec<SimulateHostFunctionResult>,
    #[serde(default)]
    pub latest_ledger: u32,
    /// Set when the host function failed during simulation.
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendTransactionResponse {
    pub hash: String,
    /// `PENDING`, `DUPLICATE`, `TRY_AGAIN_LATER` or `ERROR`.
    pub status: String,
    #[serde(default)]
    pub latest_ledger: u32,
    #[serde(default)]
    pub error_result_xdr: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTransactionResponse {
    /// `SUCCESS`, `FAILED` or `NOT_FOUND`.
    pub status: String,
    #[serde(default)]
    pub latest_ledger: u32,
    #[serde(default)]
    pub ledger: Option<u32>,
    #[serde(default)]
    pub result_xdr: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_resource_fee_as_string_or_number() {
        let a: SimulateTransactionResponse =
            serde_json::from_str(r#"{"minResourceFee":"58181","latestLedger":7}"#).unwrap();
        assert_eq!(a.min_resource_fee.unwrap().as_i64().unwrap(), 58181);
        assert_eq!(a.latest_ledger, 7);

        let b: SimulateTransactionResponse =
            serde_json::from_str(r#"{"minResourceFee":120}"#).unwrap();
        assert_eq!(b.min_resource_fee.unwrap().as_i64().unwrap(), 120);
    }

    #[test]
    fn simulation_fields_optional() {
        let sim: SimulateTransactionResponse =
            serde_json::from_str(r#"{"error":"HostError: trapped","latestLedger":1}"#).unwrap();
        assert!(sim.transaction_data.is_none());
        assert!(sim.min_resource_fee.is_none());
        assert_eq!(sim.error.as_deref(), Some("HostError: trapped"));
    }

    #[test]
    fn bad_sequence_is_invalid_response() {
        let acct = HorizonAccountResponse {
            id: "G".into(),
            sequence: "12x".into(),
        };
        assert!(matches!(acct.sequence(), Err(RpcError::InvalidResponse(_))));
    }
}
