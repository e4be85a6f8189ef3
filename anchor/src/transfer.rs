//! SEP-6 withdraw.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use soro_types::{Amount, PublicKey};
use tracing::{info, warn};

use crate::error::AnchorError;
use crate::info::AssetInfo;

/// How the withdraw request is sent. SEP-6 servers historically take query
/// parameters on `GET`; newer ones accept a JSON `POST` body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WithdrawMethod {
    Get,
    #[default]
    Post,
}

impl FromStr for WithdrawMethod {
    type Err = AnchorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(Self::Get),
            "post" => Ok(Self::Post),
            other => Err(AnchorError::InvalidResponse(format!(
                "unknown withdraw method {other:?}"
            ))),
        }
    }
}

impl fmt::Display for WithdrawMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "get",
            Self::Post => "post",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WithdrawRequest {
    pub asset_code: String,
    /// Withdraw type, e.g. `bank_account`.
    pub kind: String,
    pub account: PublicKey,
    pub amount: Amount,
    pub dest: Option<String>,
    pub dest_extra: Option<String>,
    /// Anchor-specific fields, sent as given.
    pub extra_fields: BTreeMap<String, String>,
}

impl WithdrawRequest {
    pub fn new(asset_code: &str, kind: &str, account: PublicKey, amount: Amount) -> Self {
        Self {
            asset_code: asset_code.to_string(),
            kind: kind.to_string(),
            account,
            amount,
            dest: None,
            dest_extra: None,
            extra_fields: BTreeMap::new(),
        }
    }

    pub fn with_dest(mut self, dest: &str) -> Self {
        self.dest = Some(dest.to_string());
        self
    }

    pub fn with_dest_extra(mut self, dest_extra: &str) -> Self {
        self.dest_extra = Some(dest_extra.to_string());
        self
    }

    pub fn with_field(mut self, name: &str, value: &str) -> Self {
        self.extra_fields.insert(name.to_string(), value.to_string());
        self
    }

    /// The flat parameter set sent to the anchor.
    ///
    /// Standard parameters are written last so extra fields cannot override
    /// them.
    pub fn to_fields(&self) -> BTreeMap<String, String> {
        let mut fields = self.extra_fields.clone();
        fields.insert("type".into(), self.kind.clone());
        fields.insert("asset_code".into(), self.asset_code.clone());
        fields.insert("amount".into(), self.amount.to_decimal_string());
        fields.insert("account".into(), self.account.account_id());
        if let Some(dest) = self.dest.as_ref().filter(|d| !d.is_empty()) {
            fields.insert("dest".into(), dest.clone());
        }
        if let Some(extra) = self.dest_extra.as_ref().filter(|d| !d.is_empty()) {
            fields.insert("dest_extra".into(), extra.clone());
        }
        fields
    }

    /// Fail on the first required field that is absent or empty.
    pub fn check_required(&self, asset: &AssetInfo) -> Result<(), AnchorError> {
        let provided = self.to_fields();
        for name in asset.required_fields(&self.kind) {
            if !provided.get(name).is_some_and(|v| !v.is_empty()) {
                return Err(AnchorError::MissingField(name.to_string()));
            }
        }
        Ok(())
    }
}

/// A successful withdraw answer: where and how to send the funds.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct WithdrawResponse {
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub memo_type: Option<String>,
    #[serde(default)]
    pub memo: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    /// Seconds until the funds are expected to arrive.
    #[serde(default)]
    pub eta: Option<u64>,
    #[serde(default)]
    pub min_amount: Option<f64>,
    #[serde(default)]
    pub max_amount: Option<f64>,
    #[serde(default)]
    pub fee_fixed: Option<f64>,
    #[serde(default)]
    pub fee_percent: Option<f64>,
    #[serde(default)]
    pub extra_info: Option<serde_json::Value>,
}

/// The anchor's own words for a refusal: `error`, else `type`, else the body.
fn rejection_reason(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .or_else(|| v.get("type"))
                .and_then(|r| r.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}

/// Send a withdraw request to `{transfer_server}/withdraw`.
pub async fn withdraw(
    http: &reqwest::Client,
    transfer_server: &str,
    token: Option<&str>,
    request: &WithdrawRequest,
    method: WithdrawMethod,
) -> Result<WithdrawResponse, AnchorError> {
    let url = format!("{}/withdraw", transfer_server.trim_end_matches('/'));
    let fields = request.to_fields();

    let mut builder = match method {
        WithdrawMethod::Post => http.post(&url).json(&fields),
        WithdrawMethod::Get => http.get(&url).query(&fields),
    };
    if let Some(token) = token {
        builder = builder.bearer_auth(token);
    }

    let response = builder.send().await?;
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        let reason = rejection_reason(&body);
        warn!(%status, %reason, asset = %request.asset_code, "withdraw rejected");
        return Err(AnchorError::Transfer {
            status: status.as_u16(),
            reason,
        });
    }

    let parsed: WithdrawResponse = serde_json::from_str(&body)
        .map_err(|e| AnchorError::InvalidResponse(format!("withdraw response: {e}")))?;
    info!(asset = %request.asset_code, id = ?parsed.id, "withdraw accepted");
    Ok(parsed)
}
