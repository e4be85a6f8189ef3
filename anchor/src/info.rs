//! SEP-6 `/info`: per-asset capabilities and field requirements.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::AnchorError;

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct InfoResponse {
    #[serde(default)]
    pub deposit: BTreeMap<String, AssetInfo>,
    #[serde(default)]
    pub withdraw: BTreeMap<String, AssetInfo>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct AssetInfo {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default, alias = "authenticationRequired")]
    pub authentication_required: bool,
    #[serde(default)]
    pub fee_fixed: Option<f64>,
    #[serde(default)]
    pub fee_percent: Option<f64>,
    #[serde(default)]
    pub min_amount: Option<f64>,
    #[serde(default)]
    pub max_amount: Option<f64>,
    /// Fields that apply regardless of type (deposit style).
    #[serde(default)]
    pub fields: BTreeMap<String, FieldInfo>,
    /// Withdraw types such as `bank_account`, each with its own fields.
    #[serde(default)]
    pub types: BTreeMap<String, TypeInfo>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct TypeInfo {
    #[serde(default)]
    pub fields: BTreeMap<String, FieldInfo>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct FieldInfo {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub choices: Option<Vec<String>>,
}

impl InfoResponse {
    /// Capabilities for withdrawing `asset_code`.
    ///
    /// Anchors that only describe an asset under `deposit` are consulted
    /// there as a fallback.
    pub fn withdraw_asset(&self, asset_code: &str) -> Result<&AssetInfo, AnchorError> {
        self.withdraw
            .get(asset_code)
            .or_else(|| self.deposit.get(asset_code))
            .filter(|info| info.enabled != Some(false))
            .ok_or_else(|| AnchorError::UnsupportedAsset(asset_code.to_string()))
    }
}

impl AssetInfo {
    /// Names of the non-optional fields for a withdraw of type `kind`.
    pub fn required_fields(&self, kind: &str) -> Vec<&str> {
        let typed = self.types.get(kind).map(|t| &t.fields);
        self.fields
            .iter()
            .chain(typed.into_iter().flatten())
            .filter(|(_, field)| !field.optional)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INFO: &str = r#"{
        "deposit": {
            "SRT": {
                "enabled": true,
                "authentication_required": true,
                "fields": {}
            },
            "KES": { "enabled": true, "authenticationRequired": false }
        },
        "withdraw": {
            "USDC": {
                "enabled": true,
                "authentication_required": true,
                "types": {
                    "bank_account": {
                        "fields": {
                            "dest": { "description": "account number" },
                            "dest_extra": { "description": "routing number" },
                            "bank_branch": { "description": "branch", "optional": true }
                        }
                    },
                    "cash": { "fields": {} }
                }
            },
            "OFF": { "enabled": false }
        }
    }"#;

    fn info() -> InfoResponse {
        serde_json::from_str(INFO).unwrap()
    }

    #[test]
    fn withdraw_lookup_falls_back_to_deposit() {
        let info = info();
        assert!(info.withdraw_asset("USDC").unwrap().authentication_required);
        assert!(info.withdraw_asset("SRT").unwrap().authentication_required);
        assert!(!info.withdraw_asset("KES").unwrap().authentication_required);
    }

    #[test]
    fn unknown_or_disabled_asset_unsupported() {
        let info = info();
        assert!(matches!(
            info.withdraw_asset("XYZ"),
            Err(AnchorError::UnsupportedAsset(code)) if code == "XYZ"
        ));
        assert!(info.withdraw_asset("OFF").is_err());
    }

    #[test]
    fn required_fields_per_type() {
        let info = info();
        let usdc = info.withdraw_asset("USDC").unwrap();
        assert_eq!(usdc.required_fields("bank_account"), vec!["dest", "dest_extra"]);
        assert!(usdc.required_fields("cash").is_empty());
        assert!(usdc.required_fields("unknown").is_empty());
    }
}
