//! stellar.toml discovery.

use serde::Deserialize;
use soro_types::PublicKey;
use tracing::debug;

use crate::error::AnchorError;

/// The entries of an anchor's stellar.toml this client reads.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct StellarToml {
    #[serde(rename = "WEB_AUTH_ENDPOINT")]
    pub web_auth_endpoint: Option<String>,
    #[serde(rename = "SIGNING_KEY")]
    pub signing_key: Option<String>,
    #[serde(rename = "TRANSFER_SERVER")]
    pub transfer_server: Option<String>,
    #[serde(rename = "TRANSFER_SERVER_SEP0024")]
    pub transfer_server_sep0024: Option<String>,
    #[serde(rename = "NETWORK_PASSPHRASE")]
    pub network_passphrase: Option<String>,
}

impl StellarToml {
    pub fn parse(text: &str) -> Result<Self, AnchorError> {
        toml::from_str(text).map_err(|e| AnchorError::Discovery(format!("stellar.toml: {e}")))
    }

    pub fn web_auth_endpoint(&self) -> Result<&str, AnchorError> {
        required(&self.web_auth_endpoint, "WEB_AUTH_ENDPOINT")
    }

    pub fn signing_key(&self) -> Result<PublicKey, AnchorError> {
        let key = required(&self.signing_key, "SIGNING_KEY")?;
        PublicKey::from_account_id(key)
            .map_err(|e| AnchorError::Discovery(format!("SIGNING_KEY: {e}")))
    }

    /// The SEP-6 transfer server, trailing slash removed.
    pub fn transfer_server(&self) -> Result<&str, AnchorError> {
        required(&self.transfer_server, "TRANSFER_SERVER").map(|s| s.trim_end_matches('/'))
    }
}

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, AnchorError> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AnchorError::Discovery(format!("stellar.toml has no {name}")))
}

/// Well-known location of a home domain's stellar.toml.
pub fn stellar_toml_url(home_domain: &str) -> String {
    format!("https://{home_domain}/.well-known/stellar.toml")
}

pub async fn fetch_stellar_toml(
    http: &reqwest::Client,
    url: &str,
) -> Result<StellarToml, AnchorError> {
    debug!(url, "fetching stellar.toml");
    let response = http.get(url).send().await?;
    if !response.status().is_success() {
        return Err(AnchorError::Discovery(format!(
            "{url} returned HTTP {}",
            response.status()
        )));
    }
    let text = response.text().await?;
    StellarToml::parse(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
NETWORK_PASSPHRASE = "Test SDF Network ; September 2015"
WEB_AUTH_ENDPOINT = "https://testanchor.stellar.org/auth"
TRANSFER_SERVER = "https://testanchor.stellar.org/sep6/"
TRANSFER_SERVER_SEP0024 = "https://testanchor.stellar.org/sep24"
SIGNING_KEY = "GCHLHDBOKG2JWMJQBTLSL5XG6NO7ESXI2TAQKZXCXWXB5WI2X6W233PR"

[[CURRENCIES]]
code = "SRT"
issuer = "GCDNJUBQSX7AJWLJACMJ7I4BC3Z47BQUTMHEICZLE6MU4KQBRYG5JY6B"
"#;

    #[test]
    fn parses_known_entries_and_ignores_the_rest() {
        let toml = StellarToml::parse(SAMPLE).unwrap();
        assert_eq!(toml.web_auth_endpoint().unwrap(), "https://testanchor.stellar.org/auth");
        assert_eq!(toml.transfer_server().unwrap(), "https://testanchor.stellar.org/sep6");
        assert_eq!(
            toml.transfer_server_sep0024.as_deref(),
            Some("https://testanchor.stellar.org/sep24")
        );
        assert!(toml.signing_key().is_ok());
    }

    #[test]
    fn missing_entries_are_discovery_errors() {
        let toml = StellarToml::parse("FEDERATION_SERVER = \"x\"").unwrap();
        assert!(matches!(toml.web_auth_endpoint(), Err(AnchorError::Discovery(_))));
        assert!(matches!(toml.transfer_server(), Err(AnchorError::Discovery(_))));
    }

    #[test]
    fn malformed_toml_rejected() {
        assert!(StellarToml::parse("WEB_AUTH_ENDPOINT = ").is_err());
    }

    #[test]
    fn well_known_url() {
        assert_eq!(
            stellar_toml_url("testanchor.stellar.org"),
            "https://testanchor.stellar.org/.well-known/stellar.toml"
        );
    }
}
