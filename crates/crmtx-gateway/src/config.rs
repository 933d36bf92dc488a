use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{GatewayError, GatewayResult};

/// Environment variable holding the bearer credential.
pub const TOKEN_ENV: &str = "CRMTX_ACCESS_TOKEN";

/// Environment variable overriding the API base URL.
pub const BASE_URL_ENV: &str = "CRMTX_BASE_URL";

/// Bearer credential for the remote CRM.
///
/// `Debug` redacts the token so it never leaks through logs or panics.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Value of the `authorization` header.
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Configuration for a REST gateway.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Base URL the transport resolves request paths against.
    pub base_url: String,
    /// Bearer credential attached to every request.
    pub access_token: AccessToken,
    /// Maximum wall-clock time allowed per remote call.
    pub timeout: Duration,
}

impl GatewayConfig {
    pub fn new(access_token: AccessToken) -> Self {
        Self {
            base_url: "https://api.hubapi.com".into(),
            access_token,
            timeout: Duration::from_secs(30),
        }
    }

    /// Read the credential (and optionally the base URL) from the process
    /// environment.
    pub fn from_env() -> GatewayResult<Self> {
        let token = std::env::var(TOKEN_ENV)
            .map_err(|_| GatewayError::MissingCredential(TOKEN_ENV.into()))?;
        let mut config = Self::new(AccessToken::new(token));
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            config.base_url = base_url;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_token() {
        let token = AccessToken::new("pat-secret-value");
        assert_eq!(format!("{token:?}"), "AccessToken(***)");
        let config = GatewayConfig::new(token);
        assert!(!format!("{config:?}").contains("secret"));
    }

    #[test]
    fn bearer_header_format() {
        let token = AccessToken::new("abc");
        assert_eq!(token.bearer_header(), "Bearer abc");
    }

    #[test]
    fn new_uses_production_defaults() {
        let config = GatewayConfig::new(AccessToken::new("t"));
        assert_eq!(config.base_url, "https://api.hubapi.com");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }
}
