//! Weather client and provider endpoint configuration

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// HTTP client configuration shared by all providers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

const fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("drycast/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Where and how to reach one provider
#[derive(Clone)]
pub struct ProviderEndpoint {
    /// API base URL without trailing slash
    pub base_url: String,
    /// API key, if the provider needs one
    pub api_key: Option<SecretString>,
}

impl std::fmt::Debug for ProviderEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderEndpoint")
            .field("base_url", &self.base_url)
            .field(
                "api_key",
                &if self.api_key.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .finish()
    }
}

impl ProviderEndpoint {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: None,
        }
    }

    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(api_key.into()));
        self
    }

    /// The API key as a string reference, for building request URLs
    #[must_use]
    pub fn api_key_str(&self) -> Option<&str> {
        self.api_key
            .as_ref()
            .map(ExposeSecret::expose_secret)
            .filter(|key| !key.is_empty())
    }
}
