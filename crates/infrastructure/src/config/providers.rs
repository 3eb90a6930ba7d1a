//! Per-provider configuration

use domain::ProviderId;
use integration_weather::{ProviderEndpoint, default_base_url};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::default_true;

/// Settings for one forecast provider
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Whether the provider is queried (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Override for the provider's API base URL
    #[serde(default)]
    pub base_url: Option<String>,

    /// API key (never serialized or logged)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("enabled", &self.enabled)
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

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: None,
            api_key: None,
        }
    }
}

impl ProviderConfig {
    /// Whether a non-empty API key is configured
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().is_empty())
    }

    /// Base URL in effect for `provider`
    #[must_use]
    pub fn base_url_for(&self, provider: ProviderId) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| default_base_url(provider))
    }

    /// Endpoint handed to the provider adapter
    #[must_use]
    pub fn endpoint(&self, provider: ProviderId) -> ProviderEndpoint {
        ProviderEndpoint {
            api_key: self.api_key.clone(),
            ..ProviderEndpoint::new(self.base_url_for(provider))
        }
    }
}

/// Settings for every supported provider
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub weatherbit: ProviderConfig,

    #[serde(default)]
    pub open_meteo: ProviderConfig,

    #[serde(default)]
    pub visual_crossing: ProviderConfig,

    #[serde(default)]
    pub weather_api: ProviderConfig,
}

impl ProvidersConfig {
    #[must_use]
    pub const fn get(&self, provider: ProviderId) -> &ProviderConfig {
        match provider {
            ProviderId::Weatherbit => &self.weatherbit,
            ProviderId::OpenMeteo => &self.open_meteo,
            ProviderId::VisualCrossing => &self.visual_crossing,
            ProviderId::WeatherApi => &self.weather_api,
        }
    }

    /// All providers in query order
    pub fn iter(&self) -> impl Iterator<Item = (ProviderId, &ProviderConfig)> {
        ProviderId::ALL
            .into_iter()
            .map(move |provider| (provider, self.get(provider)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_enabled_without_key() {
        let config = ProviderConfig::default();
        assert!(config.enabled);
        assert!(!config.has_api_key());
        assert_eq!(
            config.base_url_for(ProviderId::OpenMeteo),
            "https://api.open-meteo.com/v1"
        );
    }

    #[test]
    fn test_empty_key_is_not_configured() {
        let config = ProviderConfig {
            api_key: Some(SecretString::from(String::new())),
            ..ProviderConfig::default()
        };
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_endpoint_uses_override_and_key() {
        let config = ProviderConfig {
            base_url: Some("http://localhost:8080/".to_string()),
            api_key: Some(SecretString::from("k".to_string())),
            ..ProviderConfig::default()
        };
        let endpoint = config.endpoint(ProviderId::Weatherbit);
        assert_eq!(endpoint.base_url, "http://localhost:8080");
        assert_eq!(endpoint.api_key_str(), Some("k"));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = ProviderConfig {
            api_key: Some(SecretString::from("hunter2".to_string())),
            ..ProviderConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_iter_follows_provider_order() {
        let providers: Vec<_> = ProvidersConfig::default().iter().map(|(p, _)| p).collect();
        assert_eq!(providers, ProviderId::ALL.to_vec());
    }
}
