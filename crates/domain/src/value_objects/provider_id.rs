//! Forecast provider identifier

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::DomainError;

/// Third-party weather forecast source
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderId {
    /// Weatherbit daily forecast API
    Weatherbit,
    /// Open-Meteo forecast API (no key required)
    OpenMeteo,
    /// Visual Crossing timeline API
    VisualCrossing,
    /// WeatherAPI.com forecast API
    WeatherApi,
}

impl ProviderId {
    /// All known providers, in default query order
    pub const ALL: [Self; 4] = [
        Self::Weatherbit,
        Self::OpenMeteo,
        Self::VisualCrossing,
        Self::WeatherApi,
    ];

    /// Human-readable provider name
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Weatherbit => "Weatherbit",
            Self::OpenMeteo => "Open-Meteo",
            Self::VisualCrossing => "Visual Crossing",
            Self::WeatherApi => "WeatherAPI",
        }
    }

    /// Stable machine name, used in config keys and JSON
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Weatherbit => "weatherbit",
            Self::OpenMeteo => "open_meteo",
            Self::VisualCrossing => "visual_crossing",
            Self::WeatherApi => "weather_api",
        }
    }

    /// Whether the provider needs an API key
    #[must_use]
    pub const fn requires_api_key(&self) -> bool {
        !matches!(self, Self::OpenMeteo)
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for ProviderId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "weatherbit" => Ok(Self::Weatherbit),
            "open_meteo" | "openmeteo" => Ok(Self::OpenMeteo),
            "visual_crossing" | "visualcrossing" => Ok(Self::VisualCrossing),
            "weather_api" | "weatherapi" => Ok(Self::WeatherApi),
            _ => Err(DomainError::UnknownProvider(s.to_string())),
        }
    }
}
