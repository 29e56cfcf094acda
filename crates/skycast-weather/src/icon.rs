//! Condition-code to icon classification.

use serde::{Deserialize, Serialize};

/// Icon variants derived from OpenWeatherMap condition codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IconVariant {
    Thunderstorm,
    Showers,
    Rain,
    Snow,
    Fog,
    #[default]
    Clear,
    PartlyCloudy,
    Cloudy,
}

impl IconVariant {
    /// Classify a provider condition code.
    /// See: https://openweathermap.org/weather-conditions
    pub fn from_condition_code(code: i32) -> Self {
        match code {
            200..=299 => Self::Thunderstorm,
            300..=399 => Self::Showers,
            500..=599 => Self::Rain,
            600..=699 => Self::Snow,
            700..=799 => Self::Fog,
            800 => Self::Clear,
            801 | 802 => Self::PartlyCloudy,
            803 | 804 => Self::Cloudy,
            _ => Self::Clear, // Unknown codes default to clear
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Thunderstorm => "Thunderstorm",
            Self::Showers => "Showers",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Fog => "Fog",
            Self::Clear => "Clear",
            Self::PartlyCloudy => "Partly Cloudy",
            Self::Cloudy => "Cloudy",
        }
    }

    /// Glyph used by the text renderer
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Thunderstorm => "⛈",
            Self::Showers => "🌦",
            Self::Rain => "🌧",
            Self::Snow => "❄",
            Self::Fog => "🌫",
            Self::Clear => "☀",
            Self::PartlyCloudy => "⛅",
            Self::Cloudy => "☁",
        }
    }
}

impl std::fmt::Display for IconVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// Shorthand for [`IconVariant::from_condition_code`].
pub fn classify_icon(code: i32) -> IconVariant {
    IconVariant::from_condition_code(code)
}

/// URL of the provider's PNG for an icon code such as `"10d"`.
pub fn icon_url(base_url: &str, icon_code: &str) -> String {
    format!("{}/{}.png", base_url.trim_end_matches('/'), icon_code)
}
