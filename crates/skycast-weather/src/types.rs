use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use skycast_core::{ConfigError, NetworkError, ReqwestErrorExt};

use crate::aggregate::{aggregate, DailyForecast};
use crate::icon::IconVariant;

/// The single message shown for any failed weather fetch
pub const FETCH_FAILED_MESSAGE: &str = "Unable to fetch weather data. Please check the location.";

/// The message shown when the device position cannot be determined
pub const LOCATE_FAILED_MESSAGE: &str = "Unable to retrieve your location.";

/// Geographic coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Returns `None` unless both values are finite and within range.
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        valid.then_some(Self {
            latitude,
            longitude,
        })
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// What the user asked for: a place name or a `"<lat>,<lon>"` pair
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    Name(String),
    Coordinates(Coordinates),
}

impl LocationQuery {
    /// Parse user input. The only rejected input is an empty one.
    pub fn parse(input: &str) -> Result<Self, WeatherError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(WeatherError::InvalidQuery(
                "location must not be empty".to_string(),
            ));
        }

        Ok(Self::parse_coordinates(input)
            .map(Self::Coordinates)
            .unwrap_or_else(|| Self::Name(input.to_string())))
    }

    fn parse_coordinates(input: &str) -> Option<Coordinates> {
        let (lat, lon) = input.split_once(',')?;
        let lat = lat.trim().parse::<f64>().ok()?;
        let lon = lon.trim().parse::<f64>().ok()?;
        Coordinates::new(lat, lon)
    }

    /// Provider query parameters selecting this location
    pub fn query_params(&self) -> String {
        match self {
            Self::Name(name) => format!("q={}", urlencoding::encode(name)),
            Self::Coordinates(c) => format!("lat={}&lon={}", c.latitude, c.longitude),
        }
    }
}

impl From<Coordinates> for LocationQuery {
    fn from(coordinates: Coordinates) -> Self {
        Self::Coordinates(coordinates)
    }
}

impl std::fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Coordinates(c) => write!(f, "{c}"),
        }
    }
}

/// Current weather conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub place_name: String,
    pub description: String,
    pub condition_code: i32,
    /// Provider icon code, e.g. `"04d"`
    pub icon_code: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub wind_speed: f64,
    pub observed_at: DateTime<Utc>,
}

impl CurrentConditions {
    pub fn icon_variant(&self) -> IconVariant {
        IconVariant::from_condition_code(self.condition_code)
    }
}

/// One 3-hourly forecast reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub condition_code: i32,
    pub icon_code: String,
}

/// Forecast samples in provider order, plus the location's UTC offset
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSeries {
    pub utc_offset: FixedOffset,
    pub samples: Vec<ForecastSample>,
}

/// Result of one successful fetch
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    pub forecast: ForecastSeries,
    pub fetched_at: DateTime<Utc>,
}

impl WeatherReport {
    /// Daily view with weekdays taken in the location's local time
    pub fn daily(&self) -> DailyForecast {
        aggregate(&self.forecast.samples, &self.forecast.utc_offset)
    }
}

/// Device location errors
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Location lookup failed: {0}")]
    Network(NetworkError),
    #[error("Location service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("Location lookup returned no usable position")]
    NoPosition,
    #[error("Location lookup task failed: {0}")]
    Interrupted(String),
}

impl LocationError {
    pub fn user_message(&self) -> &'static str {
        LOCATE_FAILED_MESSAGE
    }
}

impl From<reqwest::Error> for LocationError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e.into_network_error())
    }
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Invalid location: {0}")]
    InvalidQuery(String),
    #[error("Network error: {0}")]
    Network(NetworkError),
    #[error("Provider returned {status}: {message}")]
    Provider { status: u16, message: String },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Weather fetch task failed: {0}")]
    Interrupted(String),
}

impl WeatherError {
    /// Network failures and provider errors collapse to one message;
    /// the detail only goes to the log.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Config(e) => e.user_message(),
            _ => FETCH_FAILED_MESSAGE,
        }
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e.into_network_error())
    }
}
