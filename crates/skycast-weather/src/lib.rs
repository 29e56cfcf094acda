//! Weather service for Skycast
//!
//! Fetches current conditions and the 5-day/3-hour forecast from
//! OpenWeatherMap, reduces the forecast to one reading per weekday and
//! classifies condition codes into icon variants.

pub mod aggregate;
pub mod icon;
pub mod location;
mod openweather;
pub mod provider;
pub mod types;

pub use aggregate::{aggregate, DailyForecast, DailySummary};
pub use icon::{classify_icon, icon_url, IconVariant};
pub use location::IpLocator;
pub use provider::WeatherProvider;
pub use types::*;
