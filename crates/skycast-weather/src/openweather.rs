//! OpenWeatherMap 2.5 wire schema and conversion into domain types.
//!
//! Only the fields the dashboard uses are modelled; everything else in the
//! provider responses is ignored.

use chrono::{DateTime, FixedOffset, Utc};
use serde::Deserialize;

use crate::types::{CurrentConditions, ForecastSample, ForecastSeries, WeatherError};

#[derive(Debug, Deserialize)]
pub(crate) struct Condition {
    pub id: i32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MainReadings {
    pub temp: f64,
    #[serde(default)]
    pub feels_like: Option<f64>,
    #[serde(default)]
    pub humidity: Option<u8>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Wind {
    pub speed: f64,
}

/// `GET /weather`
#[derive(Debug, Deserialize)]
pub(crate) struct CurrentResponse {
    pub dt: i64,
    #[serde(default)]
    pub name: String,
    pub main: MainReadings,
    #[serde(default)]
    pub weather: Vec<Condition>,
    pub wind: Option<Wind>,
}

/// One entry of `list` in `GET /forecast`
#[derive(Debug, Deserialize)]
pub(crate) struct ForecastEntry {
    pub dt: i64,
    pub main: MainReadings,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct City {
    /// Shift in seconds from UTC
    #[serde(default)]
    pub timezone: i32,
}

/// `GET /forecast`
#[derive(Debug, Deserialize)]
pub(crate) struct ForecastResponse {
    #[serde(default)]
    pub list: Vec<ForecastEntry>,
    pub city: Option<City>,
}

/// Error body returned with non-success statuses, e.g.
/// `{"cod":"404","message":"city not found"}`
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
}

fn timestamp(dt: i64) -> Result<DateTime<Utc>, WeatherError> {
    DateTime::from_timestamp(dt, 0)
        .ok_or_else(|| WeatherError::Parse(format!("timestamp out of range: {dt}")))
}

fn primary_condition(weather: &[Condition], dt: i64) -> Result<&Condition, WeatherError> {
    weather
        .first()
        .ok_or_else(|| WeatherError::Parse(format!("no weather condition for dt={dt}")))
}

impl TryFrom<CurrentResponse> for CurrentConditions {
    type Error = WeatherError;

    fn try_from(resp: CurrentResponse) -> Result<Self, Self::Error> {
        let condition = primary_condition(&resp.weather, resp.dt)?;

        Ok(Self {
            place_name: resp.name,
            description: condition.description.clone(),
            condition_code: condition.id,
            icon_code: condition.icon.clone(),
            temperature: resp.main.temp,
            feels_like: resp.main.feels_like.unwrap_or(resp.main.temp),
            humidity: resp.main.humidity.unwrap_or_default(),
            wind_speed: resp.wind.as_ref().map_or(0.0, |w| w.speed),
            observed_at: timestamp(resp.dt)?,
        })
    }
}

impl TryFrom<ForecastEntry> for ForecastSample {
    type Error = WeatherError;

    fn try_from(entry: ForecastEntry) -> Result<Self, Self::Error> {
        let condition = primary_condition(&entry.weather, entry.dt)?;

        Ok(Self {
            timestamp: timestamp(entry.dt)?,
            temperature: entry.main.temp,
            condition_code: condition.id,
            icon_code: condition.icon.clone(),
        })
    }
}

impl TryFrom<ForecastResponse> for ForecastSeries {
    type Error = WeatherError;

    fn try_from(resp: ForecastResponse) -> Result<Self, Self::Error> {
        let shift = resp.city.map(|c| c.timezone).unwrap_or_default();

        let utc_offset = FixedOffset::east_opt(shift)
            .ok_or_else(|| WeatherError::Parse(format!("invalid timezone shift: {shift}")))?;

        let samples = resp
            .list
            .into_iter()
            .map(ForecastSample::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            utc_offset,
            samples,
        })
    }
}
