//! OpenWeatherMap client: current conditions plus the 5-day/3-hour forecast.

use std::sync::Arc;

use chrono::Utc;
use reqwest::Client;
use serde::de::DeserializeOwned;
use skycast_core::{ConfigError, Units, WeatherConfig};
use tracing::instrument;

use crate::openweather::{CurrentResponse, ErrorBody, ForecastResponse};
use crate::types::{
    CurrentConditions, ForecastSeries, LocationQuery, WeatherError, WeatherReport,
};

const USER_AGENT: &str = concat!("Skycast/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
    units: Units,
}

impl WeatherProvider {
    /// Build a provider from the `[weather]` config section.
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ConfigError::MissingSetting("weather.api_key".to_string()))?;

        Self::with_base_url(api_key, &config.base_url, config.units)
    }

    pub fn with_base_url(api_key: &str, base_url: &str, units: Units) -> Result<Self, WeatherError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            units,
        })
    }

    pub fn units(&self) -> Units {
        self.units
    }

    fn endpoint_url(&self, endpoint: &str, query: &LocationQuery) -> String {
        format!(
            "{}/{}?{}&appid={}&units={}",
            self.base_url,
            endpoint,
            query.query_params(),
            urlencoding::encode(&self.api_key),
            self.units.as_query(),
        )
    }

    /// URL with the API key masked, for logs
    fn redacted(&self, url: &str) -> String {
        let key_param = format!("appid={}", urlencoding::encode(&self.api_key));
        url.replace(&key_param, "appid=***")
    }

    /// Fetch current conditions and the forecast concurrently.
    ///
    /// Both requests must succeed; the first failure is returned and the
    /// other request is dropped.
    #[instrument(skip(self, query), fields(query = %query), level = "info")]
    pub async fn fetch(&self, query: &LocationQuery) -> Result<WeatherReport, WeatherError> {
        tracing::info!("Fetching weather for location: {}", query);

        let (current, forecast) =
            tokio::try_join!(self.fetch_current(query), self.fetch_forecast(query))?;

        tracing::info!(
            "Weather for {} received: {} forecast samples",
            current.place_name,
            forecast.samples.len()
        );

        Ok(WeatherReport {
            current,
            forecast,
            fetched_at: Utc::now(),
        })
    }

    /// `GET /weather`
    pub async fn fetch_current(
        &self,
        query: &LocationQuery,
    ) -> Result<CurrentConditions, WeatherError> {
        let url = self.endpoint_url("weather", query);
        let resp: CurrentResponse = self.get_json(&url).await?;
        CurrentConditions::try_from(resp)
    }

    /// `GET /forecast`
    pub async fn fetch_forecast(&self, query: &LocationQuery) -> Result<ForecastSeries, WeatherError> {
        let url = self.endpoint_url("forecast", query);
        let resp: ForecastResponse = self.get_json(&url).await?;
        ForecastSeries::try_from(resp)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, WeatherError> {
        let shown = self.redacted(url);
        tracing::debug!("GET {}", shown);

        let response = self.client.get(url).send().await.map_err(|e| {
            tracing::warn!("Request to {} failed: {}", shown, e);
            WeatherError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or(text);
            tracing::warn!("{} returned {}: {}", shown, status, message);
            return Err(WeatherError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!("Failed to parse response from {}: {}", shown, e);
            WeatherError::Parse(e.to_string())
        })
    }
}
