//! Approximate device position from an IP geolocation service.
//! Stands in for browser geolocation: one lookup, no retries.

use reqwest::Client;
use serde::Deserialize;

use crate::types::{Coordinates, LocationError};

const USER_AGENT: &str = concat!("Skycast/", env!("CARGO_PKG_VERSION"));

/// Response shape of ip-api.com style endpoints
#[derive(Debug, Deserialize)]
struct LookupResponse {
    status: Option<String>,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    city: Option<String>,
}

#[derive(Debug, Clone)]
pub struct IpLocator {
    client: Client,
    lookup_url: String,
}

impl IpLocator {
    pub fn new(lookup_url: &str) -> Result<Self, LocationError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            lookup_url: lookup_url.to_string(),
        })
    }

    /// Look up the current position once.
    pub async fn current_location(&self) -> Result<Coordinates, LocationError> {
        tracing::debug!("Looking up device location via {}", self.lookup_url);

        let response = self.client.get(&self.lookup_url).send().await?;

        if !response.status().is_success() {
            return Err(LocationError::ServiceUnavailable(format!(
                "lookup returned status {}",
                response.status()
            )));
        }

        let body: LookupResponse = response.json().await?;

        if let Some(status) = body.status.as_deref() {
            if status != "success" {
                return Err(LocationError::ServiceUnavailable(
                    body.message.unwrap_or_else(|| status.to_string()),
                ));
            }
        }

        let coordinates = body
            .lat
            .zip(body.lon)
            .and_then(|(lat, lon)| Coordinates::new(lat, lon))
            .ok_or(LocationError::NoPosition)?;

        tracing::info!(
            "Got location: {}, {} ({})",
            coordinates.latitude,
            coordinates.longitude,
            body.city.as_deref().unwrap_or("unknown city")
        );
        Ok(coordinates)
    }
}
