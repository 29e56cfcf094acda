//! Displayed dashboard state.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use skycast_weather::{
    CurrentConditions, DailyForecast, LocationError, LocationQuery, WeatherError, WeatherReport,
};

/// What the dashboard currently shows.
///
/// A failed fetch only sets the error message; previously shown data stays
/// as it was (same allocations) until the next successful fetch.
#[derive(Debug, Default)]
pub struct DashboardModel {
    pending: usize,
    error_message: Option<String>,
    current: Option<Arc<CurrentConditions>>,
    forecast: Option<Arc<DailyForecast>>,
    shown_query: Option<LocationQuery>,
    updated_at: Option<DateTime<Utc>>,
}

impl DashboardModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark one more request in flight
    pub fn begin_request(&mut self) {
        self.pending += 1;
    }

    fn finish_request(&mut self) {
        self.pending = self.pending.saturating_sub(1);
    }

    /// Apply the outcome of a fetch for `query`.
    pub fn apply_fetch(&mut self, query: &LocationQuery, result: Result<WeatherReport, WeatherError>) {
        self.finish_request();

        match result {
            Ok(report) => {
                let daily = report.daily();
                tracing::info!(
                    "Showing weather for {} ({} forecast days)",
                    report.current.place_name,
                    daily.len()
                );
                self.current = Some(Arc::new(report.current));
                self.forecast = Some(Arc::new(daily));
                self.shown_query = Some(query.clone());
                self.updated_at = Some(report.fetched_at);
                self.error_message = None;
            }
            Err(e) => {
                tracing::error!("Error fetching weather data for {}: {}", query, e);
                self.error_message = Some(e.user_message().to_string());
            }
        }
    }

    /// Device position lookup succeeded; a fetch follows.
    pub fn apply_locate_success(&mut self) {
        self.finish_request();
    }

    pub fn apply_locate_failure(&mut self, error: &LocationError) {
        self.finish_request();
        tracing::error!("Error getting current location: {}", error);
        self.error_message = Some(error.user_message().to_string());
    }

    pub fn is_loading(&self) -> bool {
        self.pending > 0
    }

    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn has_data(&self) -> bool {
        self.current.is_some()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn current(&self) -> Option<&Arc<CurrentConditions>> {
        self.current.as_ref()
    }

    pub fn forecast(&self) -> Option<&Arc<DailyForecast>> {
        self.forecast.as_ref()
    }

    /// Query whose data is on screen
    pub fn shown_query(&self) -> Option<&LocationQuery> {
        self.shown_query.as_ref()
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}
