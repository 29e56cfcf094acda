use std::sync::Arc;

use skycast_core::Units;
use skycast_weather::{IpLocator, LocationQuery, WeatherProvider};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::model::DashboardModel;
use crate::service::{request_fetch, request_locate, WeatherServiceMessage};

/// Drives the dashboard: starts fetches and applies their results in
/// arrival order. With overlapping fetches the last one to resolve wins.
pub struct Dashboard {
    model: DashboardModel,
    provider: Arc<WeatherProvider>,
    locator: Arc<IpLocator>,
    tx: UnboundedSender<WeatherServiceMessage>,
    rx: UnboundedReceiver<WeatherServiceMessage>,
}

impl Dashboard {
    pub fn new(provider: WeatherProvider, locator: IpLocator) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        Self {
            model: DashboardModel::new(),
            provider: Arc::new(provider),
            locator: Arc::new(locator),
            tx,
            rx,
        }
    }

    pub fn model(&self) -> &DashboardModel {
        &self.model
    }

    pub fn units(&self) -> Units {
        self.provider.units()
    }

    /// Submit free-text input. Blank input is ignored.
    /// Returns whether a fetch was started.
    pub fn submit(&mut self, input: &str) -> bool {
        match LocationQuery::parse(input) {
            Ok(query) => {
                self.fetch(query);
                true
            }
            Err(e) => {
                tracing::debug!("Ignoring submission: {}", e);
                false
            }
        }
    }

    pub fn fetch(&mut self, query: LocationQuery) {
        self.model.begin_request();
        request_fetch(&self.tx, Arc::clone(&self.provider), query);
    }

    /// Look up the device position, then fetch weather for it.
    pub fn use_current_location(&mut self) {
        self.model.begin_request();
        request_locate(&self.tx, Arc::clone(&self.locator));
    }

    /// Wait for the next result and apply it.
    /// Returns `false` without waiting when nothing is in flight.
    pub async fn next_message(&mut self) -> bool {
        if !self.model.is_loading() {
            return false;
        }

        let Some(message) = self.rx.recv().await else {
            return false;
        };

        match message {
            WeatherServiceMessage::FetchDone { query, result } => {
                self.model.apply_fetch(&query, result);
            }
            WeatherServiceMessage::LocateDone(Ok(coordinates)) => {
                self.model.apply_locate_success();
                self.fetch(coordinates.into());
            }
            WeatherServiceMessage::LocateDone(Err(e)) => {
                self.model.apply_locate_failure(&e);
            }
        }
        true
    }

    /// Apply results until nothing is in flight.
    pub async fn settle(&mut self) {
        while self.next_message().await {}
    }
}
