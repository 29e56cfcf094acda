//! Weather backend: async fetching and locating.
//! Work runs on spawned tasks; results come back over a channel.
//! A task that panics still reports, so the dashboard never waits on it.

use std::sync::Arc;

use skycast_weather::{
    Coordinates, IpLocator, LocationError, LocationQuery, WeatherError, WeatherProvider,
    WeatherReport,
};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::{JoinError, JoinHandle};

/// Messages sent from async operations back to the dashboard
#[derive(Debug)]
pub enum WeatherServiceMessage {
    /// Result of fetching weather for `query`
    FetchDone {
        query: LocationQuery,
        result: Result<WeatherReport, WeatherError>,
    },
    /// Result of looking up the device position
    LocateDone(Result<Coordinates, LocationError>),
}

/// Fetch weather for `query` on a new task.
/// Sends `FetchDone` on the channel when complete.
pub fn request_fetch(
    tx: &UnboundedSender<WeatherServiceMessage>,
    provider: Arc<WeatherProvider>,
    query: LocationQuery,
) {
    let work = {
        let query = query.clone();
        tokio::spawn(async move { provider.fetch(&query).await })
    };

    report_when_done(tx, work, move |joined| WeatherServiceMessage::FetchDone {
        query,
        result: joined.unwrap_or_else(|e| {
            tracing::error!("Weather fetch task failed: {}", e);
            Err(WeatherError::Interrupted(e.to_string()))
        }),
    });
}

/// Look up the device position on a new task.
/// Sends `LocateDone` on the channel when complete.
pub fn request_locate(tx: &UnboundedSender<WeatherServiceMessage>, locator: Arc<IpLocator>) {
    let work = tokio::spawn(async move { locator.current_location().await });

    report_when_done(tx, work, |joined| {
        WeatherServiceMessage::LocateDone(joined.unwrap_or_else(|e| {
            tracing::error!("Location lookup task failed: {}", e);
            Err(LocationError::Interrupted(e.to_string()))
        }))
    });
}

/// Wait for `work` and send the message built from its outcome,
/// including when the task panicked or was cancelled.
fn report_when_done<T, F>(
    tx: &UnboundedSender<WeatherServiceMessage>,
    work: JoinHandle<T>,
    into_message: F,
) where
    T: Send + 'static,
    F: FnOnce(Result<T, JoinError>) -> WeatherServiceMessage + Send + 'static,
{
    let tx = tx.clone();
    tokio::spawn(async move {
        let message = into_message(work.await);
        if tx.send(message).is_err() {
            tracing::debug!("Dashboard gone before background work completed");
        }
    });
}
