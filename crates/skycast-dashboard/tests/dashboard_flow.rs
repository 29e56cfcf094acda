//! End-to-end dashboard behavior against mock provider and locator servers.

use std::sync::Arc;
use std::time::Duration;

use skycast_core::Units;
use skycast_dashboard::Dashboard;
use skycast_weather::{IpLocator, WeatherProvider, FETCH_FAILED_MESSAGE, LOCATE_FAILED_MESSAGE};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn current_body(name: &str, temp: f64) -> serde_json::Value {
    serde_json::json!({
        "weather": [{"id": 801, "main": "Clouds", "description": "few clouds", "icon": "02d"}],
        "main": {"temp": temp, "feels_like": temp, "humidity": 60},
        "wind": {"speed": 2.5},
        "dt": 1704103200,
        "timezone": 0,
        "name": name
    })
}

/// Mon 00:00 10°/800, Mon 03:00 15°/500, Tue 00:00 8°/600
fn forecast_body(name: &str) -> serde_json::Value {
    serde_json::json!({
        "list": [
            {"dt": 1704067200, "main": {"temp": 10.0}, "weather": [{"id": 800, "icon": "01n"}]},
            {"dt": 1704078000, "main": {"temp": 15.0}, "weather": [{"id": 500, "icon": "10n"}]},
            {"dt": 1704153600, "main": {"temp": 8.0}, "weather": [{"id": 600, "icon": "13n"}]}
        ],
        "city": {"name": name, "timezone": 0}
    })
}

async fn mount_city(server: &MockServer, name: &str, temp: f64, delay: Duration) {
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", name))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(current_body(name, temp))
                .set_delay(delay),
        )
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("q", name))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(forecast_body(name))
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

async fn mount_unknown_city(server: &MockServer, name: &str) {
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", name))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"cod": "404", "message": "city not found"})),
        )
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("q", name))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(name)))
        .mount(server)
        .await;
}

fn dashboard(weather: &MockServer, locator: &MockServer) -> Dashboard {
    let provider = WeatherProvider::with_base_url("test-key", &weather.uri(), Units::Metric).unwrap();
    let locator = IpLocator::new(&format!("{}/json", locator.uri())).unwrap();
    Dashboard::new(provider, locator)
}

#[tokio::test]
async fn test_submit_success_shows_weather_and_daily_forecast() {
    let weather = MockServer::start().await;
    let locator = MockServer::start().await;
    mount_city(&weather, "London", 14.0, Duration::ZERO).await;

    let mut dash = dashboard(&weather, &locator);
    assert_eq!(dash.units(), Units::Metric);
    assert!(dash.submit("London"));
    assert!(dash.model().is_loading());
    dash.settle().await;

    let model = dash.model();
    assert!(!model.is_loading());
    assert!(model.error_message().is_none());
    assert_eq!(model.current().unwrap().place_name, "London");

    let forecast = model.forecast().unwrap();
    assert_eq!(forecast.labels(), vec!["Mon", "Tue"]);
    assert_eq!(forecast.get_label("Mon").unwrap().temperature, 10.0);
    assert_eq!(forecast.get_label("Tue").unwrap().temperature, 8.0);
}

#[tokio::test]
async fn test_failed_fetch_keeps_previous_data_and_sets_error() {
    let weather = MockServer::start().await;
    let locator = MockServer::start().await;
    mount_city(&weather, "London", 14.0, Duration::ZERO).await;
    mount_unknown_city(&weather, "Atlantis").await;

    let mut dash = dashboard(&weather, &locator);
    dash.submit("London");
    dash.settle().await;
    let current_before = Arc::clone(dash.model().current().unwrap());
    let forecast_before = Arc::clone(dash.model().forecast().unwrap());

    dash.submit("Atlantis");
    dash.settle().await;

    let model = dash.model();
    assert_eq!(model.error_message(), Some(FETCH_FAILED_MESSAGE));
    assert!(Arc::ptr_eq(model.current().unwrap(), &current_before));
    assert!(Arc::ptr_eq(model.forecast().unwrap(), &forecast_before));

    // The next success clears the error again.
    dash.submit("London");
    dash.settle().await;
    assert!(dash.model().error_message().is_none());
}

#[tokio::test]
async fn test_blank_submission_is_ignored() {
    let weather = MockServer::start().await;
    let locator = MockServer::start().await;

    let mut dash = dashboard(&weather, &locator);
    assert!(!dash.submit("   "));
    assert!(!dash.model().is_loading());
    assert!(!dash.next_message().await);
    assert!(weather.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_current_location_fetches_by_coordinates() {
    let weather = MockServer::start().await;
    let locator = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "city": "Seattle",
            "lat": 47.6,
            "lon": -122.3
        })))
        .expect(1)
        .mount(&locator)
        .await;
    for endpoint in ["/weather", "/forecast"] {
        let body = if endpoint == "/weather" {
            current_body("Seattle", 9.0)
        } else {
            forecast_body("Seattle")
        };
        Mock::given(method("GET"))
            .and(path(endpoint))
            .and(query_param("lat", "47.6"))
            .and(query_param("lon", "-122.3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&weather)
            .await;
    }

    let mut dash = dashboard(&weather, &locator);
    dash.use_current_location();
    dash.settle().await;

    let model = dash.model();
    assert!(model.error_message().is_none());
    assert_eq!(model.current().unwrap().place_name, "Seattle");
    assert_eq!(model.shown_query().unwrap().to_string(), "47.6,-122.3");
}

#[tokio::test]
async fn test_current_location_failure_shows_location_error() {
    let weather = MockServer::start().await;
    let locator = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&locator)
        .await;

    let mut dash = dashboard(&weather, &locator);
    dash.use_current_location();
    dash.settle().await;

    let model = dash.model();
    assert_eq!(model.error_message(), Some(LOCATE_FAILED_MESSAGE));
    assert!(!model.has_data());
    assert!(weather.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_overlapping_fetches_last_to_resolve_wins() {
    let weather = MockServer::start().await;
    let locator = MockServer::start().await;
    mount_city(&weather, "Slowtown", 1.0, Duration::from_millis(400)).await;
    mount_city(&weather, "Fasttown", 2.0, Duration::ZERO).await;

    let mut dash = dashboard(&weather, &locator);
    dash.submit("Slowtown");
    dash.submit("Fasttown");
    assert_eq!(dash.model().pending(), 2);

    assert!(dash.next_message().await);
    assert_eq!(dash.model().current().unwrap().place_name, "Fasttown");

    dash.settle().await;
    assert_eq!(dash.model().current().unwrap().place_name, "Slowtown");
}
