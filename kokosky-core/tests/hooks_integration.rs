//! Integration tests for the data-binding hooks using wiremock.

use std::time::Duration;

use kokosky_core::{ClientConfig, HookState, KokoSkyClient, Location, Phase};
use tokio::sync::watch;
use wiremock::matchers::{header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> KokoSkyClient {
    KokoSkyClient::new(&ClientConfig::new(server.uri()))
}

fn test_location(code: &str, city: &str) -> serde_json::Value {
    serde_json::json!({
        "code": code,
        "city_name": city,
        "country_name": "Japan",
        "country_code": "JP",
        "enabled": true
    })
}

fn location(code: &str, city: &str) -> Location {
    serde_json::from_value(test_location(code, city)).unwrap()
}

fn daily_json(location: &str) -> serde_json::Value {
    serde_json::json!({
        "location": location,
        "daily_forecast": [{
            "day_of_month": 5, "month": 6, "min_temp": 12, "max_temp": 21,
            "precipitation": 10, "status": "Cloudy"
        }]
    })
}

/// Wait until the hook has nothing in flight and return that state.
async fn settled<T: Clone>(rx: &mut watch::Receiver<HookState<T>>) -> HookState<T> {
    tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|s| !s.is_loading()))
        .await
        .expect("hook did not settle in time")
        .expect("hook dropped")
        .clone()
}

fn codes(locations: &[Location]) -> Vec<&str> {
    locations.iter().map(|l| l.code.as_str()).collect()
}

async fn mount_location_list(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v1/locations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            test_location("TYO", "Tokyo"),
            test_location("OSA", "Osaka"),
            test_location("KYO", "Kyoto"),
        ])))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_locations_hook_fetches_on_attach() {
    let mock_server = MockServer::start().await;
    mount_location_list(&mock_server).await;

    let hook = client_for(&mock_server).locations_hook();
    let mut rx = hook.subscribe();
    assert!(rx.borrow().is_loading());

    let state = settled(&mut rx).await;
    assert!(matches!(state.phase(), Phase::Ready(_)));
    assert_eq!(codes(state.data().unwrap()), vec!["TYO", "OSA", "KYO"]);
}

#[tokio::test]
async fn test_locations_hook_add_appends_without_refetch() {
    let mock_server = MockServer::start().await;
    mount_location_list(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/api/v1/locations"))
        .respond_with(ResponseTemplate::new(201).set_body_json(test_location("NGO", "Nagoya")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let hook = client_for(&mock_server).locations_hook();
    settled(&mut hook.subscribe()).await;

    let created = hook.add(&location("NGO", "Nagoya")).await.unwrap();
    assert_eq!(created.code, "NGO");

    let state = hook.state();
    assert!(!state.is_loading());
    assert_eq!(state.error(), None);
    assert_eq!(codes(&hook.locations()), vec!["TYO", "OSA", "KYO", "NGO"]);

    // The list endpoint's `expect(1)` is checked here.
    mock_server.verify().await;
}

#[tokio::test]
async fn test_locations_hook_update_replaces_in_place() {
    let mock_server = MockServer::start().await;
    mount_location_list(&mock_server).await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/locations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(test_location("OSA", "Osaka City")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let hook = client_for(&mock_server).locations_hook();
    settled(&mut hook.subscribe()).await;

    hook.update(&location("OSA", "Osaka City")).await.unwrap();

    let locations = hook.locations();
    assert_eq!(codes(&locations), vec!["TYO", "OSA", "KYO"]);
    assert_eq!(locations[1].city_name, "Osaka City");
    assert_eq!(locations[0].city_name, "Tokyo");
}

#[tokio::test]
async fn test_locations_hook_delete_removes_by_code() {
    let mock_server = MockServer::start().await;
    mount_location_list(&mock_server).await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/locations/TYO"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let hook = client_for(&mock_server).locations_hook();
    settled(&mut hook.subscribe()).await;

    hook.delete("TYO").await.unwrap();
    assert_eq!(codes(&hook.locations()), vec!["OSA", "KYO"]);
}

#[tokio::test]
async fn test_locations_hook_mutation_error_is_stored_and_returned() {
    let mock_server = MockServer::start().await;
    mount_location_list(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/api/v1/locations"))
        .respond_with(
            ResponseTemplate::new(409).set_body_string("Sorry! location code TYO already exist!"),
        )
        .mount(&mock_server)
        .await;

    let hook = client_for(&mock_server).locations_hook();
    settled(&mut hook.subscribe()).await;

    let err = hook.add(&location("TYO", "Tokyo")).await.unwrap_err();
    assert_eq!(err.status(), Some(409));

    let state = hook.state();
    assert_eq!(state.phase(), Phase::Errored("Sorry! location code TYO already exist!"));
    assert_eq!(codes(state.data().unwrap()), vec!["TYO", "OSA", "KYO"]);
}

#[tokio::test]
async fn test_locations_hook_update_error_keeps_list() {
    let mock_server = MockServer::start().await;
    mount_location_list(&mock_server).await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/locations"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string("Location not found with code NGO"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let hook = client_for(&mock_server).locations_hook();
    settled(&mut hook.subscribe()).await;

    let err = hook.update(&location("NGO", "Nagoya")).await.unwrap_err();
    assert_eq!(err.status(), Some(404));

    let state = hook.state();
    assert!(!state.is_loading());
    assert_eq!(state.phase(), Phase::Errored("Location not found with code NGO"));
    assert_eq!(codes(state.data().unwrap()), vec!["TYO", "OSA", "KYO"]);
    assert_eq!(state.data().unwrap()[1].city_name, "Osaka");
}

#[tokio::test]
async fn test_locations_hook_delete_error_keeps_list() {
    let mock_server = MockServer::start().await;
    mount_location_list(&mock_server).await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/locations/KYO"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Could not delete KYO"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let hook = client_for(&mock_server).locations_hook();
    settled(&mut hook.subscribe()).await;

    let err = hook.delete("KYO").await.unwrap_err();
    assert_eq!(err.status(), Some(500));

    let state = hook.state();
    assert!(!state.is_loading());
    assert_eq!(state.phase(), Phase::Errored("Could not delete KYO"));
    assert_eq!(codes(state.data().unwrap()), vec!["TYO", "OSA", "KYO"]);
}

#[tokio::test]
async fn test_locations_hook_fetch_error_keeps_previous_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/locations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            test_location("TYO", "Tokyo"),
        ])))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/locations"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let hook = client_for(&mock_server).locations_hook();
    settled(&mut hook.subscribe()).await;

    hook.fetch_all().await;

    let state = hook.state();
    assert_eq!(state.error(), Some("API call failed with status: 500"));
    assert_eq!(codes(state.data().unwrap()), vec!["TYO"]);
}

#[tokio::test]
async fn test_weather_hook_follows_code_changes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/daily"))
        .respond_with(ResponseTemplate::new(200).set_body_json(daily_json("By IP")))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/daily/SF01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(daily_json("San Francisco")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let hook = client_for(&mock_server).daily_hook(None);
    let mut rx = hook.subscribe();

    let state = settled(&mut rx).await;
    assert_eq!(state.data().unwrap().location.as_deref(), Some("By IP"));

    hook.set_code(Some("SF01".to_string()));
    let state = settled(&mut rx).await;
    assert_eq!(state.data().unwrap().location.as_deref(), Some("San Francisco"));

    // Same code again: no new request.
    hook.set_code(Some("SF01".to_string()));
    assert!(!hook.state().is_loading());

    mock_server.verify().await;
}

#[tokio::test]
async fn test_weather_hook_back_to_ip() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/daily/SF01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(daily_json("San Francisco")))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/daily"))
        .respond_with(ResponseTemplate::new(200).set_body_json(daily_json("By IP")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let hook = client_for(&mock_server).daily_hook(Some("SF01".to_string()));
    let mut rx = hook.subscribe();
    settled(&mut rx).await;

    hook.set_code(None);
    let state = settled(&mut rx).await;
    assert_eq!(state.data().unwrap().location.as_deref(), Some("By IP"));
    assert_eq!(hook.code(), None);

    mock_server.verify().await;
}

#[tokio::test]
async fn test_weather_hook_last_issued_fetch_wins() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/realtime/SLOW"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({
                    "location": "Slow",
                    "temperature": 1, "humidity": 1, "precipitation": 1,
                    "status": "Old", "wind_speed": 1
                }))
                .set_delay(Duration::from_millis(300)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/realtime/FAST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "location": "Fast",
            "temperature": 2, "humidity": 2, "precipitation": 2,
            "status": "New", "wind_speed": 2
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let hook = client_for(&mock_server).realtime_hook(Some("SLOW".to_string()));
    hook.set_code(Some("FAST".to_string()));

    // Both requests must be done before the hook reports idle.
    let state = settled(&mut hook.subscribe()).await;
    let weather = state.data().unwrap();
    assert_eq!(weather.location.as_deref(), Some("Fast"));
    assert_eq!(weather.status, "New");

    mock_server.verify().await;
}

#[tokio::test]
async fn test_weather_hook_error_keeps_stale_snapshot() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/full/SF01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "location": "San Francisco",
            "realtime": {
                "temperature": 15, "humidity": 70, "precipitation": 0,
                "status": "Sunny", "wind_speed": 8
            },
            "hourly_forecast": [],
            "daily_forecast": []
        })))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/full/SF01"))
        .respond_with(ResponseTemplate::new(404).set_body_string("No data available for location SF01"))
        .mount(&mock_server)
        .await;

    let hook = client_for(&mock_server).full_hook(Some("SF01".to_string()));
    settled(&mut hook.subscribe()).await;

    hook.refetch().await;

    let state = hook.state();
    assert_eq!(state.phase(), Phase::Errored("No data available for location SF01"));
    assert_eq!(state.data().unwrap().realtime.status, "Sunny");
}

#[tokio::test]
async fn test_weather_hook_success_clears_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/hourly"))
        .respond_with(ResponseTemplate::new(500).set_body_string("temporarily unavailable"))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/hourly"))
        .and(header_exists("X-Current-Hour"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "hourly_forecast": [
                {"hour_of_day": 3, "temperature": 4, "precipitation": 0, "status": "Clear"}
            ]
        })))
        .mount(&mock_server)
        .await;

    let hook = client_for(&mock_server).hourly_hook(None);
    let state = settled(&mut hook.subscribe()).await;
    assert_eq!(state.error(), Some("temporarily unavailable"));
    assert!(state.data().is_none());

    hook.refetch().await;

    let state = hook.state();
    assert_eq!(state.error(), None);
    assert_eq!(state.data().unwrap().hourly_forecast.len(), 1);
}

#[tokio::test]
async fn test_weather_hook_blank_code_reads_by_ip() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/daily"))
        .respond_with(ResponseTemplate::new(200).set_body_json(daily_json("By IP")))
        .expect(2)
        .mount(&mock_server)
        .await;

    let hook = client_for(&mock_server).daily_hook(Some(String::new()));
    let mut rx = hook.subscribe();
    let state = settled(&mut rx).await;
    assert_eq!(state.data().unwrap().location.as_deref(), Some("By IP"));

    hook.set_code(Some("   ".to_string()));
    settled(&mut rx).await;

    let requests = mock_server.received_requests().await.unwrap();
    let paths: Vec<&str> = requests.iter().map(|r| r.url.path()).collect();
    assert_eq!(paths, vec!["/api/v1/daily", "/api/v1/daily"]);
}
