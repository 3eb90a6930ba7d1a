//! Integration tests for the forecast client using wiremock
//!
//! These tests run each provider adapter against a mock HTTP server,
//! covering success, provider error bodies and HTTP failure statuses.

use domain::{GeoLocation, ProviderId};
use integration_weather::{
    ForecastClient, ForecastHttpClient, OpenMeteoAdapter, ProviderEndpoint, VisualCrossingAdapter,
    WeatherApiAdapter, WeatherConfig, WeatherError, WeatherbitAdapter,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn berlin() -> GeoLocation {
    GeoLocation::new(52.52, 13.405).unwrap()
}

fn create_test_client() -> ForecastHttpClient {
    let config = WeatherConfig {
        timeout_secs: 5,
        ..WeatherConfig::default()
    };
    ForecastHttpClient::new(&config).unwrap()
}

fn endpoint(mock_server: &MockServer) -> ProviderEndpoint {
    ProviderEndpoint::new(mock_server.uri()).with_api_key("test-key")
}

fn open_meteo_response() -> serde_json::Value {
    serde_json::json!({
        "latitude": 52.52,
        "longitude": 13.405,
        "timezone": "Europe/Berlin",
        "daily": {
            "time": ["2024-04-10", "2024-04-11", "2024-04-12"],
            "precipitation_probability_mean": [15, 60, 5],
            "temperature_2m_max": [18.0, 14.5, 21.0],
            "windspeed_10m_max": [14.0, 22.0, 9.0],
            "relative_humidity_2m_mean": [55, 82, 48],
            "dew_point_2m_mean": [8.1, 10.4, 7.2],
            "shortwave_radiation_sum": [19.5, 8.2, 23.0],
            "soil_moisture_0_to_1cm_mean": [0.22, 0.34, 0.2]
        }
    })
}

#[tokio::test]
async fn test_open_meteo_forecast_success() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("latitude", "52.52"))
        .and(query_param("longitude", "13.405"))
        .and(query_param("forecast_days", "3"))
        .and(query_param("timezone", "auto"))
        .respond_with(ResponseTemplate::new(200).set_body_json(open_meteo_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let adapter = OpenMeteoAdapter::new(ProviderEndpoint::new(mock_server.uri()));
    let records = create_test_client()
        .fetch_forecast(&adapter, &berlin(), 3)
        .await
        .unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].date.to_string(), "2024-04-10");
    assert!((records[1].precipitation_probability - 60.0).abs() < f64::EPSILON);
    assert_eq!(records[2].soil_moisture, Some(0.2));
}

#[tokio::test]
async fn test_weatherbit_forecast_success() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast/daily"))
        .and(query_param("key", "test-key"))
        .and(query_param("days", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "city_name": "Berlin",
            "data": [
                {"valid_date": "2024-04-10", "pop": 20, "temp": 12.0, "wind_spd": 2.0, "rh": 60, "dewpt": 4.0},
                {"valid_date": "2024-04-11", "pop": 70, "temp": 10.0, "wind_spd": 4.0, "rh": 85, "dewpt": 7.5}
            ]
        })))
        .mount(&mock_server)
        .await;

    let adapter = WeatherbitAdapter::new(endpoint(&mock_server));
    let records = create_test_client()
        .fetch_forecast(&adapter, &berlin(), 2)
        .await
        .unwrap();

    assert_eq!(records.len(), 2);
    assert!((records[1].wind_speed - 14.4).abs() < 1e-9);
}

#[tokio::test]
async fn test_visual_crossing_timeline_path() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/timeline/52.52,13.405"))
        .and(query_param("unitGroup", "metric"))
        .and(query_param("include", "days"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "days": [
                {"datetime": "2024-04-10", "precipprob": 10, "temp": 15.0, "windspeed": 11.0,
                 "humidity": 50, "dew": 5.0, "solarradiation": 180.0},
                {"datetime": "2024-04-11", "precipprob": 30, "temp": 16.0, "windspeed": 9.0,
                 "humidity": 55, "dew": 6.0, "solarradiation": 160.0},
                {"datetime": "2024-04-12", "precipprob": 90, "temp": 11.0, "windspeed": 25.0,
                 "humidity": 90, "dew": 9.0, "solarradiation": 40.0}
            ]
        })))
        .mount(&mock_server)
        .await;

    let adapter = VisualCrossingAdapter::new(endpoint(&mock_server));
    let records = create_test_client()
        .fetch_forecast(&adapter, &berlin(), 2)
        .await
        .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].solar_radiation, Some(180.0));
}

#[tokio::test]
async fn test_weather_api_forecast_success() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .and(query_param("q", "52.52,13.405"))
        .and(query_param("aqi", "no"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "location": {"name": "Berlin"},
            "forecast": {"forecastday": [{
                "date": "2024-04-10",
                "day": {"daily_chance_of_rain": 40, "avgtemp_c": 11.5, "maxwind_kph": 19.1, "avghumidity": 71},
                "hour": [{"dewpoint_c": 4.0}, {"dewpoint_c": 6.0}]
            }]}
        })))
        .mount(&mock_server)
        .await;

    let adapter = WeatherApiAdapter::new(endpoint(&mock_server));
    let records = create_test_client()
        .fetch_forecast(&adapter, &berlin(), 1)
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert!((records[0].dew_point - 5.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_missing_data_key_is_reported() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast/daily"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": "API key not valid, or not yet activated."
        })))
        .mount(&mock_server)
        .await;

    let adapter = WeatherbitAdapter::new(endpoint(&mock_server));
    let result = create_test_client()
        .fetch_forecast(&adapter, &berlin(), 7)
        .await;

    match result {
        Err(WeatherError::MissingDataKey { provider, key, .. }) => {
            assert_eq!(provider, ProviderId::Weatherbit);
            assert_eq!(key, "data");
        },
        other => panic!("expected MissingDataKey, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_api_key_skips_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let adapter = WeatherApiAdapter::new(ProviderEndpoint::new(mock_server.uri()));
    let result = create_test_client()
        .fetch_forecast(&adapter, &berlin(), 3)
        .await;

    assert!(matches!(
        result,
        Err(WeatherError::MissingApiKey(ProviderId::WeatherApi))
    ));
}

#[tokio::test]
async fn test_server_error_returns_service_unavailable() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let adapter = OpenMeteoAdapter::new(ProviderEndpoint::new(mock_server.uri()));
    let result = create_test_client()
        .fetch_forecast(&adapter, &berlin(), 3)
        .await;

    assert!(matches!(result, Err(WeatherError::ServiceUnavailable(_))));
}

#[tokio::test]
async fn test_rate_limit_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;

    let adapter = OpenMeteoAdapter::new(ProviderEndpoint::new(mock_server.uri()));
    let result = create_test_client()
        .fetch_forecast(&adapter, &berlin(), 3)
        .await;

    assert!(matches!(result, Err(WeatherError::RateLimitExceeded)));
}

#[tokio::test]
async fn test_client_error_carries_provider_message() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": {"code": 2006, "message": "API key is invalid."}
        })))
        .mount(&mock_server)
        .await;

    let adapter = WeatherApiAdapter::new(endpoint(&mock_server));
    let result = create_test_client()
        .fetch_forecast(&adapter, &berlin(), 3)
        .await;

    match result {
        Err(WeatherError::RequestFailed(message)) => {
            assert!(message.contains("401"));
            assert!(message.contains("API key is invalid."));
        },
        other => panic!("expected RequestFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_json_response() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let adapter = OpenMeteoAdapter::new(ProviderEndpoint::new(mock_server.uri()));
    let result = create_test_client()
        .fetch_forecast(&adapter, &berlin(), 3)
        .await;

    assert!(matches!(result, Err(WeatherError::ParseError(_))));
}

#[tokio::test]
async fn test_day_count_is_clamped() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("forecast_days", "16"))
        .respond_with(ResponseTemplate::new(200).set_body_json(open_meteo_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let adapter = OpenMeteoAdapter::new(ProviderEndpoint::new(mock_server.uri()));
    let records = create_test_client()
        .fetch_forecast(&adapter, &berlin(), 40)
        .await
        .unwrap();

    assert_eq!(records.len(), 3);
}

#[tokio::test]
async fn test_api_key_with_reserved_characters_arrives_intact() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .and(query_param("key", "k&ey#1=2"))
        .and(query_param("days", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "forecast": {
                "forecastday": [{
                    "date": "2024-04-10",
                    "day": {"daily_chance_of_rain": 20, "avgtemp_c": 12.0, "maxwind_kph": 15.0, "avghumidity": 60},
                    "hour": [{"dewpoint_c": 4.0}]
                }]
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let adapter = WeatherApiAdapter::new(
        ProviderEndpoint::new(mock_server.uri()).with_api_key("k&ey#1=2"),
    );
    let records = create_test_client()
        .fetch_forecast(&adapter, &berlin(), 1)
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert!((records[0].dew_point - 4.0).abs() < f64::EPSILON);
}
