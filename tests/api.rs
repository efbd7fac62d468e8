// End-to-end tests: CSV store -> axum service -> HTTP repository -> curve service
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use power_curve::application::curve_service::{CurveService, QueryOutcome};
use power_curve::application::turbine_repository::{FetchError, TurbineRepository};
use power_curve::domain::query::TurbineQuery;
use power_curve::infrastructure::csv_store::CsvTurbineStore;
use power_curve::infrastructure::http_repository::HttpTurbineRepository;
use power_curve::presentation::app_state::AppState;
use power_curve::presentation::handlers;

const EXPORT: &str = "\
Dat/Zeit;Wind;Leistung
;m/s;kW
01.01.2016, 00:20;10,5;2500,0
01.01.2016, 00:10;5,3;120,7
";

async fn spawn_service() -> (SocketAddr, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("Turbine1.csv"), EXPORT).unwrap();
    let store = CsvTurbineStore::load(dir.path()).unwrap();
    let state = Arc::new(AppState {
        store: Arc::new(store),
    });
    let router = handlers::router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (addr, dir)
}

fn repository(addr: SocketAddr) -> HttpTurbineRepository {
    HttpTurbineRepository::new(&format!("http://{addr}"), Duration::from_secs(5)).unwrap()
}

fn query(turbine_id: &str, start: &str, end: &str) -> TurbineQuery {
    TurbineQuery::parse(turbine_id, start, end).unwrap()
}

#[tokio::test]
async fn test_fetch_round_trip_normalizes_and_preserves_order() {
    let (addr, _dir) = spawn_service().await;
    let service = CurveService::new(Arc::new(repository(addr)));

    let outcome = service
        .fetch_curve(&query("Turbine1", "01.01.2016, 00:00", "02.01.2016, 00:00"))
        .await;

    match outcome {
        QueryOutcome::Curve { curve, skipped } => {
            // Timestamp order from the service, decimal commas normalized
            assert_eq!(curve.points, vec![(5.3, 120.7), (10.5, 2500.0)]);
            assert_eq!(skipped, 0);
            assert_eq!(curve.title, "Power Curve");
        }
        other => panic!("expected curve, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_range_is_not_found() {
    let (addr, _dir) = spawn_service().await;
    let repository = repository(addr);

    let err = repository
        .fetch_samples(&query("Turbine1", "01.01.2017, 00:00", "02.01.2017, 00:00"))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::NotFound));

    let outcome = CurveService::new(Arc::new(repository))
        .fetch_curve(&query("Turbine1", "01.01.2017, 00:00", "02.01.2017, 00:00"))
        .await;
    assert_eq!(outcome, QueryOutcome::NotFound);
}

#[tokio::test]
async fn test_unknown_turbine_is_not_found() {
    let (addr, _dir) = spawn_service().await;
    let err = repository(addr)
        .fetch_samples(&query("Turbine9", "01.01.2016, 00:00", "02.01.2016, 00:00"))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::NotFound));
}

#[tokio::test]
async fn test_wire_body_keeps_locale_formatting_and_literal_details() {
    let (addr, _dir) = spawn_service().await;
    let client = reqwest::Client::new();

    let body: serde_json::Value = client
        .get(format!("http://{addr}/turbine/Turbine1/data"))
        .query(&[
            ("start_time", "01.01.2016, 00:00"),
            ("end_time", "02.01.2016, 00:00"),
        ])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["turbine_id"], "Turbine1");
    assert_eq!(body["data"][0]["wind_speed"], "5,3");
    assert_eq!(body["data"][1]["power"], "2500,0");

    let response = client
        .get(format!("http://{addr}/turbine/Turbine1/data"))
        .query(&[
            ("start_time", "01.01.2017, 00:00"),
            ("end_time", "02.01.2017, 00:00"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body["detail"],
        "No data found for the turbine ID and time range."
    );
}

#[tokio::test]
async fn test_malformed_date_is_bad_request() {
    let (addr, _dir) = spawn_service().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("http://{addr}/turbine/Turbine1/data"))
        .query(&[
            ("start_time", "2016-01-01 00:00"),
            ("end_time", "02.01.2016, 00:00"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["detail"], "Invalid date format. Use DD.MM.YYYY, HH:MM");

    // A validated query always formats its bounds correctly, so the
    // repository never hits the 400 path.
    let result = repository(addr)
        .fetch_samples(&query("Turbine1", "01.01.2016, 00:00", "02.01.2016, 00:00"))
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_health_check() {
    let (addr, _dir) = spawn_service().await;
    let body = reqwest::get(format!("http://{addr}/healthz"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, "ok");
}
