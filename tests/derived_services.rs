//! Servicios de tienda y reportes contra un servicio principal real
//! servido en un puerto efímero.

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::Router;
use http::{Method, Request, StatusCode};
use serde_json::Value;
use tokio::net::TcpListener;
use tower::ServiceExt;

use vehicle_inventory::clients::{RemoteVehicleCollection, VehiclesApiClient};
use vehicle_inventory::config::{EnvironmentConfig, UpstreamConfig};
use vehicle_inventory::models::{Coordinates, FuelType, NewVehicle};
use vehicle_inventory::query::SearchCriteria;
use vehicle_inventory::repositories::{InMemoryVehicleStore, VehicleStore};
use vehicle_inventory::routes::{reports_app, shop_app, vehicle_app};
use vehicle_inventory::state::{AppState, ReportsState, ShopState};

fn test_config() -> EnvironmentConfig {
    let source = |_: &str| -> Option<String> { None };
    EnvironmentConfig::from_source(&source, 0).unwrap()
}

/// Servicio principal con `count` vehículos: el id `n` está en (n, n) y
/// tiene potencia `n * 10`.
async fn spawn_primary(count: i64) -> String {
    let store = Arc::new(InMemoryVehicleStore::new());
    for n in 1..=count {
        store
            .insert(NewVehicle {
                name: format!("Vehicle {n}"),
                coordinates: Coordinates {
                    x: n,
                    y: n as i32,
                },
                engine_power: Some(n * 10),
                number_of_wheels: Some(4),
                capacity: 1.0,
                fuel_type: FuelType::Kerosene,
            })
            .await
            .unwrap();
    }

    let app = vehicle_app(AppState::new(test_config(), store));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", address)
}

fn upstream(base_url: String) -> UpstreamConfig {
    UpstreamConfig {
        base_url,
        timeout: Duration::from_secs(5),
        drain_concurrency: 3,
        drain_timeout: Duration::from_secs(10),
    }
}

async fn shop_for(base_url: String) -> Router {
    let upstream = upstream(base_url);
    let client = Arc::new(VehiclesApiClient::from_config(&upstream).unwrap());
    shop_app(ShopState::new(test_config(), &upstream, client))
}

async fn reports_for(base_url: String) -> Router {
    let upstream = upstream(base_url);
    let client = Arc::new(VehiclesApiClient::from_config(&upstream).unwrap());
    reports_app(ReportsState::new(test_config(), &upstream, client))
}

async fn call(app: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn ids(body: &Value) -> Vec<i64> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|v| v["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_client_reads_pages_from_primary() {
    let base_url = spawn_primary(45).await;
    let client = VehiclesApiClient::new(base_url, Duration::from_secs(5)).unwrap();

    let page = client
        .fetch_page(&SearchCriteria::default(), 3, 20)
        .await
        .unwrap();
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.content.len(), 5);

    let filtered = client
        .fetch_page(&SearchCriteria::engine_power_between(Some(100), Some(150)), 1, 20)
        .await
        .unwrap();
    assert_eq!(filtered.content.len(), 6);
    assert_eq!(filtered.total_pages, 1);

    assert!(client.get(999).await.is_err());
}

#[tokio::test]
async fn test_shop_engine_power_search_drains_all_pages() {
    let base_url = spawn_primary(70).await;
    let shop = shop_for(base_url).await;

    // potencias 50..=650 -> ids 5..=65, repartidos en 4 páginas de 20
    let (status, body) = call(&shop, Method::GET, "/api/shop/search/by-engine-power/50/650").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), (5..=65).collect::<Vec<i64>>());

    let (status, body) = call(&shop, Method::GET, "/api/shop/search/by-engine-power/650/50").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn test_shop_add_wheels() {
    let base_url = spawn_primary(3).await;
    let shop = shop_for(base_url.clone()).await;

    let (status, body) = call(&shop, Method::PATCH, "/api/shop/add-wheels/2/8").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 2);
    assert_eq!(body["numberOfWheels"], 8);
    assert_eq!(body["name"], "Vehicle 2");

    let (status, body) = call(&shop, Method::PATCH, "/api/shop/add-wheels/42/8").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Vehicle wasn't found");

    let client = VehiclesApiClient::new(base_url, Duration::from_secs(5)).unwrap();
    assert_eq!(client.get(2).await.unwrap().number_of_wheels, Some(8));
}

#[tokio::test]
async fn test_reports_search_by_coordinates() {
    let base_url = spawn_primary(60).await;
    let reports = reports_for(base_url).await;

    // (n, n) a distancia <= 3 de (30, 30): n en 28..=32
    let (status, body) = call(
        &reports,
        Method::GET,
        "/api/vehicles/search/by-coordinates?x=30&y=30&max_distance=3",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![28, 29, 30, 31, 32]);

    let (status, _) = call(
        &reports,
        Method::GET,
        "/api/vehicles/search/by-coordinates?x=30&y=30&max_distance=-1",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(&reports, Method::GET, "/api/vehicles/search/by-coordinates?x=30").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reports_maintenance() {
    let base_url = spawn_primary(2).await;
    let reports = reports_for(base_url).await;

    let (status, body) = call(&reports, Method::GET, "/api/reports/maintenance/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["vehicleId"], 1);
    assert_eq!(body["vehicleInfo"]["name"], "Vehicle 1");
    assert_eq!(body["totalCost"], 15000.0);
    assert_eq!(body["maintenanceRecords"].as_array().unwrap().len(), 3);
    assert_eq!(
        body["reportPeriod"]["startDate"],
        body["vehicleInfo"]["creationDate"]
    );

    let (status, body) = call(
        &reports,
        Method::GET,
        "/api/reports/maintenance/1?include-details=false&include-costs=false",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("totalCost").is_none());
    assert!(body.get("maintenanceRecords").is_none());

    let (status, _) = call(&reports, Method::GET, "/api/reports/maintenance/1?format=xml").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call(&reports, Method::GET, "/api/reports/maintenance/77").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Vehicle wasn't found");
}

#[tokio::test]
async fn test_unreachable_primary_is_bad_gateway() {
    // Puerto reservado y liberado: nadie escucha
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let shop = shop_for(format!("http://{}", address)).await;
    let (status, body) = call(&shop, Method::GET, "/api/shop/search/by-engine-power/1/10").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["status"], 502);
}
