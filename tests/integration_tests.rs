//! Integration tests for carbon-route
//!
//! Library scenarios run offline or against a mock routing server. CLI tests
//! run the built binary and are disabled during CI package verification.

use std::process::Command;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use carbon_route::{
    haversine_km, optimize_route_offline, resolve_coordinate, Error, LocationQuery, RoadClass,
    RouteOptimizer, RouterConfig, SolverStrategy, VehicleClass,
};
use wiremock::matchers::{method, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn q(district: &str, state: &str) -> LocationQuery {
    LocationQuery::new(district, state)
}

#[test]
fn test_nashik_to_mumbai_offline() {
    let route = optimize_route_offline(&q("Nashik", "Maharashtra"), &q("Mumbai", "Maharashtra"), 3.0).unwrap();

    // No hub qualifies on this corridor
    assert_eq!(route.path.len(), 2);
    assert_eq!(route.order, vec![0, 1]);
    assert_eq!(route.vehicle, VehicleClass::Van);
    assert_eq!(route.strategy, SolverStrategy::NearestNeighbor);

    let (nashik, _) = resolve_coordinate("Nashik", "Maharashtra");
    let (mumbai, _) = resolve_coordinate("Mumbai", "Maharashtra");
    let direct = haversine_km(nashik, mumbai) * 1.4;
    assert!(route.total_distance_km >= direct - 1e-9);
    assert!((route.total_distance_km - 196.17).abs() < 0.05);
    assert_eq!(route.segments[0].road_class, RoadClass::NationalHighway);
    assert!((route.estimated_time_hours - route.total_distance_km / 50.0).abs() < 1e-9);
}

#[test]
fn test_heavy_load_emits_more_on_same_path() {
    let from = q("Nashik", "Maharashtra");
    let to = q("Mumbai", "Maharashtra");
    let heavy = optimize_route_offline(&from, &to, 60.0).unwrap();
    let light = optimize_route_offline(&from, &to, 3.0).unwrap();

    assert_eq!(heavy.order, light.order);
    assert_eq!(heavy.total_distance_km, light.total_distance_km);
    assert_eq!(heavy.vehicle, VehicleClass::LargeTruck);
    assert!(heavy.carbon_emission_kg > light.carbon_emission_kg);
    assert!((heavy.carbon_emission_kg / light.carbon_emission_kg - 0.27 / 0.12).abs() < 1e-9);
}

#[test]
fn test_unknown_districts_rejected() {
    let err = optimize_route_offline(&q("Xyzzy", "Nowhere"), &q("Plugh", "Elsewhere"), 10.0).unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)), "got {err:?}");
}

#[test]
fn test_delhi_to_mumbai_through_hubs() {
    let route = optimize_route_offline(&q("Delhi", "Delhi"), &q("Mumbai", "Maharashtra"), 25.0).unwrap();

    assert_eq!(route.path.len(), 4);
    assert_eq!(route.path[0].id, "farmer_source");
    assert_eq!(route.path[3].id, "vendor_dest");
    let hubs: Vec<&str> = route.path[1..3].iter().map(|n| n.id.as_str()).collect();
    assert_eq!(hubs, vec!["hub_jaipur", "hub_indore"]);
    assert_eq!(route.strategy, SolverStrategy::TwoOpt);
    assert_eq!(route.vehicle, VehicleClass::MediumTruck);
    assert_eq!(route.geometry.len(), 4);
    assert!(!route.road_routed);
}

#[test]
fn test_offline_results_are_reproducible() {
    let from = q("Ludhiana", "Punjab");
    let to = q("Madurai", "Tamil Nadu");
    let first = optimize_route_offline(&from, &to, 15.0).unwrap();
    let second = optimize_route_offline(&from, &to, 15.0).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_async_offline_provider() {
    let optimizer = RouteOptimizer::with_config(RouterConfig {
        offline: true,
        ..Default::default()
    })
    .unwrap();

    let live = tokio_test::block_on(optimizer.optimize(&q("Delhi", ""), &q("Mumbai", ""), 25.0)).unwrap();
    let sync = optimizer.optimize_offline(&q("Delhi", ""), &q("Mumbai", ""), 25.0).unwrap();
    assert_eq!(live, sync);
}

#[tokio::test]
async fn test_live_routing_against_mock_server() {
    let server = MockServer::start().await;
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_clone = Arc::clone(&calls);

    Mock::given(method("GET"))
        .and(path_regex(r"^/route/v1/driving/[-0-9.]+,[-0-9.]+;[-0-9.]+,[-0-9.]+$"))
        .and(query_param("overview", "full"))
        .and(query_param("geometries", "geojson"))
        .respond_with(move |_: &wiremock::Request| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "code": "Ok",
                "routes": [{
                    "distance": 100_000.0,
                    "duration": 7_200.0,
                    "geometry": { "coordinates": [[77.0, 28.0], [76.5, 27.5], [76.0, 27.0]] }
                }]
            }))
        })
        .mount(&server)
        .await;

    let optimizer = RouteOptimizer::with_config(RouterConfig {
        osrm_base_url: server.uri(),
        max_concurrent_requests: 3,
        ..Default::default()
    })
    .unwrap();

    let progress_calls = Arc::new(AtomicUsize::new(0));
    let progress_clone = Arc::clone(&progress_calls);
    let route = optimizer
        .optimize_with_progress(&q("Delhi", "Delhi"), &q("Mumbai", "Maharashtra"), 10.0, move |_, total| {
            assert_eq!(total, 6);
            progress_clone.fetch_add(1, Ordering::SeqCst);
        })
        .await
        .unwrap();

    // Four nodes, six unordered pairs, one query each
    assert_eq!(calls.load(Ordering::SeqCst), 6);
    assert_eq!(progress_calls.load(Ordering::SeqCst), 6);
    assert!(route.road_routed);
    assert_eq!(route.segments.len(), 3);
    for segment in &route.segments {
        assert_eq!(segment.distance_km, 100.0);
        assert_eq!(segment.duration_hours, 2.0);
        assert_eq!(segment.road_class, RoadClass::StateHighway);
    }
    assert!((route.total_distance_km - 300.0).abs() < 1e-9);
    assert!((route.carbon_emission_kg - 300.0 * 0.15).abs() < 1e-9);
    // 3 points per leg, junctions shared
    assert_eq!(route.geometry.len(), 7);
}

#[tokio::test]
async fn test_routing_outage_falls_back_to_estimates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let optimizer = RouteOptimizer::with_config(RouterConfig {
        osrm_base_url: server.uri(),
        ..Default::default()
    })
    .unwrap();

    let from = q("Delhi", "Delhi");
    let to = q("Mumbai", "Maharashtra");
    let live = optimizer.optimize(&from, &to, 10.0).await.unwrap();
    let offline = optimize_route_offline(&from, &to, 10.0).unwrap();

    assert!(!live.road_routed);
    assert_eq!(live.order, offline.order);
    assert_eq!(live.total_distance_km, offline.total_distance_km);
}

fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_carbon-route"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to run carbon-route")
}

#[test]
#[cfg(not(feature = "ci-tests-disabled"))]
fn test_cli_offline_report() {
    let output = run_cli(&["Nashik,Maharashtra", "Mumbai,Maharashtra", "--offline", "-q", "3"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Farmer at Nashik"));
    assert!(stdout.contains("Vendor at Mumbai"));
    assert!(stdout.contains("Van"));
}

#[test]
#[cfg(not(feature = "ci-tests-disabled"))]
fn test_cli_offline_json() {
    let output = run_cli(&["Delhi", "Mumbai", "--offline", "--json", "--grade", "a", "--explain"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["route"]["path"].as_array().unwrap().len(), 4);
    assert_eq!(value["route"]["strategy"], "TSP-2Opt");
    assert_eq!(value["grade"]["color"], "#10B981");
    assert_eq!(value["steps"][0]["kind"], "init");
}

#[test]
#[cfg(not(feature = "ci-tests-disabled"))]
fn test_cli_dry_run() {
    let output = run_cli(&["Delhi", "Mumbai", "--dry-run"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("DRY RUN"));
    assert!(stdout.contains("Indore Grain Hub"));
}

#[test]
#[cfg(not(feature = "ci-tests-disabled"))]
fn test_cli_rejects_bad_input() {
    let output = run_cli(&["Pune", "Pune", "--offline"]);
    assert!(!output.status.success());

    let output = run_cli(&["Delhi", "Mumbai", "--offline", "--grade", "Z"]);
    assert!(!output.status.success());

    let output = run_cli(&["Delhi", "Mumbai", "--offline", "--quantity", "0"]);
    assert!(!output.status.success());
}

#[test]
#[cfg(not(feature = "ci-tests-disabled"))]
fn test_cli_suggests_misspelled_district() {
    let output = run_cli(&["Nashk", "Mumbai", "--offline"]);
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("did you mean 'nashik'"), "stderr: {stderr}");
}
