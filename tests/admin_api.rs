//! Admin endpoint tests, served in-process.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;
use tablet_discovery::config::GatewayConfig;
use tablet_discovery::discovery::LagSettings;
use tablet_discovery::http::HttpServer;
use tower::ServiceExt;

mod common;

async fn send(server: &HttpServer, request: Request<Body>) -> (StatusCode, Value) {
    let res = server.router().oneshot(request).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_get_env_reports_defaults() {
    let server = HttpServer::new(GatewayConfig::default());
    let (status, body) = send(&server, get("/debug/env")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "low_replication_lag_secs": 30,
            "high_replication_lag_minimum_serving_secs": 7200,
            "min_number_serving_tablets": 2,
            "legacy_replication_lag_algorithm": true,
        })
    );
}

#[tokio::test]
async fn test_partial_env_update() {
    let server = HttpServer::new(GatewayConfig::default());
    let (status, body) = send(
        &server,
        post_json("/debug/env", &json!({ "min_number_serving_tablets": 3, "legacy_replication_lag_algorithm": false })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["min_number_serving_tablets"], 3);
    assert_eq!(body["low_replication_lag_secs"], 30);

    let settings = server.state().settings();
    assert_eq!(settings.min_number_serving_tablets(), 3);
    assert!(!settings.legacy_algorithm());
    assert_eq!(settings.low_replication_lag(), Duration::from_secs(30));
}

#[tokio::test]
async fn test_env_update_rejects_inverted_thresholds() {
    let server = HttpServer::new(GatewayConfig::default());
    let (status, body) = send(
        &server,
        post_json("/debug/env", &json!({ "low_replication_lag_secs": 9000 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("must be below"));
    assert_eq!(server.state().settings().low_replication_lag(), Duration::from_secs(30));
}

#[tokio::test]
async fn test_filter_endpoint_uses_live_settings() {
    let server = HttpServer::new(GatewayConfig::default());
    let fleet = common::fleet(&[1800, 2100, 2400, 2700]);
    let body = serde_json::to_value(&fleet).unwrap();

    let (status, res) = send(&server, post_json("/discovery/filter", &body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(res.as_array().unwrap().len(), 4);

    server.state().settings().set_legacy_algorithm(false);
    let (_, res) = send(&server, post_json("/discovery/filter", &body)).await;
    let uids: Vec<u64> = res
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["tablet"]["uid"].as_u64().unwrap())
        .collect();
    assert_eq!(uids, vec![1, 2]);
}

#[tokio::test]
async fn test_filter_endpoint_empty_list() {
    let server = HttpServer::new(GatewayConfig::default());
    let (status, res) = send(&server, post_json("/discovery/filter", &json!([]))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(res, json!([]));
}

#[tokio::test]
async fn test_status_reports_algorithm() {
    let mut config = GatewayConfig::default();
    config.discovery.legacy_algorithm = false;
    let server = HttpServer::new(config);

    let (status, body) = send(&server, get("/admin/status")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["algorithm"], "threshold");
    assert_eq!(body["status"], "operational");
}

#[tokio::test]
async fn test_api_key_required_when_configured() {
    let mut config = GatewayConfig::default();
    config.admin.api_key = Some("s3cret".into());
    let server = HttpServer::new(config);

    let (status, _) = send(&server, get("/debug/env")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let request = Request::builder()
        .uri("/debug/env")
        .header(header::AUTHORIZATION, "Bearer s3cret")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&server, request).await;
    assert_eq!(status, StatusCode::OK);
}
