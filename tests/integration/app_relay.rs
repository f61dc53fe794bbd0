use std::time::Duration;

use axum::http::StatusCode;
use httpmock::prelude::*;
use pretty_assertions::assert_eq;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::{app_router, config_for, get};

#[tokio::test]
async fn relays_ok_heartbeat() {
    let server = MockServer::start_async().await;
    let heartbeat = server
        .mock_async(|when, then| {
            when.method(GET).path("/heartbeat");
            then.status(200).body("OK");
        })
        .await;

    let config = config_for(&server.host(), server.port(), 2000);
    let (status, body) = get(app_router(&config), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Hello World! API connection is: OK");
    heartbeat.assert_async().await;
}

#[tokio::test]
async fn host_and_port_select_the_target() {
    let server = MockServer::start_async().await;
    let heartbeat = server
        .mock_async(|when, then| {
            when.method(GET).path("/heartbeat");
            then.status(200).body("mock-upstream-7f3a");
        })
        .await;

    let config = config_for("127.0.0.1", server.port(), 2000);
    let (status, body) = get(app_router(&config), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Hello World! API connection is: mock-upstream-7f3a");
    heartbeat.assert_async().await;
}

#[tokio::test]
async fn one_upstream_call_per_request() {
    let server = MockServer::start_async().await;
    let heartbeat = server
        .mock_async(|when, then| {
            when.method(GET).path("/heartbeat");
            then.status(200).body("OK");
        })
        .await;

    let config = config_for(&server.host(), server.port(), 2000);
    for _ in 0..3 {
        let (status, _) = get(app_router(&config), "/").await;
        assert_eq!(status, StatusCode::OK);
    }

    assert_eq!(heartbeat.hits_async().await, 3);
}

#[tokio::test]
async fn non_2xx_upstream_is_bad_gateway() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/heartbeat");
            then.status(503).body("starting");
        })
        .await;

    let config = config_for(&server.host(), server.port(), 2000);
    let (status, body) = get(app_router(&config), "/").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body, "API connection failed: api returned HTTP 503");
}

#[tokio::test]
async fn slow_upstream_is_gateway_timeout() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/heartbeat");
            then.status(200).body("OK").delay(Duration::from_secs(2));
        })
        .await;

    let config = config_for(&server.host(), server.port(), 100);
    let (status, body) = get(app_router(&config), "/").await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body, "API connection failed: api did not respond within 100ms");
}

#[tokio::test]
async fn unreachable_upstream_is_bad_gateway() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let config = config_for("127.0.0.1", port, 2000);
    let (status, body) = get(app_router(&config), "/").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.starts_with("API connection failed: api unreachable"), "{body}");
}

#[tokio::test]
async fn stalled_body_is_gateway_timeout() {
    // Headers arrive in time; the promised body never completes
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 1024];
        let _ = socket.read(&mut request).await;
        socket
            .write_all(b"HTTP/1.1 200 OK\r\ncontent-type: text/plain\r\ncontent-length: 64\r\n\r\nOK")
            .await
            .unwrap();
        socket.flush().await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
    });

    let config = config_for("127.0.0.1", port, 200);
    let (status, body) = get(app_router(&config), "/").await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body, "API connection failed: api did not respond within 200ms");
}
