use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::Router;
use tokio::net::TcpListener;
use tokio_test::assert_ok;

use heartbeat_relay::api;
use heartbeat_relay::app::HeartbeatClient;

use crate::{app_router, config_for, get};

async fn spawn(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn app_relays_real_api_heartbeat() {
    let api_addr = spawn(api::create_router()).await;

    let config = config_for("127.0.0.1", api_addr.port(), 2000);
    let (status, body) = get(app_router(&config), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Hello World! API connection is: OK");
}

#[tokio::test]
async fn full_chain_over_sockets() {
    let api_addr = spawn(api::create_router()).await;
    let config = config_for("127.0.0.1", api_addr.port(), 2000);
    let app_addr = spawn(app_router(&config)).await;

    let response = reqwest::get(format!("http://{}/", app_addr)).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(
        response.text().await.unwrap(),
        "Hello World! API connection is: OK"
    );
}

#[tokio::test]
async fn heartbeat_client_reads_api_body() {
    let api_addr = spawn(api::create_router()).await;
    let config = config_for("127.0.0.1", api_addr.port(), 2000);

    let client = HeartbeatClient::from_config(&config).unwrap();
    let heartbeat = assert_ok!(client.check().await);
    assert_eq!(heartbeat, api::HEARTBEAT_BODY);
}
