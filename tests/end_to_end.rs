//! Full server over a real TCP listener, shut down through `Shutdown`.

use std::time::Duration;

use serde_json::{json, Value};
use swapi_gateway::http::GatewayServer;
use swapi_gateway::lifecycle::Shutdown;
use tokio::net::TcpListener;

mod common;

#[tokio::test]
async fn test_person_lookup_end_to_end() {
    let upstream =
        common::start_mock_upstream(200, r#"{"result":{"name":"Luke Skywalker"}}"#).await;

    let mut config = common::test_config(&upstream.base_url());
    config.listener.host = "127.0.0.1".into();
    config.listener.port = 0;

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = GatewayServer::new(config).unwrap();
    let server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    let client = reqwest::Client::builder().no_proxy().build().unwrap();

    let res = client
        .get(format!("http://{}/api/people/1", addr))
        .send()
        .await
        .expect("gateway unreachable");
    assert_eq!(res.status(), 200);
    assert!(res.headers().contains_key("x-request-id"));
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "result": { "name": "Luke Skywalker" } }));

    let res = client
        .get(format!("http://{}/foo/bar/baz", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Route not found" }));

    drop(client);
    shutdown.trigger();
    tokio::time::timeout(Duration::from_secs(5), server_task)
        .await
        .expect("server did not stop")
        .unwrap()
        .unwrap();

    assert_eq!(upstream.requests(), vec!["/api/people/1"]);
}
