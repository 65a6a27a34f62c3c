/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for tushare-pro-adapter tests

#![allow(dead_code)]

use serde_json::{Value, json};
use tushare_pro_adapter::ClientConfig;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const TEST_TOKEN: &str = "abc";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client configuration pointed at the mock server
pub fn mock_config(server: &MockServer) -> ClientConfig {
    ClientConfig::default().with_base_url(server.uri())
}

/// Successful `stock_basic` response body
pub fn stock_basic_body() -> Value {
    json!({
        "request_id": "6a1f3e",
        "code": 0,
        "msg": "",
        "data": {
            "fields": ["ts_code", "name"],
            "items": [
                ["000001.SZ", "平安银行"],
                ["000002.SZ", "万科A"],
                ["600000.SH", "浦发银行"]
            ],
            "has_more": false
        }
    })
}

/// Rejection body with the given message
pub fn error_body(code: i64, msg: &str) -> Value {
    json!({"code": code, "msg": msg, "data": null})
}

/// Answer every POST with `body`
pub async fn mount_json(server: &MockServer, body: Value) {
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// JSON bodies of every request the server has seen
pub async fn received_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|request: &Request| request.body_json().expect("request body is json"))
        .collect()
}
