//! Integration tests for the streaming text relay.

use refine_gateway::config::{AnalysisMode, GatewayConfig};
use refine_sdk::{AnalyzeRequest, Dashboard, DashboardState, GatewayClient, SdkError, Session};
use serde_json::{json, Value};

mod common;

fn streaming_config(upstream: &common::MockUpstream) -> GatewayConfig {
    let mut config = common::gateway_config(upstream);
    config.analysis.mode = AnalysisMode::Streaming;
    config
}

#[tokio::test]
async fn relays_chunks_in_order_as_text_plain() {
    let upstream = common::start_streaming_upstream(vec!["Hello, ", "World!"]).await;
    let (gateway_url, shutdown) = common::spawn_gateway(streaming_config(&upstream)).await;

    let client = reqwest::Client::new();
    let mut res = client
        .post(format!("{}/api/analyze", gateway_url))
        .json(&json!({ "code": "fn main() {}" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert!(res
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/plain"));

    let mut observed = Vec::new();
    let mut accumulated = String::new();
    while let Some(chunk) = res.chunk().await.unwrap() {
        let text = String::from_utf8_lossy(&chunk).to_string();
        accumulated.push_str(&text);
        observed.push(text);
    }

    assert_eq!(accumulated, "Hello, World!");
    // When the relay delivers the frames separately, boundaries survive.
    if observed.len() >= 2 {
        assert_eq!(observed[0], "Hello, ");
    }
    assert_eq!(upstream.hits(), 1);

    shutdown.trigger();
}

#[tokio::test]
async fn missing_code_rejected_without_upstream_call() {
    let upstream = common::start_streaming_upstream(vec!["never sent"]).await;
    let (gateway_url, shutdown) = common::spawn_gateway(streaming_config(&upstream)).await;

    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/api/analyze", gateway_url))
        .json(&json!({ "repo_url": "https://github.com/acme/demo" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Code is required" }));
    assert_eq!(upstream.hits(), 0);

    shutdown.trigger();
}

#[tokio::test]
async fn upstream_error_is_buffered_into_the_json_envelope() {
    let upstream = common::start_mock_upstream(|_| async {
        (500, r#"{"detail":"Model backend unavailable"}"#.to_string())
    })
    .await;
    let (gateway_url, shutdown) = common::spawn_gateway(streaming_config(&upstream)).await;

    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/api/analyze", gateway_url))
        .json(&json!({ "code": "fn main() {}" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 500);
    assert!(res
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("application/json"));
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Model backend unavailable" }));

    shutdown.trigger();
}

#[tokio::test]
async fn sdk_accumulates_stream_and_lands_in_success() {
    let upstream =
        common::start_streaming_upstream(vec!["- refactor the parser\n", "- add tests\n"]).await;
    let (gateway_url, shutdown) = common::spawn_gateway(streaming_config(&upstream)).await;

    let sdk = GatewayClient::new(&gateway_url);
    let session = Session::authenticated("tok-1");

    let mut dashboard = Dashboard::new();
    assert!(dashboard.begin_submit());

    let mut chunk_count = 0;
    let accumulated = sdk
        .analyze_stream(&session, &AnalyzeRequest::snippet("fn main() {}"), |_chunk| {
            chunk_count += 1;
        })
        .await
        .unwrap();

    assert_eq!(accumulated, "- refactor the parser\n- add tests\n");
    assert!(chunk_count >= 1);

    dashboard.on_stream_complete(&accumulated);
    let DashboardState::Success(view) = dashboard.state() else {
        panic!("expected Success, got {:?}", dashboard.state());
    };
    // bullet-list output is not JSON, so the view degrades to raw text
    assert_eq!(view.report.executive_summary, accumulated);
    assert!(view.report.code_smells.is_empty());

    shutdown.trigger();
}

#[tokio::test]
async fn sdk_surfaces_streaming_rejection_as_gateway_error() {
    let upstream = common::start_mock_upstream(|_| async {
        (429, r#"{"detail":"Rate limit exceeded"}"#.to_string())
    })
    .await;
    let (gateway_url, shutdown) = common::spawn_gateway(streaming_config(&upstream)).await;

    let sdk = GatewayClient::new(&gateway_url);
    let err = sdk
        .analyze_stream(&Session::anonymous(), &AnalyzeRequest::snippet("x"), |_| {})
        .await
        .unwrap_err();

    let SdkError::Gateway { status, message } = err else {
        panic!("expected Gateway error");
    };
    assert_eq!(status, 429);
    assert_eq!(message, "Rate limit exceeded");

    shutdown.trigger();
}
