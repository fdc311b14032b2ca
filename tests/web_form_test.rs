use airfare_insights::core::ConfigProvider;
use airfare_insights::web::{create_router, AppState, PageContext, SvgChartRenderer};
use airfare_insights::{EtlEngine, LocalStorage, RoutePricePipeline, TomlConfig};
use httpmock::prelude::*;
use std::net::SocketAddr;
use std::time::Duration;
use tempfile::TempDir;

/// Starts the web form on an ephemeral port, backed by the given provider.
async fn start_app(provider: &MockServer, output: &TempDir) -> SocketAddr {
    start_app_with_timeout(provider, output, Duration::from_secs(10)).await
}

async fn start_app_with_timeout(
    provider: &MockServer,
    output: &TempDir,
    request_timeout: Duration,
) -> SocketAddr {
    let config = TomlConfig::from_toml_str(&format!(
        "[provider]\nendpoint = \"{}\"\ntoken = \"t\"\n",
        provider.url("/v1/prices/monthly")
    ))
    .unwrap();

    let page = PageContext {
        airports: config.airports().to_vec(),
        default_route: config.default_route(),
        currency: config.currency().to_string(),
    };
    let storage = LocalStorage::new(output.path().display().to_string());
    let pipeline = RoutePricePipeline::new(storage, config).unwrap();
    let state = AppState::new(EtlEngine::new(pipeline), page, SvgChartRenderer::default());
    let router = create_router(state, request_timeout);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn test_get_renders_form_without_fetching() {
    let provider = MockServer::start();
    let api_mock = provider.mock(|when, then| {
        when.method(GET).path("/v1/prices/monthly");
        then.status(200).json_body(serde_json::json!({"data": {}}));
    });
    let output = TempDir::new().unwrap();
    let addr = start_app(&provider, &output).await;

    let response = reqwest::get(format!("http://{}/", addr)).await.unwrap();
    assert!(response.status().is_success());
    let html = response.text().await.unwrap();

    api_mock.assert_hits(0);
    assert!(html.contains("<option value=\"SYD\" selected>Sydney (SYD)</option>"));
    assert!(html.contains("<option value=\"MEL\" selected>Melbourne (MEL)</option>"));
    assert!(!html.contains("alert-danger"));
}

#[tokio::test]
async fn test_post_renders_summary_chart_and_table() {
    let provider = MockServer::start();
    let api_mock = provider.mock(|when, then| {
        when.method(GET)
            .path("/v1/prices/monthly")
            .query_param("origin", "BNE")
            .query_param("destination", "PER");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "data": {"2025-06": {"2025-06-01": 100, "2025-06-15": 80, "2025-06-30": 120}}
            }));
    });
    let output = TempDir::new().unwrap();
    let addr = start_app(&provider, &output).await;

    let html = reqwest::Client::new()
        .post(format!("http://{}/", addr))
        .form(&[("origin", "BNE"), ("destination", "PER")])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    api_mock.assert();
    assert!(html.contains("Route: BNE → PER"));
    assert!(html.contains("<span>$100.00 AUD</span>"));
    assert!(html.contains("Cheapest (2025-06-15)</strong><span>$80</span>"));
    assert!(html.contains("Most Expensive (2025-06-30)</strong><span>$120</span>"));
    assert!(html.contains("<svg"));
    assert!(html.contains("<td>2025-06-15</td>"));
    assert!(html.contains("<option value=\"BNE\" selected>"));

    // 網頁模式不寫檔
    assert!(std::fs::read_dir(output.path()).unwrap().next().is_none());
}

#[tokio::test]
async fn test_post_provider_failure_shows_error_and_server_keeps_serving() {
    let provider = MockServer::start();
    provider.mock(|when, then| {
        when.method(GET)
            .path("/v1/prices/monthly")
            .query_param("origin", "SYD");
        then.status(503).body("Service Unavailable");
    });
    provider.mock(|when, then| {
        when.method(GET)
            .path("/v1/prices/monthly")
            .query_param("origin", "ADL");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"data": {"2025-06": {"2025-06-02": 200}}}));
    });
    let output = TempDir::new().unwrap();
    let addr = start_app(&provider, &output).await;
    let client = reqwest::Client::new();

    let failed = client
        .post(format!("http://{}/", addr))
        .form(&[("origin", "SYD"), ("destination", "MEL")])
        .send()
        .await
        .unwrap();
    assert!(failed.status().is_success());
    let html = failed.text().await.unwrap();
    assert!(html.contains("Error: API Error 503: Service Unavailable"));

    let html = client
        .post(format!("http://{}/", addr))
        .form(&[("origin", "ADL"), ("destination", "MEL")])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("Route: ADL → MEL"));
    assert!(html.contains("<span>$200.00 AUD</span>"));
}

#[tokio::test]
async fn test_health_endpoint() {
    let provider = MockServer::start();
    let output = TempDir::new().unwrap();
    let addr = start_app(&provider, &output).await;

    let body: serde_json::Value = reqwest::get(format!("http://{}/health", addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_slow_provider_hits_request_timeout() {
    let provider = MockServer::start();
    provider.mock(|when, then| {
        when.method(GET).path("/v1/prices/monthly");
        then.status(200)
            .delay(Duration::from_secs(3))
            .json_body(serde_json::json!({"data": {"2025-06": {"2025-06-02": 200}}}));
    });
    let output = TempDir::new().unwrap();
    let addr = start_app_with_timeout(&provider, &output, Duration::from_millis(200)).await;

    let response = reqwest::Client::new()
        .post(format!("http://{}/", addr))
        .form(&[("origin", "SYD"), ("destination", "MEL")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::REQUEST_TIMEOUT);
}
