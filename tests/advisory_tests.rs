mod common;

use common::fixtures::benign_dataset;
use common::{MockServer, TestResult, assembler, assembler_with, init_logging};
use medreport::{
    AdvisoryError, AdvisoryProvider, AdvisorySource, FALLBACK_PRECAUTIONS, HttpAdvisoryProvider,
    PageGeometry, RecordingCanvas,
};
use std::sync::Arc;

#[tokio::test]
async fn server_error_renders_fallback_like_any_other_text() -> TestResult {
    init_logging();
    let server = MockServer::start("500 Internal Server Error", r#"{"error":"boom"}"#).await;
    let provider = Arc::new(HttpAdvisoryProvider::new(&server.url, "llama3"));

    let mut failed = RecordingCanvas::new(&PageGeometry::a4());
    let outline = assembler_with(provider)
        .assemble(&benign_dataset(), &mut failed)
        .await?;
    assert_eq!(outline.advisory, Some(AdvisorySource::Fallback));
    assert_eq!(server.request_bodies().len(), 1);

    // The same text supplied as ordinary advisory input draws identically.
    let mut dataset = benign_dataset();
    dataset.advisory_text = Some(FALLBACK_PRECAUTIONS.to_string());
    let mut provided = RecordingCanvas::new(&PageGeometry::a4());
    let outline = assembler().assemble(&dataset, &mut provided).await?;
    assert_eq!(outline.advisory, Some(AdvisorySource::Provided));

    assert_eq!(failed.commands(), provided.commands());
    Ok(())
}

#[tokio::test]
async fn successful_response_is_rendered() -> TestResult {
    let server = MockServer::start(
        "200 OK",
        r####"{"model":"llama3","response":"### Tailored Advice\n- **Diet:** More greens","done":true}"####,
    )
    .await;
    let provider = Arc::new(HttpAdvisoryProvider::new(&server.url, "llama3"));

    let mut canvas = RecordingCanvas::new(&PageGeometry::a4());
    let outline = assembler_with(provider)
        .assemble(&benign_dataset(), &mut canvas)
        .await?;

    assert_eq!(outline.advisory, Some(AdvisorySource::Generated));
    assert!(canvas.contains_text("Tailored Advice"));
    assert!(canvas.contains_text("More greens"));

    let bodies = server.request_bodies();
    let request: serde_json::Value = serde_json::from_str(&bodies[0])?;
    assert_eq!(request["model"], "llama3");
    assert_eq!(request["stream"], false);
    assert!(request["prompt"].as_str().unwrap_or_default().contains("Age: 54"));
    Ok(())
}

#[tokio::test]
async fn provider_reports_status_failures() {
    let server = MockServer::start("503 Service Unavailable", "").await;
    let provider = HttpAdvisoryProvider::new(&server.url, "llama3");
    let result = provider.generate("prompt").await;
    assert!(matches!(result, Err(AdvisoryError::Status(503))));
}

#[tokio::test]
async fn provider_rejects_malformed_bodies() {
    let server = MockServer::start("200 OK", "<html>not json</html>").await;
    let provider = HttpAdvisoryProvider::new(&server.url, "llama3");
    assert!(matches!(
        provider.generate("prompt").await,
        Err(AdvisoryError::Malformed(_))
    ));

    let server = MockServer::start("200 OK", r#"{"done":true}"#).await;
    let provider = HttpAdvisoryProvider::new(&server.url, "llama3");
    assert!(matches!(
        provider.generate("prompt").await,
        Err(AdvisoryError::Malformed(_))
    ));
}

#[tokio::test]
async fn provider_rejects_blank_text() {
    let server = MockServer::start("200 OK", r#"{"response":"   \n "}"#).await;
    let provider = HttpAdvisoryProvider::new(&server.url, "llama3");
    assert!(matches!(
        provider.generate("prompt").await,
        Err(AdvisoryError::Empty)
    ));
}

#[tokio::test]
async fn unreachable_service_is_an_http_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let provider = HttpAdvisoryProvider::new(format!("http://{addr}/api/generate"), "llama3");
    assert!(matches!(
        provider.generate("prompt").await,
        Err(AdvisoryError::Http(_))
    ));
}
