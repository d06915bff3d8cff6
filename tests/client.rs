// tests/client.rs
// Review client against a live gateway and against misbehaving servers

mod common;

use axum::{
    Router,
    body::{Body, Bytes},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use std::time::Duration;

use codenoscopy::client::{ClientError, ReviewClient};
use codenoscopy::models::ReviewRequest;
use common::*;

fn request(stream: bool) -> ReviewRequest {
    ReviewRequest {
        code: Some("print(1)".to_string()),
        persona: Some("bug-hunter".to_string()),
        model: Some("sonnet".to_string()),
        stream,
    }
}

async fn live_gateway(upstream_url: &str) -> String {
    let addr = serve_on_ephemeral_port(gateway(upstream_url)).await;
    format!("http://{addr}")
}

// Stand-in gateway answering /api/review with a fixed handler
async fn fake_gateway(app: Router) -> String {
    let addr = serve_on_ephemeral_port(app).await;
    format!("http://{addr}")
}

fn client(url: &str) -> ReviewClient {
    ReviewClient::new(url, Duration::from_secs(10))
}

#[tokio::test]
async fn streams_deltas_to_callback_and_reconstructs_text() {
    let upstream = spawn_upstream(StatusCode::OK, "text/event-stream", sse_body(&["Hello ", "world"])).await;
    let url = live_gateway(&upstream.base_url).await;

    let mut deltas = Vec::new();
    let review = client(&url)
        .review(&request(true), |d| deltas.push(d.to_string()))
        .await
        .unwrap();

    assert_eq!(deltas.concat(), "Hello world");
    assert_eq!(review.review, "Hello world");
    assert_eq!(review.persona, "Bug Hunter");
    assert_eq!(review.model, "Sonnet 4.5 (Balanced)");
}

#[tokio::test]
async fn buffered_review_is_returned_as_is() {
    let upstream = spawn_json_upstream("Looks fine.").await;
    let url = live_gateway(&upstream.base_url).await;

    let mut called = false;
    let review = client(&url).review(&request(false), |_| called = true).await.unwrap();

    assert!(!called);
    assert_eq!(review.review, "Looks fine.");
    assert_eq!(review.persona, "Bug Hunter");
}

#[tokio::test]
async fn server_error_message_is_surfaced() {
    let upstream = spawn_json_upstream("unused").await;
    let url = live_gateway(&upstream.base_url).await;

    let mut bad = request(false);
    bad.persona = Some("nobody".to_string());
    let err = client(&url).review(&bad, |_| {}).await.unwrap_err();

    assert!(matches!(err, ClientError::Server(ref msg) if msg == "Invalid persona"));
}

#[tokio::test]
async fn interrupted_stream_keeps_partial_text() {
    let app = Router::new().route(
        "/api/review",
        post(|| async {
            let chunks = futures::stream::unfold(0u8, |step| async move {
                match step {
                    0 => Some((Ok(Bytes::from(sse_delta("Hello "))), 1)),
                    1 => {
                        // let the first chunk reach the client before failing
                        tokio::time::sleep(Duration::from_millis(50)).await;
                        Some((Err(std::io::Error::other("upstream reset")), 2))
                    }
                    _ => None,
                }
            });
            ([(header::CONTENT_TYPE, "text/event-stream")], Body::from_stream(chunks)).into_response()
        }),
    );
    let url = fake_gateway(app).await;

    let mut seen = String::new();
    let err = client(&url).review(&request(true), |d| seen.push_str(d)).await.unwrap_err();

    assert_eq!(seen, "Hello ");
    assert_eq!(err.partial(), Some("Hello "));
    assert_eq!(
        err.to_string(),
        "Connection interrupted. Showing the partial review received so far."
    );
}

#[tokio::test]
async fn stream_without_text_is_reported_as_interrupted() {
    let app = Router::new().route(
        "/api/review",
        post(|| async {
            (
                [(header::CONTENT_TYPE, "text/event-stream")],
                "event: message_stop\ndata: {\"type\":\"message_stop\"}\n\n",
            )
                .into_response()
        }),
    );
    let url = fake_gateway(app).await;

    let err = client(&url).review(&request(true), |_| {}).await.unwrap_err();

    assert!(matches!(err, ClientError::InterruptedEmpty));
    assert!(err.partial().is_none());
    assert_eq!(
        err.to_string(),
        "Connection interrupted while streaming the review. Please try again."
    );
}

#[tokio::test]
async fn slow_server_times_out() {
    let app = Router::new().route(
        "/api/review",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Response::new(Body::empty())
        }),
    );
    let url = fake_gateway(app).await;

    let err = ReviewClient::new(&url, Duration::from_millis(100))
        .review(&request(true), |_| {})
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Timeout { .. }));
    assert!(err.to_string().contains("timed out"));
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let url = closed_port_url().await;

    let err = client(&url).review(&request(false), |_| {}).await.unwrap_err();

    assert!(matches!(err, ClientError::Network(_)));
    assert!(err.to_string().starts_with("Network error"));
}
