// tests/common/mod.rs
// Shared helpers: a fake Anthropic endpoint and a gateway wired to it

#![allow(dead_code)]

use axum::{
    Json, Router,
    body::{Body, Bytes},
    extract::State,
    http::{HeaderMap, Request, StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use codenoscopy::rate_limit::RateLimiter;
use codenoscopy::server::build_router;
use codenoscopy::state::AppState;
use codenoscopy::upstream::AnthropicClient;

pub const API_KEY: &str = "test-key";
pub const MAX_CODE_CHARS: usize = 20;
pub const RATE_LIMIT: usize = 2;

// One recorded upstream call
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub api_key: Option<String>,
    pub version: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct Canned {
    status: StatusCode,
    content_type: &'static str,
    body: String,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

pub struct FakeUpstream {
    pub base_url: String,
    pub seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl FakeUpstream {
    pub fn calls(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }
}

async fn messages(State(canned): State<Canned>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    let get = |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).map(String::from);
    canned.seen.lock().unwrap().push(SeenRequest {
        api_key: get("x-api-key"),
        version: get("anthropic-version"),
        body,
    });

    (
        canned.status,
        [(header::CONTENT_TYPE, canned.content_type)],
        canned.body.clone(),
    )
        .into_response()
}

pub async fn spawn_upstream(status: StatusCode, content_type: &'static str, body: impl Into<String>) -> FakeUpstream {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let canned = Canned {
        status,
        content_type,
        body: body.into(),
        seen: Arc::clone(&seen),
    };
    let app = Router::new().route("/v1/messages", post(messages)).with_state(canned);
    let addr = serve_on_ephemeral_port(app).await;

    FakeUpstream {
        base_url: format!("http://{addr}"),
        seen,
    }
}

pub async fn spawn_json_upstream(text: &str) -> FakeUpstream {
    let body = serde_json::json!({
        "id": "msg_test",
        "type": "message",
        "role": "assistant",
        "content": [{ "type": "text", "text": text }],
    });
    spawn_upstream(StatusCode::OK, "application/json", body.to_string()).await
}

// Sets the flag once the response body owning it is dropped
struct DropFlag(Arc<AtomicBool>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

// Upstream that streams a delta every 20ms forever. The flag turns true when
// the server drops the stream, which happens once the reader goes away.
pub async fn spawn_endless_upstream() -> (String, Arc<AtomicBool>) {
    let dropped = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&dropped);
    let app = Router::new().route(
        "/v1/messages",
        post(move || {
            let guard = DropFlag(Arc::clone(&flag));
            async move {
                let ticks = futures::stream::unfold(guard, |guard| async move {
                    tokio::time::sleep(Duration::from_millis(20)).await;
                    Some((Ok::<_, std::io::Error>(Bytes::from(sse_delta("tick "))), guard))
                });
                ([(header::CONTENT_TYPE, "text/event-stream")], Body::from_stream(ticks)).into_response()
            }
        }),
    );
    let addr = serve_on_ephemeral_port(app).await;
    (format!("http://{addr}"), dropped)
}

pub async fn serve_on_ephemeral_port(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
            .await
            .unwrap();
    });
    addr
}

// A port nothing listens on
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub fn gateway(upstream_url: &str) -> Router {
    let upstream = AnthropicClient::new(reqwest::Client::new(), upstream_url, API_KEY.to_string());
    let limiter = RateLimiter::new(RATE_LIMIT, Duration::from_secs(60));
    build_router(Arc::new(AppState::new(upstream, limiter, MAX_CODE_CHARS)))
}

pub fn review_request(uri: &str, ip: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("cf-connecting-ip", ip)
        .body(body.into())
        .unwrap()
}

pub fn json_review(ip: &str, body: Value) -> Request<Body> {
    review_request("/api/review", ip, body.to_string())
}

pub async fn body_bytes(response: Response) -> axum::body::Bytes {
    axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap()
}

pub async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub fn sse_delta(text: &str) -> String {
    format!(
        "event: content_block_delta\ndata: {}\n\n",
        serde_json::json!({
            "type": "content_block_delta",
            "index": 0,
            "delta": { "type": "text_delta", "text": text }
        })
    )
}

pub fn sse_body(deltas: &[&str]) -> String {
    let mut body = String::from(
        "event: message_start\ndata: {\"type\":\"message_start\",\"message\":{\"id\":\"msg_test\"}}\n\n",
    );
    for delta in deltas {
        body.push_str(&sse_delta(delta));
    }
    body.push_str("event: message_stop\ndata: {\"type\":\"message_stop\"}\n\n");
    body
}
