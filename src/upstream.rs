use std::time::Instant;

use tracing::{debug, error};

use crate::error::ReviewError;
use crate::metrics::{REQUEST_LATENCY, UPSTREAM_ERRORS};
use crate::models::{Message, MessagesRequest, MessagesResponse};

pub const ANTHROPIC_VERSION: &str = "2023-06-01";
pub const MAX_TOKENS: u32 = 4096;

// Thin client for the Anthropic Messages API.
// One call per review, no retries and no timeout: the browser owns both.
#[derive(Clone)]
pub struct AnthropicClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl AnthropicClient {
    pub fn new(client: reqwest::Client, base_url: &str, api_key: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub fn messages_request(model_id: &'static str, system: String, code: &str, stream: bool) -> MessagesRequest {
        MessagesRequest {
            model: model_id,
            max_tokens: MAX_TOKENS,
            stream,
            system,
            messages: vec![Message {
                role: "user",
                content: crate::prompt::review_instruction(code),
            }],
        }
    }

    // Send the request and hand back the response only if it is 2xx.
    // The body of a failed response is logged, never returned.
    pub async fn send(&self, request: &MessagesRequest) -> Result<reqwest::Response, ReviewError> {
        let start_time = Instant::now();

        let result = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(request)
            .send()
            .await;

        REQUEST_LATENCY.observe(start_time.elapsed().as_secs_f64());

        let response = result.map_err(|e| {
            UPSTREAM_ERRORS.inc();
            error!(error = %e, "Anthropic API request failed");
            ReviewError::Upstream(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            UPSTREAM_ERRORS.inc();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Anthropic API error");
            return Err(ReviewError::Upstream(format!("upstream status {status}")));
        }

        debug!(model = request.model, stream = request.stream, "upstream accepted review request");
        Ok(response)
    }

    // Buffered path: read the whole body and pull the first text block
    pub async fn review_text(&self, request: &MessagesRequest) -> Result<String, ReviewError> {
        let response = self.send(request).await?;

        let body = response.json::<MessagesResponse>().await.map_err(|e| {
            UPSTREAM_ERRORS.inc();
            error!(error = %e, "unreadable Anthropic API response");
            ReviewError::Upstream(format!("Parse Error: {e}"))
        })?;

        body.first_text().ok_or_else(|| {
            UPSTREAM_ERRORS.inc();
            error!("Anthropic API response had no text content");
            ReviewError::Upstream("no text content".to_string())
        })
    }
}
