use anyhow::Context;
use futures::StreamExt;
use std::io::{Read, Write};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::config::ReviewArgs;
use crate::models::{ErrorBody, ReviewRequest, ReviewResponse, resolve_model};
use crate::personas;
use crate::sse::SseDecoder;

// What can go wrong on the requesting side, worded for the person waiting on a review
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("The review timed out. Please try again or use a shorter input.")]
    Timeout { partial: String },

    #[error("Network error while requesting review. Check your connection and try again.")]
    Network(#[source] reqwest::Error),

    #[error("{0}")]
    Server(String),

    #[error("Connection interrupted. Showing the partial review received so far.")]
    Interrupted { partial: String },

    #[error("Connection interrupted while streaming the review. Please try again.")]
    InterruptedEmpty,

    #[error("Failed to get review")]
    InvalidResponse(#[source] reqwest::Error),
}

impl ClientError {
    // Text received before the failure, if any
    pub fn partial(&self) -> Option<&str> {
        match self {
            ClientError::Timeout { partial } | ClientError::Interrupted { partial } if !partial.is_empty() => {
                Some(partial.as_str())
            }
            _ => None,
        }
    }
}

pub struct ReviewClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl ReviewClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    // Request a review, calling `on_delta` for every streamed text fragment.
    // The whole exchange is bounded by the client timeout. Text that arrived
    // before a timeout or a broken stream is carried in the error.
    pub async fn review<F>(&self, request: &ReviewRequest, mut on_delta: F) -> Result<ReviewResponse, ClientError>
    where
        F: FnMut(&str),
    {
        let mut received = String::new();
        let result = tokio::time::timeout(self.timeout, self.fetch(request, &mut received, &mut on_delta)).await;

        match result {
            Ok(result) => result,
            Err(_) => Err(ClientError::Timeout { partial: received }),
        }
    }

    async fn fetch<F>(
        &self,
        request: &ReviewRequest,
        received: &mut String,
        on_delta: &mut F,
    ) -> Result<ReviewResponse, ClientError>
    where
        F: FnMut(&str),
    {
        let response = self
            .client
            .post(format!("{}/api/review", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(ClientError::Network)?;

        if !response.status().is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| "Failed to get review".to_string());
            return Err(ClientError::Server(message));
        }

        let is_stream = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("text/event-stream"));

        if !is_stream {
            return response.json::<ReviewResponse>().await.map_err(ClientError::InvalidResponse);
        }

        let mut decoder = SseDecoder::new();
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let Ok(chunk) = chunk else {
                return Err(interrupted(std::mem::take(received)));
            };
            for delta in decoder.push(&chunk) {
                on_delta(&delta);
                received.push_str(&delta);
            }
        }
        if let Some(delta) = decoder.finish() {
            on_delta(&delta);
            received.push_str(&delta);
        }

        // a stream that ended without any text is treated as a broken one
        if received.is_empty() {
            return Err(ClientError::InterruptedEmpty);
        }

        Ok(ReviewResponse {
            review: std::mem::take(received),
            persona: persona_display_name(request.persona.as_deref()),
            model: resolve_model(request.model.as_deref()).name.to_string(),
        })
    }
}

fn interrupted(partial: String) -> ClientError {
    if partial.is_empty() {
        ClientError::InterruptedEmpty
    } else {
        ClientError::Interrupted { partial }
    }
}

fn persona_display_name(id: Option<&str>) -> String {
    let id = id.unwrap_or_default();
    personas::find(id).map_or_else(|| id.to_string(), |p| p.name.to_string())
}

// Streams deltas to a writer. The first write error is kept and later
// deltas are dropped, so a closed pipe does not abort the request mid-stream.
struct DeltaWriter<W: Write> {
    out: W,
    error: Option<std::io::Error>,
}

impl<W: Write> DeltaWriter<W> {
    fn new(out: W) -> Self {
        Self { out, error: None }
    }

    fn write(&mut self, delta: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.out.write_all(delta.as_bytes()).and_then(|()| self.out.flush()) {
            tracing::debug!(error = %e, "dropping review output after write failure");
            self.error = Some(e);
        }
    }

    fn finish(self) -> std::io::Result<()> {
        self.error.map_or(Ok(()), Err)
    }
}

// "-" reads stdin
pub fn read_source(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut code = String::new();
        std::io::stdin().read_to_string(&mut code).context("failed to read code from stdin")?;
        return Ok(code);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

// CLI entry for `codenoscopy review`
pub async fn run_review(client: &ReviewClient, args: &ReviewArgs, code: String) -> anyhow::Result<()> {
    if code.trim().is_empty() {
        anyhow::bail!("Please enter or upload some code to review");
    }

    let request = ReviewRequest {
        code: Some(code),
        persona: Some(args.persona.clone()),
        model: Some(args.model.clone()),
        stream: !args.no_stream,
    };

    let mut output = DeltaWriter::new(std::io::stdout());
    let result = client.review(&request, |delta| output.write(delta)).await;
    output.finish().context("failed to write review to stdout")?;

    match result {
        Ok(review) => {
            if args.no_stream {
                println!("{}", review.review);
            } else {
                println!();
            }
            eprintln!("-- {} / {}", review.persona, review.model);
            Ok(())
        }
        Err(e) => {
            if e.partial().is_some() {
                println!();
            }
            Err(e.into())
        }
    }
}
