use axum::{
    Json,
    body::{Body, Bytes},
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{info, warn};

use super::ClientIp;
use crate::error::ReviewError;
use crate::metrics::{REJECTED_TOTAL, REQUEST_TOTAL, STREAMED_TOTAL, TRACKED_CLIENTS};
use crate::models::ReviewResponse;
use crate::prompt::build_dynamic_system_prompt;
use crate::state::AppState;
use crate::upstream::AnthropicClient;
use crate::validate::validate_review;

// POST /review
//
// validate -> rate limit -> build prompt -> one upstream call, then either
// relay the SSE body untouched or return the first text block as JSON.
pub async fn review_handler(
    State(state): State<Arc<AppState>>,
    ClientIp(ip): ClientIp,
    body: Bytes,
) -> Result<Response, ReviewError> {
    REQUEST_TOTAL.inc();

    let review = validate_review(&body, state.max_code_chars).inspect_err(|e| {
        REJECTED_TOTAL.with_label_values(&["validation"]).inc();
        warn!(ip = %ip, error = %e, "rejected review request");
    })?;

    let limited = state.rate_limiter.check(&ip);
    TRACKED_CLIENTS.set(state.rate_limiter.tracked_clients() as f64);
    if let Err(limited) = limited {
        REJECTED_TOTAL.with_label_values(&["rate_limit"]).inc();
        warn!(ip = %ip, retry_after_secs = limited.retry_after_secs(), "rate limit exceeded");
        return Err(limited.into());
    }

    let system = build_dynamic_system_prompt(review.persona.system_prompt, &mut rand::rng());
    let request = AnthropicClient::messages_request(review.model.id, system, &review.code, review.stream);

    info!(
        ip = %ip,
        persona = review.persona.id,
        model = review.model.id,
        stream = review.stream,
        code_chars = review.code.chars().count(),
        "forwarding review"
    );

    if review.stream {
        let upstream = state.upstream.send(&request).await?;
        STREAMED_TOTAL.inc();

        // body is relayed as-is; dropping it on client disconnect drops the upstream read
        let body = Body::from_stream(upstream.bytes_stream());
        return Ok((
            [
                (header::CONTENT_TYPE, "text/event-stream"),
                (header::CACHE_CONTROL, "no-cache"),
                (header::CONNECTION, "keep-alive"),
            ],
            body,
        )
            .into_response());
    }

    let text = state.upstream.review_text(&request).await?;
    Ok(Json(ReviewResponse {
        review: text,
        persona: review.persona.name.to_string(),
        model: review.model.name.to_string(),
    })
    .into_response())
}
