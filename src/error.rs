use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use std::time::Duration;
use thiserror::Error;

use crate::models::ErrorBody;
use crate::rate_limit::RateLimited;

// Every way a review request can fail, each with a fixed status
#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("Invalid JSON body")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Code and persona are required")]
    MissingField,

    #[error("Invalid persona")]
    UnknownPersona(String),

    #[error("Code input is too large. Maximum allowed size is {limit} characters.")]
    PayloadTooLarge { limit: usize },

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimitExceeded { retry_after: Duration },

    // detail is for the log only
    #[error("Failed to get review from Claude")]
    Upstream(String),
}

impl ReviewError {
    pub fn status(&self) -> StatusCode {
        match self {
            ReviewError::InvalidJson(_)
            | ReviewError::MissingField
            | ReviewError::UnknownPersona(_) => StatusCode::BAD_REQUEST,
            ReviewError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ReviewError::RateLimitExceeded { .. } => StatusCode::TOO_MANY_REQUESTS,
            ReviewError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<RateLimited> for ReviewError {
    fn from(limited: RateLimited) -> Self {
        ReviewError::RateLimitExceeded {
            retry_after: limited.retry_after,
        }
    }
}

impl IntoResponse for ReviewError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        let mut response = (status, body).into_response();

        if let ReviewError::RateLimitExceeded { retry_after } = self {
            let secs = RateLimited { retry_after }.retry_after_secs();
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs));
        }

        response
    }
}
