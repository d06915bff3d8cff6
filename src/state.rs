use crate::config::ServeArgs;
use crate::rate_limit::RateLimiter;
use crate::upstream::AnthropicClient;

// app's shared state, built once in serve and shared behind an Arc
pub struct AppState {
    pub upstream: AnthropicClient,
    pub rate_limiter: RateLimiter, // process-lifetime table, cleared only on restart
    pub max_code_chars: usize,
}

impl AppState {
    pub fn new(upstream: AnthropicClient, rate_limiter: RateLimiter, max_code_chars: usize) -> Self {
        Self {
            upstream,
            rate_limiter,
            max_code_chars,
        }
    }

    pub fn from_args(args: &ServeArgs) -> Self {
        let upstream = AnthropicClient::new(
            reqwest::Client::new(),
            &args.upstream_url,
            args.api_key.clone(),
        );
        let rate_limiter = RateLimiter::new(args.rate_limit, args.rate_window());
        Self::new(upstream, rate_limiter, args.max_code_chars)
    }
}
