use lazy_static::lazy_static;
use prometheus::{
    Counter, CounterVec, Gauge, Histogram, register_counter, register_counter_vec, register_gauge,
    register_histogram,
};

lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("codenoscopy_review_requests_total", "Total number of review requests")
            .unwrap();
    pub static ref REJECTED_TOTAL: CounterVec = register_counter_vec!(
        "codenoscopy_review_rejected_total",
        "Review requests rejected before reaching upstream, by reason",
        &["reason"]
    )
    .unwrap();
    pub static ref UPSTREAM_ERRORS: Counter =
        register_counter!("codenoscopy_upstream_errors_total", "Failed upstream calls").unwrap();
    pub static ref STREAMED_TOTAL: Counter =
        register_counter!("codenoscopy_streamed_reviews_total", "Reviews relayed as SSE").unwrap();
    pub static ref REQUEST_LATENCY: Histogram = register_histogram!(
        "codenoscopy_upstream_latency_seconds",
        "Time until the upstream response headers arrive"
    )
    .unwrap();
    pub static ref TRACKED_CLIENTS: Gauge = register_gauge!(
        "codenoscopy_rate_limit_clients",
        "Client ips present in the rate limit table"
    )
    .unwrap();
}
