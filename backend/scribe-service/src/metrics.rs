use actix_web::HttpResponse;
use lazy_static::lazy_static;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

lazy_static! {
    /// Follow graph mutations, labelled by event (follow / unfollow).
    pub static ref FOLLOW_EVENTS: IntCounterVec = register_int_counter_vec!(
        "scribe_follow_events_total",
        "Total number of follow graph mutations",
        &["event"]
    )
    .expect("Failed to register follow events counter");

    /// Feed requests, labelled by result (composed / empty).
    pub static ref FEED_REQUESTS: IntCounterVec = register_int_counter_vec!(
        "scribe_feed_requests_total",
        "Total number of personal feed requests",
        &["result"]
    )
    .expect("Failed to register feed requests counter");

    /// Page cache traffic, labelled by event (hit / miss / clear).
    pub static ref PAGE_CACHE_EVENTS: IntCounterVec = register_int_counter_vec!(
        "scribe_page_cache_events_total",
        "Total number of page cache events",
        &["event"]
    )
    .expect("Failed to register page cache events counter");
}

/// Prometheus exposition endpoint
pub async fn serve_metrics() -> HttpResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return HttpResponse::InternalServerError().finish();
    }

    HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer)
}
