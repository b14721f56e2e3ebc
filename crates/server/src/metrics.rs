//! A3 — process-wide Prometheus metrics: turns handled, scam detections,
//! callback outcomes, and session-store backend health.

use std::sync::OnceLock;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::info;

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

pub fn init_metrics() -> PrometheusHandle {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install prometheus recorder");
    PROMETHEUS_HANDLE
        .set(handle.clone())
        .expect("prometheus handle already initialized");
    info!("prometheus metrics initialized");
    handle
}

pub async fn metrics_handler() -> impl IntoResponse {
    match PROMETHEUS_HANDLE.get() {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (StatusCode::SERVICE_UNAVAILABLE, "metrics not initialized".to_string()),
    }
}

pub fn record_turn(route: &str) {
    counter!("scam_honeypot_turns_total", "route" => route.to_string()).increment(1);
}

pub fn record_turn_latency(route: &str, seconds: f64) {
    histogram!("scam_honeypot_turn_duration_seconds", "route" => route.to_string())
        .record(seconds);
}

pub fn record_scam_detected(category: &str) {
    counter!("scam_honeypot_scam_detected_total", "category" => category.to_string())
        .increment(1);
}

pub fn record_callback_outcome(sent: bool) {
    let outcome = if sent { "sent" } else { "not_sent" };
    counter!("scam_honeypot_callback_total", "outcome" => outcome).increment(1);
}

pub fn record_rate_limited() {
    counter!("scam_honeypot_rate_limited_total").increment(1);
}

pub fn record_auth_failure() {
    counter!("scam_honeypot_auth_failures_total").increment(1);
}

pub fn record_store_error() {
    counter!("scam_honeypot_store_errors_total").increment(1);
}
