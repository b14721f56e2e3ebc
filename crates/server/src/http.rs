//! A2 — the HTTP surface: router assembly, middleware stack, and the thin
//! handlers that translate wire shapes into `EngagementPipeline` calls.

use std::sync::Arc;

use axum::extract::{ConnectInfo, Path, State};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use scam_honeypot_core::ExtractedIntelligence;
use scam_honeypot_text_processing::hygiene::{
    is_probe_message, sanitize_message, validate_message_length, validate_session_id,
};
use scam_honeypot_transport::build_dossier;

use crate::auth::auth_middleware;
use crate::error::ApiError;
use crate::hygiene::{has_suspicious_header, is_bot_user_agent, jitter, scrub_response_headers};
use crate::metrics::{self, metrics_handler};
use crate::rate_limit::RateVerdict;
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.read().server.cors_origins());

    let api = Router::new()
        .route("/api/v1/message", post(post_message))
        .route("/api/v1/honeypot", post(post_honeypot))
        .route("/api/v1/session/:id", get(get_session))
        .route("/api/v1/session/:id", delete(delete_session))
        .route("/api/v1/health", get(health_check))
        .route("/api/v1/summary/:id", get(get_summary))
        .route_layer(middleware::from_fn(outbound_scrub))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            hygiene_middleware,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.config.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(api)
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::DELETE]);
    }
    let parsed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    CorsLayer::new()
        .allow_origin(parsed)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
}

/// C10's rate-analysis and probe-detection gate, run after auth so a
/// rejected request never reaches the pipeline.
async fn hygiene_middleware(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: axum::extract::Request,
    next: Next,
) -> axum::response::Response {
    let headers = request.headers();
    let user_agent = headers
        .get(axum::http::header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let client_key = format!("{}:{}", addr.ip(), user_agent);

    if has_suspicious_header(headers) || is_bot_user_agent(headers) {
        metrics::record_rate_limited();
        return ApiError::RateLimited.into_response();
    }

    if state.rate_limiter.check(&client_key) == RateVerdict::Suspicious {
        metrics::record_rate_limited();
        return ApiError::RateLimited.into_response();
    }

    next.run(request).await
}

/// C10's outbound scrub plus response-time jitter, the outermost layer so
/// it sees and rewrites the final response.
async fn outbound_scrub(request: axum::extract::Request, next: Next) -> axum::response::Response {
    let mut response = next.run(request).await;
    jitter().await;
    scrub_response_headers(response.headers_mut());
    response
}

#[derive(Debug, Deserialize)]
struct MessageRequest {
    session_id: String,
    message: String,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    status: &'static str,
    reply: String,
    session_id: String,
    scam_detected: bool,
    engagement_active: bool,
}

async fn post_message(
    State(state): State<AppState>,
    Json(body): Json<MessageRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let (session_id, message) = validate_and_clean(&body.session_id, &body.message)?;

    let outcome = state.pipeline.handle_turn(&session_id, &message).await?;
    metrics::record_turn("message");
    if outcome.scam_detected {
        metrics::record_scam_detected("message");
    }

    Ok(Json(MessageResponse {
        status: "success",
        reply: outcome.reply,
        session_id: outcome.session_id,
        scam_detected: outcome.scam_detected,
        engagement_active: outcome.engagement_active,
    }))
}

#[derive(Debug, Deserialize)]
struct HoneypotMessage {
    #[allow(dead_code)]
    sender: String,
    text: String,
    #[allow(dead_code)]
    timestamp: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HoneypotRequest {
    session_id: String,
    message: HoneypotMessage,
    #[allow(dead_code)]
    #[serde(default)]
    conversation_history: Option<serde_json::Value>,
    #[allow(dead_code)]
    #[serde(default)]
    metadata: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct HoneypotResponse {
    status: &'static str,
    reply: String,
}

async fn post_honeypot(
    State(state): State<AppState>,
    Json(body): Json<HoneypotRequest>,
) -> Result<Json<HoneypotResponse>, ApiError> {
    let (session_id, message) = validate_and_clean(&body.session_id, &body.message.text)?;

    let outcome = state.pipeline.handle_turn(&session_id, &message).await?;
    metrics::record_turn("honeypot");
    if outcome.scam_detected {
        metrics::record_scam_detected("honeypot");
    }

    Ok(Json(HoneypotResponse {
        status: "success",
        reply: outcome.reply,
    }))
}

fn validate_and_clean(session_id: &str, message: &str) -> Result<(String, String), ApiError> {
    validate_session_id(session_id).map_err(|_| ApiError::InvalidSessionId)?;
    validate_message_length(message).map_err(|_| ApiError::InvalidMessage)?;
    let cleaned = sanitize_message(message);
    if is_probe_message(&cleaned) {
        return Err(ApiError::RateLimited);
    }
    Ok((session_id.to_string(), cleaned))
}

#[derive(Debug, Serialize)]
struct SessionInfoResponse {
    session_id: String,
    scam_detected: bool,
    engagement_active: bool,
    turn_count: u32,
    extracted_intelligence: WireIntelSummary,
}

#[derive(Debug, Serialize)]
struct WireIntelSummary {
    payment_handles: Vec<String>,
    phone_numbers: Vec<String>,
    phishing_urls: Vec<String>,
    bank_references: Vec<String>,
    suspicious_keywords: Vec<String>,
}

impl From<&ExtractedIntelligence> for WireIntelSummary {
    fn from(intel: &ExtractedIntelligence) -> Self {
        Self {
            payment_handles: intel.payment_handles.iter().cloned().collect(),
            phone_numbers: intel.phone_numbers.iter().cloned().collect(),
            phishing_urls: intel.phishing_urls.iter().cloned().collect(),
            bank_references: intel.bank_references.iter().cloned().collect(),
            suspicious_keywords: intel.suspicious_keywords.iter().cloned().collect(),
        }
    }
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionInfoResponse>, ApiError> {
    validate_session_id(&id).map_err(|_| ApiError::InvalidSessionId)?;
    let session = state
        .pipeline
        .get_session(&id)
        .await?
        .ok_or(ApiError::SessionNotFound)?;

    Ok(Json(SessionInfoResponse {
        session_id: session.id,
        scam_detected: session.scam_detected,
        engagement_active: session.engagement_active,
        turn_count: session.turn_count,
        extracted_intelligence: (&session.intelligence).into(),
    }))
}

#[derive(Debug, Serialize)]
struct DeleteSessionResponse {
    status: &'static str,
    session_id: String,
    callback_sent: bool,
    total_messages: u32,
    extracted_intelligence: WireIntelSummary,
}

async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteSessionResponse>, ApiError> {
    validate_session_id(&id).map_err(|_| ApiError::InvalidSessionId)?;
    let (session, callback_sent) = state
        .pipeline
        .end_session(&id)
        .await?
        .ok_or(ApiError::SessionNotFound)?;
    metrics::record_callback_outcome(callback_sent);

    Ok(Json(DeleteSessionResponse {
        status: "success",
        session_id: session.id,
        callback_sent,
        total_messages: session.transcript.len() as u32,
        extracted_intelligence: (&session.intelligence).into(),
    }))
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: chrono::DateTime<Utc>,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now(),
    })
}

#[derive(Debug, Serialize)]
struct SummaryResponse {
    session_id: String,
    scam_detected: bool,
    engagement_active: bool,
    turn_count: u32,
    total_messages: u32,
    category: String,
    extracted_intelligence: WireIntelSummary,
    agent_notes: String,
}

async fn get_summary(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SummaryResponse>, ApiError> {
    validate_session_id(&id).map_err(|_| ApiError::InvalidSessionId)?;
    let session = state
        .pipeline
        .get_session(&id)
        .await?
        .ok_or(ApiError::SessionNotFound)?;
    let dossier = build_dossier(&session);

    Ok(Json(SummaryResponse {
        session_id: session.id.clone(),
        scam_detected: session.scam_detected,
        engagement_active: session.engagement_active,
        turn_count: session.turn_count,
        total_messages: session.transcript.len() as u32,
        category: session.category.as_label().to_string(),
        extracted_intelligence: (&session.intelligence).into(),
        agent_notes: dossier.agent_notes,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scam_honeypot_agent::ResponseGenerator;
    use scam_honeypot_config::Settings;
    use scam_honeypot_persistence::{InMemorySessionStore, LockManager};
    use scam_honeypot_pipeline::EngagementPipeline;
    use scam_honeypot_transport::CallbackDispatcher;
    use std::time::Duration;

    fn test_state() -> AppState {
        let store: Arc<dyn scam_honeypot_core::SessionStore> =
            Arc::new(InMemorySessionStore::new(Duration::from_secs(3600)));
        let locks = Arc::new(LockManager::new(100));
        let generator = Arc::new(ResponseGenerator::with_seed(None, 1));
        let dispatcher = Arc::new(CallbackDispatcher::new(None));
        let pipeline = Arc::new(EngagementPipeline::new(
            store, locks, generator, dispatcher, 0.7,
        ));
        AppState::new(Settings::default(), pipeline)
    }

    #[test]
    fn router_builds() {
        let state = test_state();
        let _ = create_router(state);
    }
}
