//! Shared application state handed to every axum handler.

use std::sync::Arc;

use parking_lot::RwLock;

use scam_honeypot_config::Settings;
use scam_honeypot_pipeline::EngagementPipeline;

use crate::rate_limit::RateLimiter;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RwLock<Settings>>,
    pub pipeline: Arc<EngagementPipeline>,
    pub rate_limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(config: Settings, pipeline: Arc<EngagementPipeline>) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            pipeline,
            rate_limiter: Arc::new(RateLimiter::new()),
        }
    }
}
