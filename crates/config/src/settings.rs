//! Layered `Settings`: defaults < `config/*.yaml` < environment variables.
//!
//! The external configuration surface is a set of flat, unprefixed
//! environment variable names (`API_KEY`, `SESSION_TIMEOUT_SECONDS`, ...)
//! rather than a nested `SECTION__field` convention, so the env layer here
//! is a small explicit override pass run after the `config` crate has
//! loaded the file-based layers, instead of `Environment::with_prefix`.

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Runtime environment; gates how strict `Settings::validate` is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    #[default]
    Development,
    Staging,
    Production,
}

impl RuntimeEnvironment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: RuntimeEnvironment,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub llm: LlmSettings,
    #[serde(default)]
    pub callback: CallbackConfig,
    #[serde(default)]
    pub persistence: PersistenceSettings,
    #[serde(default)]
    pub engagement: EngagementConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub security: SecurityConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engagement.max_concurrent_sessions == 0 {
            return Err(ConfigError::InvalidValue {
                field: "engagement.max_concurrent_sessions".into(),
                message: "must be at least 1".into(),
            });
        }
        if !(0.0..=1.0).contains(&self.engagement.scam_threshold) {
            return Err(ConfigError::InvalidValue {
                field: "engagement.scam_threshold".into(),
                message: format!("must be in [0, 1], got {}", self.engagement.scam_threshold),
            });
        }
        if self.engagement.max_engagement_turns == 0 {
            return Err(ConfigError::InvalidValue {
                field: "engagement.max_engagement_turns".into(),
                message: "must be at least 1".into(),
            });
        }
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".into(),
                message: "port cannot be 0".into(),
            });
        }
        if self.persistence.use_redis && self.persistence.redis_url.is_none() {
            let msg = "persistence.use_redis is set but persistence.redis_url is empty";
            if self.environment.is_strict() {
                return Err(ConfigError::InvalidValue {
                    field: "persistence.redis_url".into(),
                    message: msg.into(),
                });
            }
            tracing::warn!("{msg}; falling back to the in-memory store");
        }
        if self.environment.is_production() && self.auth.api_key.is_none() {
            return Err(ConfigError::InvalidValue {
                field: "auth.api_key".into(),
                message: "API_KEY must be set in production".into(),
            });
        }
        if self.callback.url.is_none() {
            tracing::warn!(
                "GUVI_CALLBACK_URL not configured; the callback dispatcher will no-op"
            );
        }
        if self.llm.gemini_api_key.is_none() {
            tracing::warn!("GEMINI_API_KEY not configured; falling back to the template path");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_metrics_port")]
    pub metrics_port: u16,
    /// Allowed CORS origins; empty means "allow any origin" (the HTTP
    /// surface is meant to be embedded behind arbitrary front-ends).
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    pub fn cors_origins(&self) -> &[String] {
        &self.cors_origins
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_metrics_port() -> u16 {
    9090
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            metrics_port: default_metrics_port(),
            cors_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthConfig {
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LlmSettings {
    #[serde(default)]
    pub gemini_api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CallbackConfig {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceSettings {
    #[serde(default)]
    pub redis_url: Option<String>,
    #[serde(default)]
    pub use_redis: bool,
    #[serde(default = "default_session_timeout")]
    pub session_timeout_seconds: u64,
}

fn default_session_timeout() -> u64 {
    3600
}

impl Default for PersistenceSettings {
    fn default() -> Self {
        Self {
            redis_url: None,
            use_redis: false,
            session_timeout_seconds: default_session_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementConfig {
    #[serde(default = "default_max_turns")]
    pub max_engagement_turns: u32,
    #[serde(default = "default_scam_threshold")]
    pub scam_threshold: f64,
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent_sessions: usize,
}

fn default_max_turns() -> u32 {
    15
}
fn default_scam_threshold() -> f64 {
    0.7
}
fn default_max_concurrent() -> usize {
    1000
}

impl Default for EngagementConfig {
    fn default() -> Self {
        Self {
            max_engagement_turns: default_max_turns(),
            scam_threshold: default_scam_threshold(),
            max_concurrent_sessions: default_max_concurrent(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_rate_limit")]
    pub per_minute: u32,
}

fn default_rate_limit() -> u32 {
    60
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            per_minute: default_rate_limit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SecurityConfig {
    #[serde(default)]
    pub enable_tamper_protection: bool,
    #[serde(default)]
    pub debug_mode: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

/// Loads settings from `config/default.yaml`, `config/{env}.yaml`, then
/// applies the flat environment-variable overrides.
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();
    builder = builder.add_source(File::with_name("config/default").required(false));
    if let Some(env_name) = env {
        builder =
            builder.add_source(File::with_name(&format!("config/{}", env_name)).required(false));
    }
    let config = builder.build()?;
    let mut settings: Settings = config.try_deserialize()?;
    apply_env_overrides(&mut settings);
    settings.validate()?;
    Ok(settings)
}

fn env_str(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn apply_env_overrides(settings: &mut Settings) {
    if let Some(v) = env_str("API_KEY") {
        settings.auth.api_key = Some(v);
    }
    if let Some(v) = env_str("GEMINI_API_KEY") {
        settings.llm.gemini_api_key = Some(v);
    }
    if let Some(v) = env_str("GUVI_CALLBACK_URL") {
        settings.callback.url = Some(v);
    }
    if let Some(v) = env_str("REDIS_URL") {
        settings.persistence.redis_url = Some(v);
    }
    if let Some(v) = env_str("USE_REDIS").and_then(|v| v.parse().ok()) {
        settings.persistence.use_redis = v;
    }
    if let Some(v) = env_str("LOG_LEVEL") {
        settings.observability.log_level = v;
    }
    if let Some(v) = env_str("LOG_JSON").and_then(|v| v.parse().ok()) {
        settings.observability.log_json = v;
    }
    if let Some(v) = env_str("SESSION_TIMEOUT_SECONDS").and_then(|v| v.parse().ok()) {
        settings.persistence.session_timeout_seconds = v;
    }
    if let Some(v) = env_str("MAX_ENGAGEMENT_TURNS").and_then(|v| v.parse().ok()) {
        settings.engagement.max_engagement_turns = v;
    }
    if let Some(v) = env_str("SCAM_THRESHOLD").and_then(|v| v.parse().ok()) {
        settings.engagement.scam_threshold = v;
    }
    if let Some(v) = env_str("MAX_CONCURRENT_SESSIONS").and_then(|v| v.parse().ok()) {
        settings.engagement.max_concurrent_sessions = v;
    }
    if let Some(v) = env_str("RATE_LIMIT_PER_MINUTE").and_then(|v| v.parse().ok()) {
        settings.rate_limit.per_minute = v;
    }
    if let Some(v) = env_str("ENABLE_TAMPER_PROTECTION").and_then(|v| v.parse().ok()) {
        settings.security.enable_tamper_protection = v;
    }
    if let Some(v) = env_str("DEBUG_MODE").and_then(|v| v.parse().ok()) {
        settings.security.debug_mode = v;
    }
    if let Some(v) = env_str("SERVER_HOST") {
        settings.server.host = v;
    }
    if let Some(v) = env_str("SERVER_PORT").and_then(|v| v.parse().ok()) {
        settings.server.port = v;
    }
    if let Some(v) = env_str("METRICS_PORT").and_then(|v| v.parse().ok()) {
        settings.server.metrics_port = v;
    }
    if let Some(v) = env_str("CORS_ORIGINS") {
        settings.server.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.engagement.max_engagement_turns, 15);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn zero_threshold_turns_rejected() {
        let mut settings = Settings::default();
        settings.engagement.max_engagement_turns = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn production_requires_api_key() {
        let mut settings = Settings::default();
        settings.environment = RuntimeEnvironment::Production;
        assert!(settings.validate().is_err());
        settings.auth.api_key = Some("secret".into());
        assert!(settings.validate().is_ok());
    }
}
