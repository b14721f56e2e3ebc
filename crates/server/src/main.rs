//! Engagement-honeypot server entry point.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use scam_honeypot_agent::ResponseGenerator;
use scam_honeypot_config::{load_settings, Settings};
use scam_honeypot_core::SessionStore;
use scam_honeypot_llm::{GeminiConfig, GeminiGenerator, RetryingGenerator};
use scam_honeypot_persistence::{
    sweeper, InMemorySessionStore, LockManager, ScyllaConfig, ScyllaSessionStore,
};
use scam_honeypot_pipeline::EngagementPipeline;
use scam_honeypot_transport::CallbackDispatcher;

mod auth;
mod error;
mod hygiene;
mod http;
mod metrics;
mod rate_limit;
mod state;

use http::create_router;
use metrics::init_metrics;
use state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env = std::env::var("RUN_ENV").ok();
    let config = match load_settings(env.as_deref()) {
        Ok(settings) => {
            eprintln!(
                "Loaded configuration from files (env: {})",
                env.as_deref().unwrap_or("default")
            );
            settings
        }
        Err(e) => {
            eprintln!("Warning: failed to load config: {e}. Using defaults.");
            Settings::default()
        }
    };

    init_tracing(&config);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.environment,
        "starting scam-engagement honeypot server"
    );

    let _metrics_handle = init_metrics();
    tracing::info!("prometheus metrics available at /metrics");

    let store: Arc<dyn SessionStore> = if config.persistence.use_redis {
        match build_scylla_store(&config).await {
            Ok(store) => {
                tracing::info!("session store: scylla-backed shared cache");
                store
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to connect to scylla; falling back to in-memory store");
                build_in_memory_store(&config)
            }
        }
    } else {
        tracing::info!("session store: in-memory (USE_REDIS not set)");
        build_in_memory_store(&config)
    };

    let locks = Arc::new(LockManager::new(config.engagement.max_concurrent_sessions));
    sweeper::spawn(store.clone(), locks.clone(), sweeper::DEFAULT_SWEEP_INTERVAL);

    let llm = build_llm(&config);
    if llm.is_some() {
        tracing::info!("LLM path enabled (GEMINI_API_KEY configured)");
    } else {
        tracing::info!("LLM path disabled; response generator will always use the template path");
    }
    let generator = Arc::new(ResponseGenerator::new(llm));

    let dispatcher = Arc::new(CallbackDispatcher::new(config.callback.url.clone()));

    let pipeline = Arc::new(EngagementPipeline::with_max_turns(
        store,
        locks,
        generator,
        dispatcher,
        config.engagement.scam_threshold,
        config.engagement.max_engagement_turns,
    ));

    let port = config.server.port;
    let host = config.server.host.clone();
    let state = AppState::new(config, pipeline);
    let app = create_router(state);

    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    tracing::info!(%addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("server shutdown complete");
    Ok(())
}

fn build_in_memory_store(config: &Settings) -> Arc<dyn SessionStore> {
    Arc::new(InMemorySessionStore::new(Duration::from_secs(
        config.persistence.session_timeout_seconds,
    )))
}

async fn build_scylla_store(
    config: &Settings,
) -> Result<Arc<dyn SessionStore>, scam_honeypot_persistence::PersistenceError> {
    let mut scylla_config = ScyllaConfig::default();
    scylla_config.ttl_seconds = config.persistence.session_timeout_seconds as i64;
    let store = ScyllaSessionStore::connect(scylla_config).await?;
    Ok(Arc::new(store))
}

fn build_llm(config: &Settings) -> Option<Arc<dyn scam_honeypot_core::TextGenerator>> {
    let api_key = config.llm.gemini_api_key.clone()?;
    let gemini = GeminiGenerator::new(GeminiConfig::new(api_key))
        .map_err(|e| tracing::warn!(error = %e, "failed to construct gemini client"))
        .ok()?;
    let retrying = RetryingGenerator::with_defaults(Arc::new(gemini));
    Some(Arc::new(retrying))
}

/// Waits for Ctrl+C or SIGTERM so in-flight turns and callback retries can
/// finish before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install ctrl+c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install sigterm handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received ctrl+c, shutting down"),
        _ = terminate => tracing::info!("received sigterm, shutting down"),
    }
}

fn init_tracing(config: &Settings) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "scam_honeypot={},tower_http=debug",
            config.observability.log_level
        )
        .into()
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);
    let fmt_layer = if config.observability.log_json {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };
    subscriber.with(fmt_layer).init();
}
