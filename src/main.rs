//! LifeCraft Enneagram HTTP server.

use std::sync::Arc;

use axum::http::HeaderValue;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use lifecraft_enneagram::adapters::http::{app_router, EnneagramAppState};
use lifecraft_enneagram::adapters::narrative::{
    AnthropicNarrativeConfig, AnthropicNarrativeGenerator, FailoverNarrativeGenerator,
};
use lifecraft_enneagram::adapters::storage::InMemorySessionStore;
use lifecraft_enneagram::config::{AppConfig, NarrativeConfig};
use lifecraft_enneagram::domain::enneagram::{AssessmentOrchestrator, ItemBank};
use lifecraft_enneagram::ports::NarrativeGenerator;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        log_format = ?config.server.log_format,
        "Starting LifeCraft Enneagram"
    );

    let bank = Arc::new(ItemBank::load()?);
    info!(
        screener_items = bank.screener_len(),
        instinct_items = bank.instinct_len(),
        "Item bank loaded"
    );

    let generator = narrative_generator(&config)?;
    info!(generator = generator.name(), "Narrative generator ready");

    let state = EnneagramAppState::from_ports(
        Arc::new(InMemorySessionStore::new()),
        AssessmentOrchestrator::new(bank),
        generator,
    );

    let mut app = app_router(state).layer(
        ServiceBuilder::new()
            .layer(cors_layer(&config))
            .layer(TimeoutLayer::new(config.server.request_timeout())),
    );
    if config.features.enable_tracing {
        app = app.layer(TraceLayer::new_for_http());
    }

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.server.json_logs() {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn narrative_generator(config: &AppConfig) -> Result<Arc<dyn NarrativeGenerator>, Box<dyn std::error::Error>> {
    let failover = FailoverNarrativeGenerator::new();
    if !config.use_ai_narrative() {
        if config.features.enable_ai_narrative {
            warn!("No usable Anthropic API key, interpretations use templates");
        }
        return Ok(Arc::new(failover));
    }

    let anthropic = AnthropicNarrativeGenerator::new(anthropic_config(&config.narrative))?;
    Ok(Arc::new(failover.with_primary(Arc::new(anthropic))))
}

fn anthropic_config(narrative: &NarrativeConfig) -> AnthropicNarrativeConfig {
    AnthropicNarrativeConfig::new(narrative.anthropic_api_key.clone().unwrap_or_default())
        .with_model(narrative.model.clone())
        .with_base_url(narrative.base_url.clone())
        .with_timeout(narrative.timeout())
        .with_max_retries(narrative.max_retries)
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}
