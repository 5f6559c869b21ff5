mod config;
mod errors;
mod generation;
mod imaging;
mod llm_client;
mod localization;
mod market;
mod prediction;
mod routes;
mod state;

use anyhow::{Context, Result};
use axum::http::{HeaderValue, Method};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::imaging::{ImageClient, ImageGenerator};
use crate::llm_client::{LlmClient, TextGenerator};
use crate::market::MarketDataStore;
use crate::prediction::forest::ForestParams;
use crate::prediction::learned::{load_or_train, CampaignModel, ModelSource};
use crate::prediction::LearnedPredictor;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on unparseable values, never on missing keys)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Campaign API v{}", env!("CARGO_PKG_VERSION"));

    // Market data (synthetic table if the file is missing or unreadable)
    let market = MarketDataStore::load(&config.hiring_data_path);
    let status = market.status();
    info!(source = ?status.source, rows = status.rows, "Market data ready");

    let timeout = Duration::from_secs(config.request_timeout_secs);

    // Text generation
    let llm: Option<Arc<dyn TextGenerator>> = match &config.gemini_api_key {
        Some(key) => {
            let client = LlmClient::new(key.clone(), timeout)?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(Arc::new(client))
        }
        None => {
            warn!("GEMINI_API_KEY not set; campaigns will use template content");
            None
        }
    };

    // Image generation
    let images: Option<Arc<dyn ImageGenerator>> = match &config.stability_api_key {
        Some(key) => {
            let client = ImageClient::new(key.clone(), timeout)?;
            info!("Image client initialized (engine: {})", imaging::client::ENGINE);
            Some(Arc::new(client))
        }
        None => {
            warn!("STABILITY_API_KEY not set; image requests will return templates");
            None
        }
    };

    info!(
        text_generation = config.text_generation_enabled(),
        image_generation = config.image_generation_enabled(),
        "External services configured"
    );

    let learned = init_learned_model(&config).await;

    let state = AppState::new(config.clone(), market, llm, images, learned)?;

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_origins)?);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Loads or trains the learned model on a blocking thread. Any failure leaves
/// the service on the heuristic predictor.
async fn init_learned_model(config: &Config) -> Option<LearnedPredictor> {
    let source = ModelSource {
        model_path: config.model_path.clone(),
        training_data_path: config.training_data_path.clone(),
    };
    let train = config.train_model_on_startup;

    let result = tokio::task::spawn_blocking(move || {
        if train {
            load_or_train(&source, ForestParams::default()).map(Some)
        } else if source.model_path.exists() {
            CampaignModel::load(&source.model_path).map(Some)
        } else {
            Ok(None)
        }
    })
    .await;

    match result {
        Ok(Ok(Some(model))) => {
            let report = model.report();
            info!(
                samples = report.training_samples,
                test_r2 = report.test_r2,
                "Learned model available"
            );
            Some(LearnedPredictor::new(model))
        }
        Ok(Ok(None)) => {
            info!("Model training disabled and no saved model found");
            None
        }
        Ok(Err(e)) => {
            warn!(error = %e, "Learned model unavailable");
            None
        }
        Err(e) => {
            warn!(error = %e, "Model training task failed");
            None
        }
    }
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    if origins.iter().any(|o| o == "*") {
        return Ok(CorsLayer::permissive());
    }
    let origins = origins
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>()
                .with_context(|| format!("invalid CORS origin '{o}'"))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any))
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutdown signal received");
}
