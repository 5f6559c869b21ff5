use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;

use crate::market::models::DataStatus;
use crate::prediction::PredictorBackend;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ServiceFlags {
    pub text_generation: bool,
    pub image_generation: bool,
    pub market_data: DataStatus,
    pub learned_model: bool,
    pub predictor: PredictorBackend,
}

impl ServiceFlags {
    pub fn of(state: &AppState) -> Self {
        ServiceFlags {
            text_generation: state.generator.model_enabled(),
            image_generation: state.images.is_some(),
            market_data: state.market.status(),
            learned_model: state.learned.is_some(),
            predictor: state.predictor.backend(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub service: &'static str,
    pub timestamp: String,
    pub services: ServiceFlags,
}

/// GET /health
/// Reports which optional services are configured. Never fails: a missing
/// credential or dataset only flips a flag.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        service: "campaign-api",
        timestamp: Utc::now().to_rfc3339(),
        services: ServiceFlags::of(&state),
    })
}
