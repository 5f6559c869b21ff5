use axum::{extract::rejection::JsonRejection, extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::campaign::{CampaignPlan, CampaignRequest};
use crate::prediction::feedback::FeedbackEntry;
use crate::prediction::features::{FeatureInput, FeatureOverrides};
use crate::prediction::learned::ModelInfo;
use crate::prediction::optimizer::{optimize, OptimizationReport};
use crate::prediction::{round_to, PerformancePrediction, PredictorBackend};
use crate::state::AppState;

// ─────────────────────────────────────────────
// POST /api/v1/predict-performance
// ─────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct PredictionData {
    pub course: String,
    pub city: String,
    pub campaign_type: &'static str,
    pub backend: PredictorBackend,
    pub prediction: PerformancePrediction,
}

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub status: &'static str,
    pub data: PredictionData,
}

/// POST /api/v1/predict-performance
///
/// Accepts the same body as campaign generation and predicts the first variant.
pub async fn handle_predict_performance(
    State(state): State<AppState>,
    body: Result<Json<CampaignRequest>, JsonRejection>,
) -> Result<Json<PredictionResponse>, AppError> {
    let Json(request) = body?;
    let plan = CampaignPlan::try_from(request)?;
    let params = plan.parameters(1);
    let market = state.market.lookup(&params.city);
    let prediction = state.predictor.predict(&params, &market);

    Ok(Json(PredictionResponse {
        status: "success",
        data: PredictionData {
            campaign_type: params.channel.kind(),
            backend: state.predictor.backend(),
            course: params.course,
            city: params.city,
            prediction,
        },
    }))
}

// ─────────────────────────────────────────────
// POST /api/v1/optimize-campaign
// ─────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct OptimizeResponse {
    pub status: &'static str,
    pub data: OptimizationReport,
}

/// POST /api/v1/optimize-campaign
///
/// Body: any subset of the model features. Requires the learned model.
pub async fn handle_optimize_campaign(
    State(state): State<AppState>,
    body: Result<Json<FeatureOverrides>, JsonRejection>,
) -> Result<Json<OptimizeResponse>, AppError> {
    let Json(overrides) = body?;
    let learned = state
        .learned
        .as_ref()
        .ok_or_else(|| AppError::Unavailable("Campaign model is not trained".to_string()))?;

    let features = FeatureInput::default().merge(&overrides);
    Ok(Json(OptimizeResponse {
        status: "success",
        data: optimize(learned, &features),
    }))
}

// ─────────────────────────────────────────────
// GET /api/v1/model-info
// ─────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ModelInfoData {
    pub active_backend: PredictorBackend,
    pub learned_model: Option<ModelInfo>,
}

#[derive(Debug, Serialize)]
pub struct ModelInfoResponse {
    pub status: &'static str,
    pub data: ModelInfoData,
}

/// GET /api/v1/model-info
pub async fn handle_model_info(State(state): State<AppState>) -> Json<ModelInfoResponse> {
    Json(ModelInfoResponse {
        status: "success",
        data: ModelInfoData {
            active_backend: state.predictor.backend(),
            learned_model: state.learned.as_ref().map(|l| l.info()),
        },
    })
}

// ─────────────────────────────────────────────
// POST /api/v1/performance-feedback
// ─────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    #[serde(default)]
    pub campaign_params: FeatureOverrides,
    pub actual_performance: f64,
}

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub status: &'static str,
    pub data: FeedbackEntry,
    pub message: &'static str,
}

/// POST /api/v1/performance-feedback
///
/// Appends the observed score, alongside the model's prediction when one is
/// available, to the feedback log.
pub async fn handle_performance_feedback(
    State(state): State<AppState>,
    body: Result<Json<FeedbackRequest>, JsonRejection>,
) -> Result<Json<FeedbackResponse>, AppError> {
    let Json(request) = body?;
    if !request.actual_performance.is_finite() {
        return Err(AppError::Validation(
            "actual_performance must be a finite number".to_string(),
        ));
    }

    let predicted_performance = state.learned.as_ref().map(|l| {
        let features = FeatureInput::default().merge(&request.campaign_params);
        round_to(l.predict_features(&features).score, 2)
    });

    let entry = FeedbackEntry {
        timestamp: Utc::now(),
        campaign_params: request.campaign_params,
        actual_performance: request.actual_performance,
        predicted_performance,
    };
    state
        .feedback
        .append(&entry)
        .await
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok(Json(FeedbackResponse {
        status: "success",
        data: entry,
        message: "Performance feedback recorded",
    }))
}
