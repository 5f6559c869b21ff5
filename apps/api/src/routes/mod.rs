pub mod health;
pub mod status;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers as generation;
use crate::imaging::handlers as imaging;
use crate::localization::handlers as localization;
use crate::market::handlers as market;
use crate::prediction::handlers as prediction;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/system-status", get(status::handle_system_status))
        .route(
            "/api/v1/performance-analytics",
            get(status::handle_performance_analytics),
        )
        // Campaign generation
        .route(
            "/api/v1/generate-campaign",
            post(generation::handle_generate_campaign),
        )
        .route(
            "/api/v1/supported-cities",
            get(generation::handle_supported_cities),
        )
        .route(
            "/api/v1/supported-courses",
            get(generation::handle_supported_courses),
        )
        .route(
            "/api/v1/campaign-templates",
            get(generation::handle_campaign_templates),
        )
        // Market intelligence
        .route(
            "/api/v1/city-insights/:city",
            get(market::handle_city_insights),
        )
        .route(
            "/api/v1/market-intelligence",
            get(market::handle_market_intelligence),
        )
        .route("/api/v1/skill-demand", get(market::handle_skill_demand))
        .route(
            "/api/v1/course-relevance/:course",
            get(market::handle_course_relevance),
        )
        // Localization
        .route(
            "/api/v1/localization/:city/recommendations",
            get(localization::handle_recommendations),
        )
        // Prediction
        .route(
            "/api/v1/predict-performance",
            post(prediction::handle_predict_performance),
        )
        .route(
            "/api/v1/optimize-campaign",
            post(prediction::handle_optimize_campaign),
        )
        .route("/api/v1/model-info", get(prediction::handle_model_info))
        .route(
            "/api/v1/performance-feedback",
            post(prediction::handle_performance_feedback),
        )
        // Imaging
        .route("/api/v1/generate-image", post(imaging::handle_generate_image))
        .with_state(state)
}
