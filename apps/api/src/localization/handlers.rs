use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::localization::engine::LocalizationRecommendations;
use crate::state::AppState;

const DEFAULT_COURSE: &str = "AI/ML";

#[derive(Debug, Deserialize)]
pub struct RecommendationsQuery {
    pub course: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub status: &'static str,
    pub data: LocalizationRecommendations,
}

/// GET /api/v1/localization/:city/recommendations?course=
pub async fn handle_recommendations(
    State(state): State<AppState>,
    Path(city): Path<String>,
    Query(query): Query<RecommendationsQuery>,
) -> Result<Json<RecommendationsResponse>, AppError> {
    let course = query.course.as_deref().unwrap_or(DEFAULT_COURSE);
    let data = state
        .localizer
        .recommendations(&city, course)
        .ok_or_else(|| AppError::NotFound(format!("No localization data available for {city}")))?;

    Ok(Json(RecommendationsResponse {
        status: "success",
        data,
    }))
}
