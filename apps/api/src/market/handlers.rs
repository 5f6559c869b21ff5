//! Direct lookup endpoints over the Market Data Store.
//!
//! Unlike the campaign pipeline these may answer 404 for a city with no rows.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::market::models::{CourseRelevance, DataStatus, HiringTrends, MarketSnapshot, RankedCounts};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CityInsightsResponse {
    pub status: &'static str,
    pub data: MarketSnapshot,
}

#[derive(Debug, Serialize)]
pub struct MarketIntelligence {
    pub cities: BTreeMap<String, MarketSnapshot>,
    pub total_positions: u64,
    pub total_companies: usize,
    pub hiring_trends: HiringTrends,
    pub data_status: DataStatus,
}

#[derive(Debug, Serialize)]
pub struct MarketIntelligenceResponse {
    pub status: &'static str,
    pub data: MarketIntelligence,
}

#[derive(Debug, Serialize)]
pub struct SkillDemandResponse {
    pub status: &'static str,
    pub data: RankedCounts,
}

#[derive(Debug, Serialize)]
pub struct CourseRelevanceResponse {
    pub status: &'static str,
    pub data: CourseRelevance,
}

/// GET /api/v1/city-insights/:city
pub async fn handle_city_insights(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Json<CityInsightsResponse>, AppError> {
    let snapshot = state
        .market
        .find(&city)
        .ok_or_else(|| AppError::NotFound(format!("No market data for city '{city}'")))?;

    Ok(Json(CityInsightsResponse {
        status: "success",
        data: snapshot,
    }))
}

/// GET /api/v1/market-intelligence
///
/// Snapshots for every supported city (fallback values where the table has no rows)
/// plus dataset-wide hiring trends.
pub async fn handle_market_intelligence(
    State(state): State<AppState>,
) -> Json<MarketIntelligenceResponse> {
    let cities: BTreeMap<String, MarketSnapshot> = state
        .config
        .supported_cities
        .iter()
        .map(|city| (city.clone(), state.market.lookup(city)))
        .collect();

    let total_positions = cities.values().map(|s| s.positions_available).sum();
    let total_companies = cities.values().map(|s| s.companies_hiring).sum();

    Json(MarketIntelligenceResponse {
        status: "success",
        data: MarketIntelligence {
            cities,
            total_positions,
            total_companies,
            hiring_trends: state.market.hiring_trends(),
            data_status: state.market.status(),
        },
    })
}

/// GET /api/v1/skill-demand
pub async fn handle_skill_demand(State(state): State<AppState>) -> Json<SkillDemandResponse> {
    Json(SkillDemandResponse {
        status: "success",
        data: state.market.skill_demand(),
    })
}

/// GET /api/v1/course-relevance/:course
pub async fn handle_course_relevance(
    State(state): State<AppState>,
    Path(course): Path<String>,
) -> Json<CourseRelevanceResponse> {
    Json(CourseRelevanceResponse {
        status: "success",
        data: state.market.course_relevance(&course),
    })
}
