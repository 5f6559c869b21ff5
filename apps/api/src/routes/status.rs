use std::collections::BTreeMap;

use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;

use crate::generation::handlers::SUPPORTED_COURSES;
use crate::market::models::{CityPerformance, CourseRelevance, DataSource, DataStatus};
use crate::prediction::learned::ModelInfo;
use crate::routes::health::ServiceFlags;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// System status
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SystemHealth {
    /// Text generation configured and the hiring table loaded from file.
    Optimal,
    /// Serving, but on template content or the synthetic table.
    Degraded,
}

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub system_health: SystemHealth,
    pub version: &'static str,
    pub uptime_secs: u64,
    pub services: ServiceFlags,
    pub supported_cities: usize,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct SystemStatusResponse {
    pub status: &'static str,
    pub data: SystemStatus,
    pub message: &'static str,
}

/// GET /api/v1/system-status
pub async fn handle_system_status(State(state): State<AppState>) -> Json<SystemStatusResponse> {
    let services = ServiceFlags::of(&state);
    let system_health =
        if services.text_generation && services.market_data.source == DataSource::File {
            SystemHealth::Optimal
        } else {
            SystemHealth::Degraded
        };

    Json(SystemStatusResponse {
        status: "success",
        data: SystemStatus {
            system_health,
            version: env!("CARGO_PKG_VERSION"),
            uptime_secs: state.started_at.elapsed().as_secs(),
            services,
            supported_cities: state.config.supported_cities.len(),
            timestamp: Utc::now().to_rfc3339(),
        },
        message: "System status retrieved successfully",
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Performance analytics
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, PartialEq, Serialize)]
pub struct CityRanking {
    /// Most open positions.
    pub best_performing: Option<String>,
    /// Most companies hiring.
    pub most_competitive: Option<String>,
    /// Highest positions per company.
    pub highest_density: Option<String>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct CourseRanking {
    pub top_performer: String,
    pub market_score: f64,
}

#[derive(Debug, Serialize)]
pub struct PerformanceAnalytics {
    pub total_positions: u64,
    pub total_companies: usize,
    pub city_performance: CityRanking,
    pub course_performance: CourseRanking,
    pub industry_demand: BTreeMap<String, u64>,
    /// Present when a learned model is loaded.
    pub model: Option<ModelInfo>,
    pub data_source: DataStatus,
    pub generated_at: String,
}

#[derive(Debug, Serialize)]
pub struct PerformanceAnalyticsResponse {
    pub status: &'static str,
    pub data: PerformanceAnalytics,
    pub message: &'static str,
}

/// GET /api/v1/performance-analytics
/// Rankings derived from the loaded hiring table and the learned model report.
pub async fn handle_performance_analytics(
    State(state): State<AppState>,
) -> Json<PerformanceAnalyticsResponse> {
    let trends = state.market.hiring_trends();
    let courses: Vec<CourseRelevance> = SUPPORTED_COURSES
        .iter()
        .map(|course| state.market.course_relevance(course))
        .collect();

    Json(PerformanceAnalyticsResponse {
        status: "success",
        data: PerformanceAnalytics {
            total_positions: trends.total_positions,
            total_companies: trends.total_companies,
            city_performance: rank_cities(&trends.city_performance),
            course_performance: rank_courses(&courses),
            industry_demand: trends.industry_demand,
            model: state.learned.as_ref().map(|l| l.info()),
            data_source: state.market.status(),
            generated_at: Utc::now().to_rfc3339(),
        },
        message: "Performance analytics retrieved successfully",
    })
}

/// Ties go to the alphabetically first city.
fn rank_cities(cities: &BTreeMap<String, CityPerformance>) -> CityRanking {
    fn leader<K: PartialOrd>(
        cities: &BTreeMap<String, CityPerformance>,
        key: impl Fn(&CityPerformance) -> K,
    ) -> Option<String> {
        cities
            .iter()
            .fold(None::<(&String, K)>, |best, (city, perf)| {
                let k = key(perf);
                let better = match &best {
                    Some((_, b)) => k > *b,
                    None => true,
                };
                if better {
                    Some((city, k))
                } else {
                    best
                }
            })
            .map(|(city, _)| city.clone())
    }

    CityRanking {
        best_performing: leader(cities, |p| p.positions_available),
        most_competitive: leader(cities, |p| p.companies_hiring),
        highest_density: leader(cities, |p| p.avg_positions_per_company),
    }
}

/// Highest market score; ties keep catalogue order.
fn rank_courses(courses: &[CourseRelevance]) -> CourseRanking {
    let best = courses
        .iter()
        .reduce(|best, c| if c.market_score > best.market_score { c } else { best });
    match best {
        Some(c) => CourseRanking {
            top_performer: c.course.clone(),
            market_score: c.market_score,
        },
        None => CourseRanking {
            top_performer: String::new(),
            market_score: 0.0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::models::{GrowthPotential, RankedCounts};

    fn perf(positions: u64, companies: usize) -> CityPerformance {
        CityPerformance {
            positions_available: positions,
            companies_hiring: companies,
            avg_positions_per_company: positions as f64 / companies as f64,
        }
    }

    fn course(name: &str, score: f64) -> CourseRelevance {
        CourseRelevance {
            course: name.to_string(),
            relevant_positions: 0,
            demand_skills: RankedCounts(Vec::new()),
            market_score: score,
            growth_potential: GrowthPotential::Low,
        }
    }

    #[test]
    fn test_rank_cities() {
        let cities = BTreeMap::from([
            ("Bangalore".to_string(), perf(300, 10)),
            ("Mumbai".to_string(), perf(200, 20)),
            ("Pune".to_string(), perf(300, 5)),
        ]);
        let ranking = rank_cities(&cities);
        assert_eq!(ranking.best_performing.as_deref(), Some("Bangalore"));
        assert_eq!(ranking.most_competitive.as_deref(), Some("Mumbai"));
        assert_eq!(ranking.highest_density.as_deref(), Some("Pune"));

        assert_eq!(rank_cities(&BTreeMap::new()), CityRanking::default());
    }

    #[test]
    fn test_rank_courses_keeps_first_on_tie() {
        let ranking = rank_courses(&[course("AI/ML", 2.0), course("Data Science", 2.0), course("MBA", 1.0)]);
        assert_eq!(ranking.top_performer, "AI/ML");
        assert_eq!(rank_courses(&[]).top_performer, "");
    }
}
