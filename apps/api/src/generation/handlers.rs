//! Axum route handlers for campaign generation.
//!
//! `/generate-campaign` orchestrates the pipeline: validate → market lookup →
//! generate each variant → localize → predict. It answers 200 whenever the
//! request itself is valid.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use chrono::Utc;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::campaign::{CampaignPlan, CampaignRequest, Channel};
use crate::generation::content::GeneratedContent;
use crate::generation::generator::ContentSource;
use crate::market::models::SnapshotSource;
use crate::market::MarketContext;
use crate::prediction::{PerformancePrediction, PredictorBackend};
use crate::state::AppState;

/// Reach estimate per open position in the target city.
const REACH_PER_POSITION: u64 = 10;

pub const SUPPORTED_COURSES: [&str; 8] = [
    "AI/ML",
    "Data Science",
    "Digital Marketing",
    "Product Management",
    "Software Development",
    "Cloud Computing",
    "Cybersecurity",
    "Business Analytics",
];

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

/// Where the variants of one response came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceSummary {
    Model,
    Fallback,
    Mixed,
}

impl SourceSummary {
    fn of(sources: &[ContentSource]) -> Self {
        let all = |s: ContentSource| sources.iter().all(|x| *x == s);
        if all(ContentSource::Model) {
            SourceSummary::Model
        } else if all(ContentSource::Fallback) {
            SourceSummary::Fallback
        } else {
            SourceSummary::Mixed
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CampaignMetadata {
    pub course: String,
    pub cities: Vec<String>,
    #[serde(flatten)]
    pub channel: Channel,
    pub tone_scale: u8,
    pub language: String,
    /// True only when localization was requested and the city has a profile.
    pub localized: bool,
    pub data_source: SnapshotSource,
    pub content_source: SourceSummary,
    pub predictor: PredictorBackend,
    pub generated_at: String,
    pub estimated_reach: u64,
}

#[derive(Debug, Serialize)]
pub struct CampaignData {
    pub campaign_id: Uuid,
    pub variants: Vec<GeneratedContent>,
    /// The single variant, when exactly one was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<GeneratedContent>,
    pub market_context: MarketContext,
    pub predictions: PerformancePrediction,
    pub market_insights: String,
    pub metadata: CampaignMetadata,
}

#[derive(Debug, Serialize)]
pub struct CampaignResponse {
    pub status: &'static str,
    pub data: CampaignData,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct CatalogueResponse<T: Serialize> {
    pub status: &'static str,
    pub data: T,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CampaignTemplate {
    pub name: &'static str,
    pub description: &'static str,
    pub fields: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct CampaignTemplates {
    pub email: CampaignTemplate,
    pub social: CampaignTemplate,
    pub sms: CampaignTemplate,
    pub content: CampaignTemplate,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs a validated plan end to end. Infallible: every upstream failure has
/// already been absorbed by the market fallback table or template content.
pub async fn run_campaign(state: &AppState, plan: CampaignPlan) -> CampaignData {
    let city = plan.primary_city().to_string();
    let market = state.market.lookup(&city);
    let market_context = state.market.market_context(&market, Some(&plan.course));
    let localize = plan.localize && state.localizer.supports(&city);

    let mut variants = Vec::with_capacity(plan.variants as usize);
    let mut sources = Vec::with_capacity(plan.variants as usize);
    for variant_number in 1..=u32::from(plan.variants) {
        let params = plan.parameters(variant_number);
        let generated = state
            .generator
            .generate(&params, &market, &market_context)
            .await;
        let content = if localize {
            state.localizer.localize(generated.content, &city)
        } else {
            generated.content
        };
        variants.push(content);
        sources.push(generated.source);
    }

    let predictions = state.predictor.predict(&plan.parameters(1), &market);

    let market_insights = if market_context.campaign_hooks.is_empty() {
        market_context.summary.clone()
    } else {
        format!(
            "{} Key hooks: {}.",
            market_context.summary,
            market_context.campaign_hooks.join("; ")
        )
    };

    let content = match variants.as_slice() {
        [only] => Some(only.clone()),
        _ => None,
    };

    CampaignData {
        campaign_id: Uuid::new_v4(),
        content,
        variants,
        predictions,
        market_insights,
        metadata: CampaignMetadata {
            course: plan.course,
            cities: plan.cities,
            channel: plan.channel,
            tone_scale: plan.tone_scale,
            language: plan.language,
            localized: localize,
            data_source: market.data_source,
            content_source: SourceSummary::of(&sources),
            predictor: state.predictor.backend(),
            generated_at: Utc::now().to_rfc3339(),
            estimated_reach: estimated_reach(market.positions_available),
        },
        market_context,
    }
}

fn estimated_reach(positions: u64) -> u64 {
    positions.saturating_mul(REACH_PER_POSITION)
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/generate-campaign
pub async fn handle_generate_campaign(
    State(state): State<AppState>,
    body: Result<Json<CampaignRequest>, JsonRejection>,
) -> Result<Json<CampaignResponse>, AppError> {
    let Json(request) = body?;
    let plan = CampaignPlan::try_from(request)?;

    info!(
        course = %plan.course,
        city = %plan.primary_city(),
        campaign_type = plan.channel.kind(),
        variants = plan.variants,
        "Generating campaign"
    );

    let data = run_campaign(&state, plan).await;
    let n = data.variants.len();
    let message = format!(
        "Generated {n} content variant{} for {} in {}",
        if n == 1 { "" } else { "s" },
        data.metadata.course,
        data.metadata.cities.join(", ")
    );

    Ok(Json(CampaignResponse {
        status: "success",
        data,
        message,
    }))
}

/// GET /api/v1/supported-cities
pub async fn handle_supported_cities(
    State(state): State<AppState>,
) -> Json<CatalogueResponse<Vec<String>>> {
    Json(CatalogueResponse {
        status: "success",
        data: state.config.supported_cities.clone(),
        message: "Supported cities retrieved successfully",
    })
}

/// GET /api/v1/supported-courses
pub async fn handle_supported_courses() -> Json<CatalogueResponse<[&'static str; 8]>> {
    Json(CatalogueResponse {
        status: "success",
        data: SUPPORTED_COURSES,
        message: "Supported courses retrieved successfully",
    })
}

/// GET /api/v1/campaign-templates
pub async fn handle_campaign_templates() -> Json<CatalogueResponse<CampaignTemplates>> {
    Json(CatalogueResponse {
        status: "success",
        data: CampaignTemplates {
            email: CampaignTemplate {
                name: "Email Campaign",
                description: "Personalized email marketing campaigns",
                fields: &["subject", "body", "cta"],
            },
            social: CampaignTemplate {
                name: "Social Media Campaign",
                description: "Social media posts and ads",
                fields: &["post_text", "hashtags", "image_prompt"],
            },
            sms: CampaignTemplate {
                name: "SMS Campaign",
                description: "Short promotional and reminder messages",
                fields: &["message", "cta"],
            },
            content: CampaignTemplate {
                name: "Display Advertising",
                description: "Banner and display ad campaigns",
                fields: &["headline", "description", "image_prompt"],
            },
        },
        message: "Campaign templates retrieved successfully",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_summary() {
        use ContentSource::*;
        assert_eq!(SourceSummary::of(&[Model, Model]), SourceSummary::Model);
        assert_eq!(SourceSummary::of(&[Fallback]), SourceSummary::Fallback);
        assert_eq!(SourceSummary::of(&[Model, Fallback]), SourceSummary::Mixed);
    }

    #[test]
    fn test_estimated_reach_saturates() {
        assert_eq!(estimated_reach(2500), 25_000);
        assert_eq!(estimated_reach(u64::MAX / 2), u64::MAX);
    }
}
