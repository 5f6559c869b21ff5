//! Performance Predictor.
//!
//! Two interchangeable backends behind `PerformancePredictor`: a fixed
//! multiplier heuristic that is always available, and a learned regression
//! forest used when a model has been trained or loaded.

pub mod encoding;
pub mod features;
pub mod feedback;
pub mod forest;
pub mod handlers;
pub mod heuristic;
pub mod learned;
pub mod optimizer;
pub mod synthetic;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::generation::campaign::CampaignParameters;
use crate::market::MarketSnapshot;

pub use heuristic::HeuristicPredictor;
pub use learned::LearnedPredictor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictorBackend {
    Heuristic,
    Learned,
}

/// Maps campaign parameters plus market data to business metrics.
/// Implementations are stateless per call and safe to share across requests.
pub trait PerformancePredictor: Send + Sync {
    fn predict(&self, params: &CampaignParameters, market: &MarketSnapshot) -> PerformancePrediction;

    fn backend(&self) -> PredictorBackend;
}

/// Unformatted metric estimate. Rates are fractions (0.12 = 12%).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BusinessMetrics {
    pub ctr: f64,
    pub conversion_rate: f64,
    pub roas: f64,
    pub cost_per_conversion: f64,
}

impl BusinessMetrics {
    pub fn format(&self) -> PerformancePrediction {
        PerformancePrediction {
            ctr: format!("{:.1}%", self.ctr * 100.0),
            conversion_rate: format!("{:.1}%", self.conversion_rate * 100.0),
            roas: format!("{:.1}x", self.roas),
            cost_per_conversion: format!("₹{}", self.cost_per_conversion.max(0.0) as u64),
            confidence: None,
            predicted_performance_score: None,
            feature_contributions: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformancePrediction {
    pub ctr: String,
    pub conversion_rate: String,
    pub roas: String,
    pub cost_per_conversion: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicted_performance_score: Option<f64>,
    /// Learned backend only: feature name → contribution to the score.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_contributions: Option<BTreeMap<String, f64>>,
}

pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Per-platform (ctr, conversion, roas) multipliers.
const PLATFORM_MULTIPLIERS: &[(&str, f64, f64, f64)] = &[
    ("Instagram", 1.8, 1.7, 1.5),
    ("LinkedIn", 1.3, 1.2, 1.3),
    ("YouTube", 1.6, 1.4, 1.4),
    ("Facebook", 1.1, 1.0, 1.1),
    ("Google Ads", 1.5, 1.3, 1.3),
    ("Twitter", 0.7, 0.6, 0.8),
];

/// Case-insensitive platform lookup; unknown platforms get 1.0 across the board.
pub fn platform_multipliers(platform: &str) -> (f64, f64, f64) {
    PLATFORM_MULTIPLIERS
        .iter()
        .find(|(name, ..)| name.eq_ignore_ascii_case(platform.trim()))
        .map(|(_, ctr, conv, roas)| (*ctr, *conv, *roas))
        .unwrap_or((1.0, 1.0, 1.0))
}

/// Canonical spelling of a known platform, e.g. "linkedin" → "LinkedIn".
pub fn canonical_platform(platform: &str) -> Option<&'static str> {
    PLATFORM_MULTIPLIERS
        .iter()
        .find(|(name, ..)| name.eq_ignore_ascii_case(platform.trim()))
        .map(|(name, ..)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_metric_formatting() {
        let p = BusinessMetrics {
            ctr: 0.2016,
            conversion_rate: 0.05,
            roas: 3.249,
            cost_per_conversion: 287.9,
        }
        .format();
        assert_eq!(p.ctr, "20.2%");
        assert_eq!(p.conversion_rate, "5.0%");
        assert_eq!(p.roas, "3.2x");
        assert_eq!(p.cost_per_conversion, "₹287");
        assert!(Regex::new(r"^\d+\.\d%$").unwrap().is_match(&p.ctr));
    }

    #[test]
    fn test_platform_lookup_is_case_insensitive() {
        assert_eq!(platform_multipliers("instagram"), (1.8, 1.7, 1.5));
        assert_eq!(platform_multipliers("GOOGLE ADS"), (1.5, 1.3, 1.3));
        assert_eq!(platform_multipliers("Myspace"), (1.0, 1.0, 1.0));
        assert_eq!(canonical_platform("youtube"), Some("YouTube"));
        assert_eq!(canonical_platform("sms"), None);
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let p = BusinessMetrics {
            ctr: 0.1,
            conversion_rate: 0.1,
            roas: 1.0,
            cost_per_conversion: 1.0,
        }
        .format();
        let value = serde_json::to_value(&p).unwrap();
        assert!(value.get("confidence").is_none());
    }
}
