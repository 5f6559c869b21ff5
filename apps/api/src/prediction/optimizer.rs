use std::collections::BTreeMap;

use serde::Serialize;

use crate::prediction::features::FeatureInput;
use crate::prediction::round_to;
use crate::prediction::LearnedPredictor;

const THEME_CANDIDATES: [&str; 4] = ["Job Security", "Career Growth", "AI/ML Skills", "Salary Boost"];
const PLATFORM_CANDIDATES: [&str; 4] = ["Instagram", "LinkedIn", "YouTube", "Facebook"];
const MAX_SUGGESTIONS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SweptParameter {
    ContentTheme,
    Platform,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Optimization {
    pub parameter: SweptParameter,
    pub value: &'static str,
    pub predicted_score: f64,
    pub improvement: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationReport {
    pub base_score: f64,
    pub base_contributions: BTreeMap<String, f64>,
    pub optimizations: Vec<Optimization>,
    pub max_improvement: f64,
}

/// Sweeps content theme, then platform, over fixed candidates and keeps
/// the five largest strictly positive improvements over the base row.
pub fn optimize(predictor: &LearnedPredictor, base: &FeatureInput) -> OptimizationReport {
    let base_prediction = predictor.predict_features(base);
    let base_score = round_to(base_prediction.score, 2);

    let sweep = |parameter: SweptParameter, value: &'static str| {
        let mut candidate = base.clone();
        match parameter {
            SweptParameter::ContentTheme => candidate.content_theme = value.to_string(),
            SweptParameter::Platform => candidate.platform = value.to_string(),
        }
        let predicted_score = round_to(predictor.predict_features(&candidate).score, 2);
        Optimization {
            parameter,
            value,
            predicted_score,
            improvement: round_to(predicted_score - base_score, 2),
        }
    };

    let mut optimizations: Vec<Optimization> = THEME_CANDIDATES
        .iter()
        .map(|&v| sweep(SweptParameter::ContentTheme, v))
        .chain(PLATFORM_CANDIDATES.iter().map(|&v| sweep(SweptParameter::Platform, v)))
        .filter(|o| o.improvement > 0.0)
        .collect();

    // stable: ties keep sweep order
    optimizations.sort_by(|a, b| b.improvement.total_cmp(&a.improvement));
    optimizations.truncate(MAX_SUGGESTIONS);

    let max_improvement = optimizations.first().map_or(0.0, |o| o.improvement);

    OptimizationReport {
        base_score,
        base_contributions: base_prediction.feature_contributions,
        optimizations,
        max_improvement,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::forest::ForestParams;
    use crate::prediction::learned::CampaignModel;
    use crate::prediction::synthetic::{synthetic_rows, SYNTHETIC_SEED};

    fn predictor() -> LearnedPredictor {
        let params = ForestParams {
            n_trees: 15,
            ..ForestParams::default()
        };
        LearnedPredictor::new(CampaignModel::train(&synthetic_rows(300, SYNTHETIC_SEED), params).unwrap())
    }

    #[test]
    fn test_suggestions_are_positive_and_sorted() {
        let predictor = predictor();
        let weak = FeatureInput {
            content_theme: "Skill Development".into(),
            platform: "Twitter".into(),
            ..FeatureInput::default()
        };
        let report = optimize(&predictor, &weak);

        assert_eq!(report.base_contributions, predictor.predict_features(&weak).feature_contributions);
        assert_eq!(report.base_contributions.len(), 12);
        assert!(report.optimizations.len() <= MAX_SUGGESTIONS);
        assert!(report.optimizations.iter().all(|o| o.improvement > 0.0));
        assert!(report
            .optimizations
            .windows(2)
            .all(|w| w[0].improvement >= w[1].improvement));
        if let Some(top) = report.optimizations.first() {
            assert_eq!(report.max_improvement, top.improvement);
        } else {
            assert_eq!(report.max_improvement, 0.0);
        }
    }

    #[test]
    fn test_deterministic_for_same_input() {
        let predictor = predictor();
        let base = FeatureInput::default();
        assert_eq!(optimize(&predictor, &base), optimize(&predictor, &base));
    }

    #[test]
    fn test_serialized_parameter_names() {
        let value = serde_json::to_value(SweptParameter::ContentTheme).unwrap();
        assert_eq!(value, "content_theme");
    }
}
