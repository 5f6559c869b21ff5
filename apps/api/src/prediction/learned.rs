//! Learned predictor: encoders, scaler and forest fitted together and
//! persisted as one JSON document.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::generation::campaign::CampaignParameters;
use crate::market::MarketSnapshot;
use crate::prediction::encoding::{LabelEncoder, StandardScaler};
use crate::prediction::features::{FeatureInput, CATEGORICAL_FEATURES, NUMERIC_FEATURES};
use crate::prediction::forest::{mean, r2_score, variance, ForestParams, RandomForest};
use crate::prediction::heuristic::BaseRateTable;
use crate::prediction::synthetic::{self, TrainingRow, SYNTHETIC_ROWS, SYNTHETIC_SEED};
use crate::prediction::{
    platform_multipliers, round_to, BusinessMetrics, PerformancePrediction, PerformancePredictor,
    PredictorBackend,
};

const MIN_TRAINING_ROWS: usize = 10;
const TEST_FRACTION: f64 = 0.2;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Model file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Training data error: {0}")]
    TrainingData(#[from] csv::Error),

    #[error("Need at least {min} training rows, got {rows}")]
    InsufficientData { rows: usize, min: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub training_samples: usize,
    pub train_r2: f64,
    pub test_r2: f64,
    /// Feature name → normalised impurity importance (3 d.p.).
    pub feature_importance: BTreeMap<String, f64>,
    pub trained_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignModel {
    encoders: Vec<LabelEncoder>,
    scaler: StandardScaler,
    forest: RandomForest,
    report: TrainingReport,
}

/// A single scored feature row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredFeatures {
    pub score: f64,
    pub confidence: f64,
}

impl CampaignModel {
    pub fn train(rows: &[TrainingRow], params: ForestParams) -> Result<Self, ModelError> {
        if rows.len() < MIN_TRAINING_ROWS {
            return Err(ModelError::InsufficientData {
                rows: rows.len(),
                min: MIN_TRAINING_ROWS,
            });
        }

        // Encoders see every row so the test split never holds unseen classes.
        let encoders: Vec<LabelEncoder> = (0..CATEGORICAL_FEATURES.len())
            .map(|col| LabelEncoder::fit(rows.iter().map(|r| r.features.categorical()[col])))
            .collect();

        let encoded: Vec<Vec<f64>> = rows
            .iter()
            .map(|r| encode_with(&encoders, &r.features))
            .collect();
        let labels: Vec<f64> = rows.iter().map(|r| r.performance_score).collect();

        let mut order: Vec<usize> = (0..rows.len()).collect();
        order.shuffle(&mut StdRng::seed_from_u64(params.seed));
        let n_test = (rows.len() as f64 * TEST_FRACTION).ceil() as usize;
        let (test_idx, train_idx) = order.split_at(n_test);

        let pick = |idx: &[usize]| -> (Vec<Vec<f64>>, Vec<f64>) {
            (
                idx.iter().map(|&i| encoded[i].clone()).collect(),
                idx.iter().map(|&i| labels[i]).collect(),
            )
        };
        let (x_train, y_train) = pick(train_idx);
        let (x_test, y_test) = pick(test_idx);

        let scaler = StandardScaler::fit(&x_train);
        let x_train: Vec<Vec<f64>> = x_train.iter().map(|r| scaler.transform(r)).collect();
        let x_test: Vec<Vec<f64>> = x_test.iter().map(|r| scaler.transform(r)).collect();

        let forest = RandomForest::fit(&x_train, &y_train, params);

        let score = |x: &[Vec<f64>], y: &[f64]| {
            let predicted: Vec<f64> = x.iter().map(|r| forest.predict(r)).collect();
            round_to(r2_score(y, &predicted), 3)
        };
        let train_r2 = score(&x_train, &y_train);
        let test_r2 = score(&x_test, &y_test);

        let feature_importance = feature_names()
            .zip(forest.feature_importance())
            .map(|(name, v)| (name.to_string(), round_to(*v, 3)))
            .collect();

        info!(samples = rows.len(), train_r2, test_r2, "Campaign model trained");

        Ok(CampaignModel {
            encoders,
            scaler,
            forest,
            report: TrainingReport {
                training_samples: rows.len(),
                train_r2,
                test_r2,
                feature_importance,
                trained_at: Utc::now(),
            },
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), ModelError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_vec(self)?)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let bytes = fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub fn report(&self) -> &TrainingReport {
        &self.report
    }

    pub fn n_trees(&self) -> usize {
        self.forest.n_trees()
    }

    /// Mean forest prediction plus a confidence derived from tree disagreement.
    pub fn score(&self, features: &FeatureInput) -> ScoredFeatures {
        let row = self.scaler.transform(&encode_with(&self.encoders, features));
        let per_tree = self.forest.tree_predictions(&row);
        ScoredFeatures {
            score: mean(&per_tree),
            confidence: (1.0 - variance(&per_tree) / 10.0).clamp(0.5, 0.95),
        }
    }

    /// Per-feature `importance × (encoded value / 10)`, 3 d.p. Categorical
    /// values enter as their class index, numeric ones unscaled.
    pub fn feature_contributions(&self, features: &FeatureInput) -> BTreeMap<String, f64> {
        feature_names()
            .zip(self.forest.feature_importance())
            .zip(encode_with(&self.encoders, features))
            .map(|((name, importance), value)| {
                (name.to_string(), round_to(importance * (value / 10.0), 3))
            })
            .collect()
    }
}

fn feature_names() -> impl Iterator<Item = &'static str> {
    CATEGORICAL_FEATURES.iter().chain(NUMERIC_FEATURES.iter()).copied()
}

fn encode_with(encoders: &[LabelEncoder], features: &FeatureInput) -> Vec<f64> {
    encoders
        .iter()
        .zip(features.categorical())
        .map(|(enc, value)| enc.transform(value))
        .chain(features.numeric())
        .collect()
}

/// Where to find a persisted model and optional labelled data.
#[derive(Debug, Clone)]
pub struct ModelSource {
    pub model_path: PathBuf,
    pub training_data_path: Option<PathBuf>,
}

/// Loads the persisted model, or trains a fresh one and persists it.
///
/// Labelled CSV data is preferred; any problem with it falls back to the
/// synthetic rows. A failed save is logged and otherwise ignored.
pub fn load_or_train(source: &ModelSource, params: ForestParams) -> Result<CampaignModel, ModelError> {
    if source.model_path.exists() {
        match CampaignModel::load(&source.model_path) {
            Ok(model) => {
                info!(path = %source.model_path.display(), "Loaded campaign model");
                return Ok(model);
            }
            Err(e) => warn!(error = %e, "Saved model unreadable; retraining"),
        }
    }

    let rows = match source.training_data_path.as_deref().map(synthetic::load_csv) {
        Some(Ok(rows)) if rows.len() >= MIN_TRAINING_ROWS => rows,
        Some(Ok(rows)) => {
            warn!(rows = rows.len(), "Too few labelled rows; using synthetic training data");
            synthetic::synthetic_rows(SYNTHETIC_ROWS, SYNTHETIC_SEED)
        }
        Some(Err(e)) => {
            warn!(error = %e, "Training data unreadable; using synthetic training data");
            synthetic::synthetic_rows(SYNTHETIC_ROWS, SYNTHETIC_SEED)
        }
        None => {
            warn!("No training data configured; using synthetic training data");
            synthetic::synthetic_rows(SYNTHETIC_ROWS, SYNTHETIC_SEED)
        }
    };

    let model = CampaignModel::train(&rows, params)?;
    if let Err(e) = model.save(&source.model_path) {
        warn!(error = %e, path = %source.model_path.display(), "Could not persist campaign model");
    }
    Ok(model)
}

// ─────────────────────────────────────────────
// Predictor
// ─────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct LearnedPrediction {
    pub score: f64,
    pub confidence: f64,
    pub metrics: BusinessMetrics,
    pub feature_contributions: BTreeMap<String, f64>,
}

impl LearnedPrediction {
    pub fn format(&self) -> PerformancePrediction {
        PerformancePrediction {
            confidence: Some(round_to(self.confidence, 2)),
            predicted_performance_score: Some(round_to(self.score, 2)),
            feature_contributions: Some(self.feature_contributions.clone()),
            ..self.metrics.format()
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ModelInfo {
    pub is_trained: bool,
    pub model_type: &'static str,
    pub n_trees: usize,
    #[serde(flatten)]
    pub report: TrainingReport,
}

pub struct LearnedPredictor {
    model: CampaignModel,
}

impl LearnedPredictor {
    pub fn new(model: CampaignModel) -> Self {
        Self { model }
    }

    /// Scores an explicit feature row. Unseen categories encode as the first class.
    pub fn predict_features(&self, features: &FeatureInput) -> LearnedPrediction {
        let scored = self.model.score(features);
        LearnedPrediction {
            score: scored.score,
            confidence: scored.confidence,
            metrics: metrics_for_score(scored.score, &features.platform),
            feature_contributions: self.model.feature_contributions(features),
        }
    }

    pub fn info(&self) -> ModelInfo {
        ModelInfo {
            is_trained: true,
            model_type: "random_forest_regressor",
            n_trees: self.model.n_trees(),
            report: self.model.report().clone(),
        }
    }
}

impl PerformancePredictor for LearnedPredictor {
    fn predict(&self, params: &CampaignParameters, _market: &MarketSnapshot) -> PerformancePrediction {
        self.predict_features(&FeatureInput::from_campaign(params)).format()
    }

    fn backend(&self) -> PredictorBackend {
        PredictorBackend::Learned
    }
}

/// Score → metrics on the optimizer base table, scaled by `0.5 + score/10 × 1.5`.
pub fn metrics_for_score(score: f64, platform: &str) -> BusinessMetrics {
    let base = BaseRateTable::Optimizer.rates();
    let multiplier = 0.5 + score / 10.0 * 1.5;
    let (p_ctr, p_conv, p_roas) = platform_multipliers(platform);
    BusinessMetrics {
        ctr: base.ctr * multiplier * p_ctr,
        conversion_rate: base.conversion_rate * multiplier * p_conv,
        roas: base.roas * multiplier * p_roas,
        cost_per_conversion: base.cost_per_conversion / multiplier,
    }
}
