use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::config::{Config, PredictionMode};
use crate::generation::generator::ContentGenerator;
use crate::imaging::ImageGenerator;
use crate::llm_client::TextGenerator;
use crate::localization::Localizer;
use crate::market::MarketDataStore;
use crate::prediction::feedback::FeedbackLog;
use crate::prediction::{HeuristicPredictor, LearnedPredictor, PerformancePredictor};

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub market: Arc<MarketDataStore>,
    pub localizer: Arc<Localizer>,
    pub generator: Arc<ContentGenerator>,
    /// Backend selected by PREDICTION_MODE.
    pub predictor: Arc<dyn PerformancePredictor>,
    /// Present whenever a model was trained or loaded, regardless of mode.
    pub learned: Option<Arc<LearnedPredictor>>,
    /// None without STABILITY_API_KEY; image requests then get the template.
    pub images: Option<Arc<dyn ImageGenerator>>,
    pub feedback: Arc<FeedbackLog>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        config: Config,
        market: MarketDataStore,
        llm: Option<Arc<dyn TextGenerator>>,
        images: Option<Arc<dyn ImageGenerator>>,
        learned: Option<LearnedPredictor>,
    ) -> Result<Self, regex::Error> {
        let learned = learned.map(Arc::new);

        let predictor: Arc<dyn PerformancePredictor> = match (config.prediction_mode, &learned) {
            (PredictionMode::Learned, Some(model)) => model.clone(),
            (PredictionMode::Learned, None) => {
                warn!("PREDICTION_MODE=learned but no model is available; using heuristic predictor");
                Arc::new(HeuristicPredictor::new(config.base_rate_table))
            }
            (PredictionMode::Heuristic, _) => Arc::new(HeuristicPredictor::new(config.base_rate_table)),
        };
        info!(backend = ?predictor.backend(), "Performance predictor selected");

        // Outer deadline covers the primary call, its retries and the bilingual pass.
        let deadline = Duration::from_secs(config.request_timeout_secs.saturating_mul(2));

        Ok(AppState {
            market: Arc::new(market),
            localizer: Arc::new(Localizer::new(config.brand_name.clone())?),
            generator: Arc::new(ContentGenerator::new(llm, config.brand_name.clone(), deadline)?),
            predictor,
            learned,
            images,
            feedback: Arc::new(FeedbackLog::new(config.feedback_log_path.clone())),
            started_at: Instant::now(),
            config: Arc::new(config),
        })
    }
}
