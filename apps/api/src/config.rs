use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use crate::prediction::heuristic::BaseRateTable;

const DEFAULT_CITIES: &str = "Bangalore,Mumbai,Delhi NCR,Hyderabad,Chennai,Pune,Ahmedabad,Kolkata";

/// Which predictor backs `/predict-performance` and the campaign response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionMode {
    Heuristic,
    Learned,
}

/// Application configuration loaded from environment variables.
/// Every key is optional; missing API keys switch the service into fallback mode.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub stability_api_key: Option<String>,
    pub hiring_data_path: PathBuf,
    pub training_data_path: Option<PathBuf>,
    pub model_path: PathBuf,
    pub feedback_log_path: PathBuf,
    pub supported_cities: Vec<String>,
    pub cors_origins: Vec<String>,
    pub brand_name: String,
    pub prediction_mode: PredictionMode,
    pub base_rate_table: BaseRateTable,
    pub train_model_on_startup: bool,
    pub request_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let prediction_mode = match get("PREDICTION_MODE").as_deref() {
            None | Some("heuristic") => PredictionMode::Heuristic,
            Some("learned") => PredictionMode::Learned,
            Some(other) => {
                return Err(anyhow!(
                    "PREDICTION_MODE must be 'heuristic' or 'learned', got '{other}'"
                ))
            }
        };

        let base_rate_table = match get("BASE_RATE_TABLE").as_deref() {
            None | Some("campaign") => BaseRateTable::Campaign,
            Some("optimizer") => BaseRateTable::Optimizer,
            Some(other) => {
                return Err(anyhow!(
                    "BASE_RATE_TABLE must be 'campaign' or 'optimizer', got '{other}'"
                ))
            }
        };

        let train_model_on_startup = match get("TRAIN_MODEL_ON_STARTUP") {
            None => true,
            Some(v) => v
                .parse::<bool>()
                .context("TRAIN_MODEL_ON_STARTUP must be 'true' or 'false'")?,
        };

        Ok(Config {
            gemini_api_key: get("GEMINI_API_KEY"),
            stability_api_key: get("STABILITY_API_KEY"),
            hiring_data_path: get("HIRING_DATA_PATH")
                .unwrap_or_else(|| "data/raw/company_hiring_data.csv".to_string())
                .into(),
            training_data_path: get("TRAINING_DATA_PATH").map(PathBuf::from),
            model_path: get("MODEL_PATH")
                .unwrap_or_else(|| "data/models/campaign_model.json".to_string())
                .into(),
            feedback_log_path: get("FEEDBACK_LOG_PATH")
                .unwrap_or_else(|| "data/feedback/performance_feedback.jsonl".to_string())
                .into(),
            supported_cities: split_list(
                &get("SUPPORTED_CITIES").unwrap_or_else(|| DEFAULT_CITIES.to_string()),
            ),
            cors_origins: split_list(&get("CORS_ORIGINS").unwrap_or_else(|| "*".to_string())),
            brand_name: get("BRAND_NAME").unwrap_or_else(|| "upGrad".to_string()),
            prediction_mode,
            base_rate_table,
            train_model_on_startup,
            request_timeout_secs: get("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|| "30".to_string())
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .context("REQUEST_TIMEOUT_SECS must be a positive whole number of seconds")?,
            port: get("PORT")
                .unwrap_or_else(|| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    pub fn text_generation_enabled(&self) -> bool {
        self.gemini_api_key.is_some()
    }

    pub fn image_generation_enabled(&self) -> bool {
        self.stability_api_key.is_some()
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn test_defaults_without_any_keys() {
        let config = config_from(&[]).unwrap();
        assert!(config.gemini_api_key.is_none());
        assert!(!config.text_generation_enabled());
        assert!(!config.image_generation_enabled());
        assert_eq!(config.port, 8000);
        assert_eq!(config.supported_cities.len(), 8);
        assert_eq!(config.supported_cities[2], "Delhi NCR");
        assert_eq!(config.cors_origins, vec!["*"]);
        assert_eq!(config.prediction_mode, PredictionMode::Heuristic);
        assert_eq!(config.base_rate_table, BaseRateTable::Campaign);
        assert!(config.train_model_on_startup);
    }

    #[test]
    fn test_blank_api_key_counts_as_unset() {
        let config = config_from(&[("GEMINI_API_KEY", "   ")]).unwrap();
        assert!(config.gemini_api_key.is_none());
    }

    #[test]
    fn test_city_list_is_trimmed() {
        let config = config_from(&[("SUPPORTED_CITIES", " Pune , Kolkata,, ")]).unwrap();
        assert_eq!(config.supported_cities, vec!["Pune", "Kolkata"]);
    }

    #[test]
    fn test_learned_mode_and_optimizer_table() {
        let config = config_from(&[
            ("PREDICTION_MODE", "learned"),
            ("BASE_RATE_TABLE", "optimizer"),
            ("TRAIN_MODEL_ON_STARTUP", "false"),
        ])
        .unwrap();
        assert_eq!(config.prediction_mode, PredictionMode::Learned);
        assert_eq!(config.base_rate_table, BaseRateTable::Optimizer);
        assert!(!config.train_model_on_startup);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(config_from(&[("PORT", "abc")]).is_err());
        assert!(config_from(&[("PREDICTION_MODE", "magic")]).is_err());
        assert!(config_from(&[("BASE_RATE_TABLE", "both")]).is_err());
        assert!(config_from(&[("REQUEST_TIMEOUT_SECS", "0")]).is_err());
        assert!(config_from(&[("REQUEST_TIMEOUT_SECS", "-5")]).is_err());
        assert_eq!(config_from(&[("REQUEST_TIMEOUT_SECS", "5")]).unwrap().request_timeout_secs, 5);
    }
}
