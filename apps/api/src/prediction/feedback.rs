//! Append-only JSONL log of observed campaign performance.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::info;

use crate::prediction::features::FeatureOverrides;

#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    pub timestamp: DateTime<Utc>,
    pub campaign_params: FeatureOverrides,
    pub actual_performance: f64,
    pub predicted_performance: Option<f64>,
}

pub struct FeedbackLog {
    path: PathBuf,
    // one writer at a time so lines never interleave
    write_lock: Mutex<()>,
}

impl FeedbackLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn append(&self, entry: &FeedbackEntry) -> Result<(), FeedbackError> {
        let mut line = serde_json::to_vec(entry)?;
        line.push(b'\n');

        let _guard = self.write_lock.lock().await;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(&line).await?;
        file.flush().await?;

        info!(path = %self.path.display(), "Performance feedback recorded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(actual: f64) -> FeedbackEntry {
        FeedbackEntry {
            timestamp: Utc::now(),
            campaign_params: FeatureOverrides {
                platform: Some("Instagram".into()),
                ..Default::default()
            },
            actual_performance: actual,
            predicted_performance: Some(7.25),
        }
    }

    #[tokio::test]
    async fn test_appends_one_line_per_entry() {
        let dir = tempfile::tempdir().unwrap();
        let log = FeedbackLog::new(dir.path().join("feedback/log.jsonl"));

        log.append(&entry(6.5)).await.unwrap();
        log.append(&entry(8.0)).await.unwrap();

        let raw = std::fs::read_to_string(log.path()).unwrap();
        let lines: Vec<FeedbackEntry> = raw
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].actual_performance, 6.5);
        assert_eq!(lines[1].campaign_params.platform.as_deref(), Some("Instagram"));
    }
}
