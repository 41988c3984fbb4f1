use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Distribution, EmotionLabel};

/// Final verdict returned to callers of the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// The chosen emotion label.
    pub label: EmotionLabel,
    /// Probability distribution over the full label set.
    pub distribution: Distribution,
}

/// Audit record written to the prediction store after each single-text
/// inference. Fire-and-forget; the engine never depends on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRecord {
    /// Unique identifier for this record (UUID).
    pub record_id: String,
    /// The original input text.
    pub text: String,
    /// The normalized form fed to the scorer and the model.
    pub normalized_text: String,
    /// Final label after reconciliation.
    pub label: EmotionLabel,
    /// Final distribution after reconciliation.
    pub distribution: Distribution,
    /// Version tag of the model that participated, or "fallback".
    pub model_version: String,
    /// When the prediction was made.
    pub created_at: DateTime<Utc>,
}

impl PredictionRecord {
    pub fn new(
        text: &str,
        normalized_text: &str,
        prediction: &Prediction,
        model_version: &str,
    ) -> Self {
        Self {
            record_id: uuid::Uuid::new_v4().to_string(),
            text: text.to_string(),
            normalized_text: normalized_text.to_string(),
            label: prediction.label,
            distribution: prediction.distribution.clone(),
            model_version: model_version.to_string(),
            created_at: Utc::now(),
        }
    }
}
