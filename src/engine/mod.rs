pub mod chunker;
pub mod hybrid;

use anyhow::Result;

use crate::models::{Distribution, EmotionLabel, Prediction};
use crate::provider::ModelBundle;
use crate::rules::KeywordTable;
use crate::store::PredictionSink;
use crate::text::{Lemmatizer, PassthroughLemmatizer};

/// Tunable thresholds for the inference engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Input length in characters above which chunking applies.
    pub chunk_threshold_chars: usize,
    /// Greedy packing target for each chunk, in characters.
    pub target_chunk_chars: usize,
    /// Upper bound on processed chunks for pathological inputs.
    pub max_chunks: usize,
    /// Model confidence below which rule signals take precedence.
    pub min_model_confidence: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            chunk_threshold_chars: 900,
            target_chunk_chars: 450,
            max_chunks: 120,
            min_model_confidence: 0.60,
        }
    }
}

/// Shared inference context: keyword tables, the optional model
/// bundle, the lemmatizer and the prediction store, all loaded once at
/// startup and immutable afterwards.
///
/// Every method takes `&self` and keeps its working state on the
/// stack, so one engine can serve concurrent callers behind an `Arc`.
pub struct Engine {
    keywords: KeywordTable,
    lemmatizer: Box<dyn Lemmatizer>,
    model: Option<ModelBundle>,
    sink: PredictionSink,
    config: EngineConfig,
}

impl Engine {
    pub fn new(
        model: Option<ModelBundle>,
        lemmatizer: Box<dyn Lemmatizer>,
        sink: PredictionSink,
        config: EngineConfig,
    ) -> Self {
        Self {
            keywords: KeywordTable::default(),
            lemmatizer,
            model,
            sink,
            config,
        }
    }

    /// Engine with no model, no lemmatizer and no store: keyword rules
    /// only.
    pub fn fallback_only() -> Self {
        Self::new(
            None,
            Box::new(PassthroughLemmatizer),
            PredictionSink::Null,
            EngineConfig::default(),
        )
    }

    /// Whether the engine is running without a statistical model.
    pub fn is_fallback_mode(&self) -> bool {
        self.model.is_none()
    }

    /// Version tag recorded with every prediction.
    pub fn model_version(&self) -> &str {
        self.model
            .as_ref()
            .map_or("fallback", |bundle| bundle.version.as_str())
    }

    pub(crate) fn keywords(&self) -> &KeywordTable {
        &self.keywords
    }

    pub(crate) fn lemmatizer(&self) -> &dyn Lemmatizer {
        self.lemmatizer.as_ref()
    }

    pub(crate) fn model(&self) -> Option<&ModelBundle> {
        self.model.as_ref()
    }

    pub(crate) fn sink(&self) -> &PredictionSink {
        &self.sink
    }

    pub(crate) fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Classify text into an emotion label with a full probability
    /// distribution. The sole public entry point.
    ///
    /// Empty or whitespace-only input is Neutral by definition. Inputs
    /// above the chunking threshold are split on sentence boundaries
    /// and aggregated by chunk length.
    pub async fn predict_emotion(&self, text: &str) -> Result<Prediction> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Prediction {
                label: EmotionLabel::Neutral,
                distribution: Distribution::neutral(),
            });
        }

        if text.chars().count() <= self.config.chunk_threshold_chars {
            return self.predict_single(text).await;
        }

        self.predict_chunked(text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_input_is_neutral() {
        let engine = Engine::fallback_only();
        for input in ["", "   ", "\n\t  \n"] {
            let prediction = engine.predict_emotion(input).await.unwrap();
            assert_eq!(prediction.label, EmotionLabel::Neutral);
            assert_eq!(prediction.distribution, Distribution::neutral());
        }
    }

    #[tokio::test]
    async fn test_crisis_input_is_crisis_in_fallback_mode() {
        let engine = Engine::fallback_only();
        let prediction = engine
            .predict_emotion("I want to kill myself")
            .await
            .unwrap();
        assert_eq!(prediction.label, EmotionLabel::Crisis);
        assert_eq!(prediction.distribution, Distribution::crisis());
    }

    #[tokio::test]
    async fn test_contrast_scenario_not_love() {
        let engine = Engine::fallback_only();
        let prediction = engine
            .predict_emotion("I love you but stay away from me")
            .await
            .unwrap();
        assert_ne!(prediction.label, EmotionLabel::Love);
        assert!(prediction.distribution.get(EmotionLabel::Love) < 0.01);
        assert!(prediction.distribution.get(prediction.label) > 0.0);
    }

    #[tokio::test]
    async fn test_distribution_invariants_hold() {
        let engine = Engine::fallback_only();
        for input in [
            "thank you so much",
            "this is disgusting",
            "nothing in particular",
            "I want to kill myself",
        ] {
            let prediction = engine.predict_emotion(input).await.unwrap();
            let probs = prediction.distribution.as_slice();
            assert_eq!(probs.len(), crate::models::LABEL_COUNT);
            assert!(probs.iter().all(|&p| p >= 0.0));
            assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        }
    }
}
