use anyhow::{Result, anyhow};
use tracing::debug;

use crate::models::{Distribution, EmotionLabel, LABEL_COUNT, Prediction, PredictionRecord};
use crate::provider::ModelBundle;
use crate::rules::{contains_crisis_language, pick_label, score};
use crate::text::normalize;

use super::Engine;

/// What the statistical model said about one normalized text.
///
/// `class_probs` is aligned to the model's own class order and empty
/// when the classifier has no probability support; `confidence` is its
/// maximum, or 0.0 when empty.
struct ModelVerdict {
    label: EmotionLabel,
    confidence: f64,
    class_probs: Vec<f64>,
}

impl Engine {
    /// Hybrid decision for a single bounded-length input.
    ///
    /// Reconciles the model's prediction with the rule-based scorer,
    /// applies the unconditional crisis override last, and writes a
    /// best-effort audit record.
    pub(crate) async fn predict_single(&self, text: &str) -> Result<Prediction> {
        let normalized = normalize(text, self.lemmatizer());

        let mut prediction = match self.model() {
            None => self.rule_prediction(text, &normalized),
            Some(bundle) => self.reconcile(bundle, text, &normalized)?,
        };

        // Crisis detection always wins, whatever the model said.
        if contains_crisis_language(self.keywords(), text, &normalized) {
            prediction = Prediction {
                label: EmotionLabel::Crisis,
                distribution: Distribution::crisis(),
            };
        }

        let record = PredictionRecord::new(text, &normalized, &prediction, self.model_version());
        if let Err(err) = self.sink().record(&record).await {
            debug!("Failed to store prediction record: {err:#}");
        }

        Ok(prediction)
    }

    fn rule_prediction(&self, raw: &str, normalized: &str) -> Prediction {
        let scores = score(self.keywords(), raw, normalized);
        let (label, distribution) = pick_label(&scores);
        Prediction {
            label,
            distribution,
        }
    }

    /// Reconcile model and rule outputs, first matching branch wins:
    /// crisis rules, rules over an indecisive model, rules over a
    /// low-confidence model, forced Neutral when neither side has
    /// signal, else the model's own verdict.
    fn reconcile(&self, bundle: &ModelBundle, raw: &str, normalized: &str) -> Result<Prediction> {
        let verdict = run_model(bundle, normalized)?;

        let scores = score(self.keywords(), raw, normalized);
        let (rule_label, rule_distribution) = pick_label(&scores);
        let rule_signal = scores.get(rule_label);

        let low_confidence = verdict.confidence < self.config().min_model_confidence;

        let prediction = if rule_label == EmotionLabel::Crisis {
            Prediction {
                label: EmotionLabel::Crisis,
                distribution: Distribution::crisis(),
            }
        } else if verdict.label == EmotionLabel::Neutral && rule_label != EmotionLabel::Neutral {
            Prediction {
                label: rule_label,
                distribution: rule_distribution,
            }
        } else if rule_label != EmotionLabel::Neutral && rule_signal > 0 && low_confidence {
            Prediction {
                label: rule_label,
                distribution: rule_distribution,
            }
        } else if rule_label == EmotionLabel::Neutral && low_confidence {
            Prediction {
                label: EmotionLabel::Neutral,
                distribution: Distribution::neutral(),
            }
        } else {
            Prediction {
                label: verdict.label,
                distribution: project_distribution(&verdict, bundle.classifier.classes()),
            }
        };

        Ok(prediction)
    }
}

/// Run the model provider on normalized text.
///
/// A missing probability vector is a supported degraded mode; a class
/// name that resolves to no label is a hard error and propagates.
fn run_model(bundle: &ModelBundle, normalized: &str) -> Result<ModelVerdict> {
    let features = bundle.transformer.transform(normalized);
    let raw_label = bundle.classifier.predict(&features);

    let label = EmotionLabel::resolve_model_label(&raw_label)
        .ok_or_else(|| anyhow!("Model emitted unknown label {raw_label:?}"))?;

    let class_probs = bundle.classifier.predict_proba(&features).unwrap_or_default();
    let confidence = class_probs.iter().copied().fold(0.0, f64::max);

    Ok(ModelVerdict {
        label,
        confidence,
        class_probs,
    })
}

/// Project the model's class probabilities onto the full label space.
///
/// Each class's mass is credited to the label it resolves to. An empty
/// or unprojectable vector degenerates to one-hot on the verdict label
/// so the positional length invariant holds for every caller.
fn project_distribution(verdict: &ModelVerdict, classes: &[String]) -> Distribution {
    let mut weights = [0.0; LABEL_COUNT];
    let mut total = 0.0;
    for (class, &prob) in classes.iter().zip(&verdict.class_probs) {
        if let Some(label) = EmotionLabel::resolve_model_label(class) {
            weights[label.index()] += prob;
            total += prob;
        }
    }

    if total > 0.0 {
        Distribution::from_weights(&weights)
    } else {
        Distribution::one_hot(verdict.label)
    }
}
