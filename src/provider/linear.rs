use std::path::Path;

use serde::Deserialize;

use crate::models::EmotionLabel;

use super::{ArtifactError, EmotionClassifier, Features};

fn default_version() -> String {
    "default".to_string()
}

/// On-disk classifier artifact: one coefficient row and intercept per
/// class. `probability` is false for artifacts exported from models
/// without probability support.
#[derive(Debug, Deserialize)]
struct ModelArtifact {
    #[serde(default = "default_version")]
    version: String,
    classes: Vec<String>,
    coefficients: Vec<Vec<f64>>,
    intercepts: Vec<f64>,
    #[serde(default = "default_probability")]
    probability: bool,
}

fn default_probability() -> bool {
    true
}

/// Linear classifier loaded from `model.json`.
pub struct LinearClassifier {
    version: String,
    classes: Vec<String>,
    coefficients: Vec<Vec<f64>>,
    intercepts: Vec<f64>,
    probability: bool,
}

impl LinearClassifier {
    pub fn load(path: &Path) -> Result<LinearClassifier, ArtifactError> {
        let content = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            path: format!("{path:?}"),
            source,
        })?;
        let artifact: ModelArtifact =
            serde_json::from_str(&content).map_err(|source| ArtifactError::Parse {
                path: format!("{path:?}"),
                source,
            })?;

        if artifact.classes.is_empty() {
            return Err(ArtifactError::NoClasses);
        }
        if artifact.coefficients.len() != artifact.classes.len() {
            return Err(ArtifactError::CoefficientShape {
                rows: artifact.coefficients.len(),
                classes: artifact.classes.len(),
            });
        }
        if artifact.intercepts.len() != artifact.classes.len() {
            return Err(ArtifactError::InterceptShape {
                intercepts: artifact.intercepts.len(),
                classes: artifact.classes.len(),
            });
        }
        for class in &artifact.classes {
            if EmotionLabel::resolve_model_label(class).is_none() {
                return Err(ArtifactError::UnknownClass(class.clone()));
            }
        }

        Ok(LinearClassifier {
            version: artifact.version,
            classes: artifact.classes,
            coefficients: artifact.coefficients,
            intercepts: artifact.intercepts,
            probability: artifact.probability,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Raw decision score per class.
    fn decision_scores(&self, features: &Features) -> Vec<f64> {
        self.coefficients
            .iter()
            .zip(&self.intercepts)
            .map(|(row, intercept)| {
                let dot: f64 = features
                    .0
                    .iter()
                    .map(|&(column, value)| row.get(column).copied().unwrap_or(0.0) * value)
                    .sum();
                dot + intercept
            })
            .collect()
    }
}

impl EmotionClassifier for LinearClassifier {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn predict(&self, features: &Features) -> String {
        let scores = self.decision_scores(features);
        let mut best = 0;
        for i in 1..scores.len() {
            if scores[i] > scores[best] {
                best = i;
            }
        }
        self.classes[best].clone()
    }

    fn predict_proba(&self, features: &Features) -> Option<Vec<f64>> {
        if !self.probability {
            return None;
        }
        Some(softmax(&self.decision_scores(features)))
    }
}

/// Numerically stable softmax.
fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.iter().map(|e| e / sum).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier(probability: bool) -> LinearClassifier {
        LinearClassifier {
            version: "test".to_string(),
            classes: vec!["Happy".to_string(), "Sad".to_string()],
            coefficients: vec![vec![2.0, -1.0], vec![-2.0, 1.5]],
            intercepts: vec![0.0, 0.1],
            probability,
        }
    }

    #[test]
    fn test_predict_picks_highest_decision_score() {
        let features = Features(vec![(0, 1.0)]);
        assert_eq!(classifier(true).predict(&features), "Happy");

        let features = Features(vec![(1, 1.0)]);
        assert_eq!(classifier(true).predict(&features), "Sad");
    }

    #[test]
    fn test_predict_ties_go_to_first_class() {
        // Zero features: scores are the intercepts alone.
        let even = LinearClassifier {
            intercepts: vec![0.5, 0.5],
            ..classifier(true)
        };
        assert_eq!(even.predict(&Features::default()), "Happy");
    }

    #[test]
    fn test_predict_proba_sums_to_one() {
        let probs = classifier(true)
            .predict_proba(&Features(vec![(0, 0.7)]))
            .unwrap();
        assert_eq!(probs.len(), 2);
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(probs[0] > probs[1]);
    }

    #[test]
    fn test_predict_proba_unavailable_without_support() {
        assert!(classifier(false)
            .predict_proba(&Features(vec![(0, 1.0)]))
            .is_none());
    }

    #[test]
    fn test_softmax_handles_large_scores() {
        let probs = softmax(&[1000.0, 1001.0]);
        assert!(probs[1] > probs[0]);
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }
}
