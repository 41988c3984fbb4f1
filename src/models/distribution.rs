use serde::{Deserialize, Serialize};

use super::{EmotionLabel, LABEL_COUNT};

/// A probability distribution over the full emotion label set.
///
/// Always exactly [`LABEL_COUNT`] entries, positionally aligned to
/// [`EmotionLabel::ALL`]. Entries are non-negative and sum to 1.0,
/// or form a one-hot degenerate vector when no real signal exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Distribution(Vec<f64>);

impl Distribution {
    /// All mass on a single label.
    pub fn one_hot(label: EmotionLabel) -> Distribution {
        let mut probs = vec![0.0; LABEL_COUNT];
        probs[label.index()] = 1.0;
        Distribution(probs)
    }

    /// The degenerate distribution for empty or signal-free input.
    pub fn neutral() -> Distribution {
        Distribution::one_hot(EmotionLabel::Neutral)
    }

    /// The degenerate distribution for crisis input.
    pub fn crisis() -> Distribution {
        Distribution::one_hot(EmotionLabel::Crisis)
    }

    /// Normalize raw per-label weights into a distribution.
    ///
    /// Returns the degenerate Neutral vector when the weights sum to
    /// zero, so the caller never sees an all-zero distribution.
    pub fn from_weights(weights: &[f64; LABEL_COUNT]) -> Distribution {
        let total: f64 = weights.iter().sum();
        if total > 0.0 {
            Distribution(weights.iter().map(|w| w / total).collect())
        } else {
            Distribution::neutral()
        }
    }

    /// Probability mass assigned to a label.
    pub fn get(&self, label: EmotionLabel) -> f64 {
        self.0[label.index()]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Labels paired with their probabilities, highest first.
    pub fn ranked(&self) -> Vec<(EmotionLabel, f64)> {
        let mut entries: Vec<(EmotionLabel, f64)> = EmotionLabel::ALL
            .iter()
            .map(|&label| (label, self.get(label)))
            .collect();
        entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_hot_shape() {
        let dist = Distribution::one_hot(EmotionLabel::Crisis);
        assert_eq!(dist.as_slice().len(), LABEL_COUNT);
        assert_eq!(dist.get(EmotionLabel::Crisis), 1.0);
        assert_eq!(dist.as_slice().iter().sum::<f64>(), 1.0);
    }

    #[test]
    fn test_from_weights_normalizes() {
        let mut weights = [0.0; LABEL_COUNT];
        weights[EmotionLabel::Joy.index()] = 3.0;
        weights[EmotionLabel::Sadness.index()] = 1.0;
        let dist = Distribution::from_weights(&weights);
        assert!((dist.get(EmotionLabel::Joy) - 0.75).abs() < 1e-9);
        assert!((dist.get(EmotionLabel::Sadness) - 0.25).abs() < 1e-9);
        assert!((dist.as_slice().iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_weights_degenerate_to_neutral() {
        let dist = Distribution::from_weights(&[0.0; LABEL_COUNT]);
        assert_eq!(dist, Distribution::neutral());
    }

    #[test]
    fn test_ranked_orders_by_mass() {
        let mut weights = [0.0; LABEL_COUNT];
        weights[EmotionLabel::Anger.index()] = 2.0;
        weights[EmotionLabel::Fear.index()] = 1.0;
        let ranked = Distribution::from_weights(&weights).ranked();
        assert_eq!(ranked[0].0, EmotionLabel::Anger);
        assert_eq!(ranked[1].0, EmotionLabel::Fear);
    }

    #[test]
    fn test_serializes_as_bare_array() {
        let json = serde_json::to_string(&Distribution::neutral()).unwrap();
        assert!(json.starts_with('['));
        let parsed: Vec<f64> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), LABEL_COUNT);
    }
}
