use crate::models::{Distribution, EmotionLabel, LABEL_COUNT};

use super::crisis::contains_crisis_language;
use super::keywords::{CONTRAST_BOOST_LABELS, KeywordTable};

/// Per-call keyword score accumulators, one per label.
///
/// Created fresh for every inference and discarded afterwards; the
/// scorer never keeps state between calls.
#[derive(Debug, Clone)]
pub struct ScoreMap {
    scores: [u32; LABEL_COUNT],
}

impl ScoreMap {
    fn new() -> ScoreMap {
        ScoreMap {
            scores: [0; LABEL_COUNT],
        }
    }

    pub fn get(&self, label: EmotionLabel) -> u32 {
        self.scores[label.index()]
    }

    fn add(&mut self, label: EmotionLabel, amount: u32) {
        self.scores[label.index()] += amount;
    }

    fn deduct(&mut self, label: EmotionLabel, amount: u32) {
        let slot = &mut self.scores[label.index()];
        *slot = slot.saturating_sub(amount);
    }

    pub fn is_zero(&self) -> bool {
        self.scores.iter().all(|&s| s == 0)
    }
}

/// Score text against the keyword tables.
///
/// Crisis language short-circuits to a Crisis-only map. Otherwise each
/// trigger phrase found in the normalized text adds one to its label,
/// and the contextual adjustments re-weight the result.
pub fn score(table: &KeywordTable, raw: &str, normalized: &str) -> ScoreMap {
    let mut scores = ScoreMap::new();

    if contains_crisis_language(table, raw, normalized) {
        scores.add(EmotionLabel::Crisis, 1);
        return scores;
    }

    for label in EmotionLabel::ALL {
        for phrase in table.trigger_phrases(label) {
            if normalized.contains(phrase.as_str()) {
                scores.add(label, 1);
            }
        }
    }

    apply_context_adjustments(table, raw, normalized, &mut scores);
    scores
}

/// Re-weight raw keyword counts using contextual cues.
///
/// Contrast cues ("but", "stay away") shift weight from Love/Joy to
/// the negative set. Distress markers shift weight from Desire to
/// Sadness/Nervousness: long distressed messages often contain generic
/// "want/wish" clauses that would otherwise outscore the dominant
/// sentiment.
fn apply_context_adjustments(
    table: &KeywordTable,
    raw: &str,
    normalized: &str,
    scores: &mut ScoreMap,
) {
    let joined = format!("{} {}", raw.to_lowercase(), normalized);

    if table
        .contrast_cues()
        .iter()
        .any(|cue| joined.contains(cue.as_str()))
    {
        for label in CONTRAST_BOOST_LABELS {
            scores.add(label, 2);
        }
        if scores.get(EmotionLabel::Love) > 0 {
            scores.deduct(EmotionLabel::Love, 1);
        }
        if scores.get(EmotionLabel::Joy) > 0 {
            scores.deduct(EmotionLabel::Joy, 1);
        }
    }

    if table
        .distress_markers()
        .iter()
        .any(|marker| joined.contains(marker.as_str()))
    {
        scores.add(EmotionLabel::Sadness, 2);
        scores.add(EmotionLabel::Nervousness, 1);
        if scores.get(EmotionLabel::Desire) > 0 {
            scores.deduct(EmotionLabel::Desire, 2);
        }
    }
}

/// Pick the winning label and build the normalized distribution.
///
/// An all-zero map means no keyword matched: Neutral with the
/// degenerate vector. Ties go to the first-declared label.
pub fn pick_label(scores: &ScoreMap) -> (EmotionLabel, Distribution) {
    if scores.is_zero() {
        return (EmotionLabel::Neutral, Distribution::neutral());
    }

    let mut best = EmotionLabel::ALL[0];
    for label in EmotionLabel::ALL {
        if scores.get(label) > scores.get(best) {
            best = label;
        }
    }

    let mut weights = [0.0; LABEL_COUNT];
    for label in EmotionLabel::ALL {
        weights[label.index()] = f64::from(scores.get(label));
    }

    (best, Distribution::from_weights(&weights))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> KeywordTable {
        KeywordTable::default()
    }

    #[test]
    fn test_counts_trigger_phrases() {
        let scores = score(&table(), "so grateful, thank you", "so grateful thank you");
        // "thank" and "grateful" both hit; "thanks" does not.
        assert_eq!(scores.get(EmotionLabel::Gratitude), 2);
        assert_eq!(scores.get(EmotionLabel::Anger), 0);
    }

    #[test]
    fn test_crisis_short_circuits_scoring() {
        let scores = score(
            &table(),
            "I am happy but I want to kill myself",
            "i am happy but i want to kill myself",
        );
        assert_eq!(scores.get(EmotionLabel::Crisis), 1);
        assert_eq!(scores.get(EmotionLabel::Joy), 0);
        assert_eq!(scores.get(EmotionLabel::Sadness), 0);
    }

    #[test]
    fn test_contrast_cues_suppress_love() {
        let raw = "I love you but stay away from me";
        let scores = score(&table(), raw, "i love you but stay away from me");

        // "love" scored 1, then the contrast pass took it back.
        assert_eq!(scores.get(EmotionLabel::Love), 0);
        for label in CONTRAST_BOOST_LABELS {
            assert!(scores.get(label) >= 2, "{label} not boosted");
        }

        let (label, _) = pick_label(&scores);
        assert_ne!(label, EmotionLabel::Love);
        assert!(CONTRAST_BOOST_LABELS.contains(&label));
    }

    #[test]
    fn test_distress_markers_outweigh_desire() {
        let raw = "I really want them back, I feel so alone and hurt";
        let normalized = "i really want them back i feel so alone and hurt";
        let scores = score(&table(), raw, normalized);

        // "i really want" gave Desire 1; the distress pass removed it
        // and pushed Sadness past everything else.
        assert_eq!(scores.get(EmotionLabel::Desire), 0);
        let (label, _) = pick_label(&scores);
        assert_eq!(label, EmotionLabel::Sadness);
    }

    #[test]
    fn test_pick_label_defaults_to_neutral() {
        let scores = score(&table(), "xyzzy", "xyzzy");
        assert!(scores.is_zero());
        let (label, dist) = pick_label(&scores);
        assert_eq!(label, EmotionLabel::Neutral);
        assert_eq!(dist, Distribution::neutral());
    }

    #[test]
    fn test_pick_label_breaks_ties_by_declaration_order() {
        // "furious" (Anger) and "shocked" (Surprise) both score 1;
        // Anger is declared first.
        let scores = score(&table(), "", "furious and shocked");
        assert_eq!(scores.get(EmotionLabel::Anger), 1);
        assert_eq!(scores.get(EmotionLabel::Surprise), 1);
        let (label, _) = pick_label(&scores);
        assert_eq!(label, EmotionLabel::Anger);
    }

    #[test]
    fn test_distribution_normalized_by_score_sum() {
        let scores = score(&table(), "", "furious and shocked");
        let (_, dist) = pick_label(&scores);
        let sum: f64 = dist.as_slice().iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!(dist.get(EmotionLabel::Anger) > 0.0);
        assert!(dist.get(EmotionLabel::Surprise) > 0.0);
    }
}
