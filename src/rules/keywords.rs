use crate::models::{EmotionLabel, LABEL_COUNT};

/// Static trigger-phrase tables driving the rule-based scorer.
///
/// Built once at startup and immutable afterwards. All phrases are
/// lowercase; matching is plain substring containment.
pub struct KeywordTable {
    triggers: Vec<Vec<String>>,
    crisis_normalized: Vec<String>,
    contrast_cues: Vec<String>,
    distress_markers: Vec<String>,
}

/// Labels boosted when a contrast cue is present.
pub const CONTRAST_BOOST_LABELS: [EmotionLabel; 5] = [
    EmotionLabel::Anger,
    EmotionLabel::Annoyance,
    EmotionLabel::Disapproval,
    EmotionLabel::Disappointment,
    EmotionLabel::Sadness,
];

impl KeywordTable {
    /// Trigger phrases for a label.
    pub fn trigger_phrases(&self, label: EmotionLabel) -> &[String] {
        &self.triggers[label.index()]
    }

    /// Crisis phrases as they appear in raw text.
    pub fn crisis_raw_phrases(&self) -> &[String] {
        self.trigger_phrases(EmotionLabel::Crisis)
    }

    /// Crisis phrases restated for punctuation-free normalized text.
    pub fn crisis_normalized_phrases(&self) -> &[String] {
        &self.crisis_normalized
    }

    /// Cues signalling a contrastive or rejecting clause.
    pub fn contrast_cues(&self) -> &[String] {
        &self.contrast_cues
    }

    /// Markers of emotional distress in longer messages.
    pub fn distress_markers(&self) -> &[String] {
        &self.distress_markers
    }
}

fn phrases(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|p| p.to_string()).collect()
}

impl Default for KeywordTable {
    fn default() -> Self {
        let mut triggers: Vec<Vec<String>> = vec![Vec::new(); LABEL_COUNT];
        let table: [(EmotionLabel, &[&str]); LABEL_COUNT] = [
            (
                EmotionLabel::Admiration,
                &["admire", "respect", "inspired", "amazing", "impressive"],
            ),
            (
                EmotionLabel::Amusement,
                &["funny", "hilarious", "laugh", "lol", "lmao"],
            ),
            (
                EmotionLabel::Anger,
                &["angry", "furious", "rage", "hate", "outraged"],
            ),
            (
                EmotionLabel::Annoyance,
                &["annoyed", "irritated", "bothered", "frustrated"],
            ),
            (
                EmotionLabel::Approval,
                &["agree", "approve", "good job", "well done"],
            ),
            (
                EmotionLabel::Caring,
                &["care", "support", "help", "concerned", "protect"],
            ),
            (
                EmotionLabel::Confusion,
                &["confused", "unclear", "lost", "dont understand"],
            ),
            (
                EmotionLabel::Curiosity,
                &["curious", "wonder", "interested", "how", "why"],
            ),
            (
                EmotionLabel::Desire,
                &["desire", "i really want", "i strongly want", "need badly", "craving"],
            ),
            (
                EmotionLabel::Disappointment,
                &[
                    "disappointed",
                    "let down",
                    "upset with",
                    "expected more",
                    "forgotten",
                    "no one wished",
                    "no one remembered",
                ],
            ),
            (
                EmotionLabel::Disapproval,
                &["disapprove", "wrong", "bad idea", "not okay"],
            ),
            (
                EmotionLabel::Disgust,
                &["disgusting", "gross", "nasty", "revolting"],
            ),
            (
                EmotionLabel::Embarrassment,
                &["embarrassed", "awkward", "ashamed", "cringe"],
            ),
            (
                EmotionLabel::Excitement,
                &["excited", "thrilled", "pumped", "cant wait"],
            ),
            (
                EmotionLabel::Fear,
                &["scared", "afraid", "fear", "terrified", "panic"],
            ),
            (
                EmotionLabel::Gratitude,
                &["thank", "grateful", "appreciate", "thanks"],
            ),
            (
                EmotionLabel::Grief,
                &[
                    "grief",
                    "mourning",
                    "loss",
                    "heartbroken",
                    "goodbye",
                    "worst day of my life",
                ],
            ),
            (
                EmotionLabel::Joy,
                &["happy", "joy", "glad", "delighted", "awesome"],
            ),
            (
                EmotionLabel::Love,
                &["love", "adore", "cherish", "affection"],
            ),
            (
                EmotionLabel::Nervousness,
                &[
                    "nervous",
                    "anxious",
                    "anxiety",
                    "worried",
                    "tense",
                    "overthinking",
                    "fear of abandonment",
                ],
            ),
            (
                EmotionLabel::Optimism,
                &["hopeful", "optimistic", "positive", "it will work"],
            ),
            (
                EmotionLabel::Pride,
                &["proud", "accomplished", "achievement", "earned it"],
            ),
            (
                EmotionLabel::Realization,
                &["realized", "figured out", "now i see", "it hit me"],
            ),
            (
                EmotionLabel::Relief,
                &["relieved", "finally", "thank god", "what a relief"],
            ),
            (
                EmotionLabel::Remorse,
                &["sorry", "regret", "my fault", "guilty"],
            ),
            (
                EmotionLabel::Sadness,
                &[
                    "sad",
                    "down",
                    "unhappy",
                    "depressed",
                    "hurt",
                    "alone",
                    "forgotten",
                    "pain",
                    "silence",
                    "distance",
                ],
            ),
            (
                EmotionLabel::Surprise,
                &["surprised", "shocked", "wow", "unexpected"],
            ),
            (
                EmotionLabel::Neutral,
                &["normal", "okay", "fine", "neutral", "alright"],
            ),
            (
                EmotionLabel::Crisis,
                &[
                    "kill myself",
                    "suicide",
                    "end my life",
                    "want to die",
                    "self harm",
                    "harm myself",
                    "die today",
                    "no reason to live",
                ],
            ),
        ];

        for (label, words) in table {
            triggers[label.index()] = phrases(words);
        }

        Self {
            triggers,
            crisis_normalized: phrases(&[
                "want kill",
                "kill",
                "suicide",
                "end life",
                "self harm",
                "harm",
                "want die",
                "die",
                "no reason live",
            ]),
            contrast_cues: phrases(&[
                "but",
                "however",
                "can't stand",
                "cant stand",
                "cannot stand",
                "leave me",
                "stay away",
            ]),
            distress_markers: phrases(&[
                "hurt",
                "alone",
                "forgotten",
                "anxiety",
                "overthinking",
                "goodbye",
                "heartbroken",
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_label_has_trigger_phrases() {
        let table = KeywordTable::default();
        for label in EmotionLabel::ALL {
            assert!(
                !table.trigger_phrases(label).is_empty(),
                "no phrases for {label}"
            );
        }
    }

    #[test]
    fn test_all_phrases_are_lowercase() {
        let table = KeywordTable::default();
        for label in EmotionLabel::ALL {
            for phrase in table.trigger_phrases(label) {
                assert_eq!(phrase, &phrase.to_lowercase());
            }
        }
    }

    #[test]
    fn test_crisis_lists_cover_both_text_forms() {
        let table = KeywordTable::default();
        assert!(table.crisis_raw_phrases().contains(&"end my life".to_string()));
        assert!(table.crisis_normalized_phrases().contains(&"end life".to_string()));
    }
}
