use serde::{Deserialize, Serialize};

/// The closed set of emotion categories the engine can emit.
///
/// Declaration order is significant: probability vectors are positional
/// and aligned to this exact ordering, and score ties are broken in
/// favor of the first-declared label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmotionLabel {
    Admiration,
    Amusement,
    Anger,
    Annoyance,
    Approval,
    Caring,
    Confusion,
    Curiosity,
    Desire,
    Disappointment,
    Disapproval,
    Disgust,
    Embarrassment,
    Excitement,
    Fear,
    Gratitude,
    Grief,
    Joy,
    Love,
    Nervousness,
    Optimism,
    Pride,
    Realization,
    Relief,
    Remorse,
    Sadness,
    Surprise,
    Neutral,
    Crisis,
}

/// Number of emotion labels.
pub const LABEL_COUNT: usize = 29;

impl EmotionLabel {
    /// All labels in declaration order.
    pub const ALL: [EmotionLabel; LABEL_COUNT] = [
        EmotionLabel::Admiration,
        EmotionLabel::Amusement,
        EmotionLabel::Anger,
        EmotionLabel::Annoyance,
        EmotionLabel::Approval,
        EmotionLabel::Caring,
        EmotionLabel::Confusion,
        EmotionLabel::Curiosity,
        EmotionLabel::Desire,
        EmotionLabel::Disappointment,
        EmotionLabel::Disapproval,
        EmotionLabel::Disgust,
        EmotionLabel::Embarrassment,
        EmotionLabel::Excitement,
        EmotionLabel::Fear,
        EmotionLabel::Gratitude,
        EmotionLabel::Grief,
        EmotionLabel::Joy,
        EmotionLabel::Love,
        EmotionLabel::Nervousness,
        EmotionLabel::Optimism,
        EmotionLabel::Pride,
        EmotionLabel::Realization,
        EmotionLabel::Relief,
        EmotionLabel::Remorse,
        EmotionLabel::Sadness,
        EmotionLabel::Surprise,
        EmotionLabel::Neutral,
        EmotionLabel::Crisis,
    ];

    /// Position of this label in the fixed ordering.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Canonical display name.
    pub fn name(self) -> &'static str {
        match self {
            EmotionLabel::Admiration => "Admiration",
            EmotionLabel::Amusement => "Amusement",
            EmotionLabel::Anger => "Anger",
            EmotionLabel::Annoyance => "Annoyance",
            EmotionLabel::Approval => "Approval",
            EmotionLabel::Caring => "Caring",
            EmotionLabel::Confusion => "Confusion",
            EmotionLabel::Curiosity => "Curiosity",
            EmotionLabel::Desire => "Desire",
            EmotionLabel::Disappointment => "Disappointment",
            EmotionLabel::Disapproval => "Disapproval",
            EmotionLabel::Disgust => "Disgust",
            EmotionLabel::Embarrassment => "Embarrassment",
            EmotionLabel::Excitement => "Excitement",
            EmotionLabel::Fear => "Fear",
            EmotionLabel::Gratitude => "Gratitude",
            EmotionLabel::Grief => "Grief",
            EmotionLabel::Joy => "Joy",
            EmotionLabel::Love => "Love",
            EmotionLabel::Nervousness => "Nervousness",
            EmotionLabel::Optimism => "Optimism",
            EmotionLabel::Pride => "Pride",
            EmotionLabel::Realization => "Realization",
            EmotionLabel::Relief => "Relief",
            EmotionLabel::Remorse => "Remorse",
            EmotionLabel::Sadness => "Sadness",
            EmotionLabel::Surprise => "Surprise",
            EmotionLabel::Neutral => "Neutral",
            EmotionLabel::Crisis => "Crisis",
        }
    }

    /// Look up a label by name, case-insensitively.
    pub fn from_name(name: &str) -> Option<EmotionLabel> {
        EmotionLabel::ALL
            .iter()
            .copied()
            .find(|label| label.name().eq_ignore_ascii_case(name))
    }

    /// Resolve a raw label emitted by a statistical model.
    ///
    /// Models trained on the legacy 5-category scheme are mapped onto
    /// the expanded label set; anything else resolves by exact name.
    pub fn resolve_model_label(raw: &str) -> Option<EmotionLabel> {
        let mapped = match raw {
            "Happy" => "Joy",
            "Sad" => "Sadness",
            "Angry" => "Anger",
            other => other,
        };
        EmotionLabel::from_name(mapped)
    }
}

impl std::fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
