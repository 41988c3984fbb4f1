use anyhow::Result;
use tracing::debug;

use crate::models::{Distribution, EmotionLabel, LABEL_COUNT, Prediction};

use super::Engine;

/// Per-chunk inference outcome carried into aggregation.
///
/// `weight` is the chunk's character count, floored at one so even a
/// degenerate chunk contributes.
pub(crate) struct ChunkOutcome {
    pub label: EmotionLabel,
    pub probs: Option<Distribution>,
    pub weight: usize,
}

impl Engine {
    /// Classify an oversized input by splitting it on sentence
    /// boundaries and length-weighting the per-chunk verdicts.
    pub(crate) async fn predict_chunked(&self, text: &str) -> Result<Prediction> {
        let parts = split_sentences(text);
        let mut chunks = if parts.is_empty() {
            vec![text.to_string()]
        } else {
            pack_chunks(&parts, self.config().target_chunk_chars)
        };

        if chunks.len() > self.config().max_chunks {
            debug!(
                "Dropping {} chunks beyond the {} chunk cap",
                chunks.len() - self.config().max_chunks,
                self.config().max_chunks
            );
            chunks.truncate(self.config().max_chunks);
        }

        let mut outcomes = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            let prediction = self.predict_single(chunk).await?;
            outcomes.push(ChunkOutcome {
                label: prediction.label,
                probs: Some(prediction.distribution),
                weight: chunk.chars().count().max(1),
            });
        }

        Ok(aggregate(&outcomes))
    }
}

/// Split text into sentence-like parts.
///
/// Boundaries sit after `.`, `!` or `?` followed by whitespace, and at
/// newlines. Parts are trimmed; empty parts are dropped.
pub(crate) fn split_sentences(text: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\n' {
            flush_part(&mut current, &mut parts);
            continue;
        }
        current.push(c);
        if matches!(c, '.' | '!' | '?') && chars.peek().is_some_and(|next| next.is_whitespace()) {
            flush_part(&mut current, &mut parts);
        }
    }
    flush_part(&mut current, &mut parts);

    parts
}

fn flush_part(current: &mut String, parts: &mut Vec<String>) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        parts.push(trimmed.to_string());
    }
    current.clear();
}

/// Greedily pack consecutive parts into chunks of at most
/// `target_chars` characters, joined by single spaces.
///
/// A part that alone exceeds the target still becomes its own chunk;
/// parts are never split internally.
pub(crate) fn pack_chunks(parts: &[String], target_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for part in parts {
        let part_chars = part.chars().count();
        if current.is_empty() {
            current.push_str(part);
            current_chars = part_chars;
            continue;
        }
        if current_chars + 1 + part_chars <= target_chars {
            current.push(' ');
            current.push_str(part);
            current_chars += 1 + part_chars;
        } else {
            chunks.push(std::mem::take(&mut current));
            current.push_str(part);
            current_chars = part_chars;
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Combine chunk verdicts into one, weighting each chunk by length.
///
/// A chunk with a full distribution contributes mass per label; a
/// chunk without one credits its own label outright. A single
/// crisis-flagged chunk gets no special treatment here: its one-hot
/// vector competes at its own weight against the rest.
pub(crate) fn aggregate(outcomes: &[ChunkOutcome]) -> Prediction {
    let mut totals = [0.0; LABEL_COUNT];
    for outcome in outcomes {
        let weight = outcome.weight as f64;
        match &outcome.probs {
            Some(dist) => {
                for label in EmotionLabel::ALL {
                    totals[label.index()] += dist.get(label) * weight;
                }
            }
            None => totals[outcome.label.index()] += weight,
        }
    }

    let total: f64 = totals.iter().sum();
    if total <= 0.0 {
        return Prediction {
            label: EmotionLabel::Neutral,
            distribution: Distribution::neutral(),
        };
    }

    let mut best = EmotionLabel::ALL[0];
    for label in EmotionLabel::ALL {
        if totals[label.index()] > totals[best.index()] {
            best = label;
        }
    }

    Prediction {
        label: best,
        distribution: Distribution::from_weights(&totals),
    }
}
