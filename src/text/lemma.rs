use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Optional linguistic reduction step applied after basic normalization.
///
/// Implementations report whether they are usable; an unavailable
/// lemmatizer leaves text untouched, which is a supported degraded
/// mode rather than an error.
pub trait Lemmatizer: Send + Sync {
    fn is_available(&self) -> bool;

    /// Drop stop words and replace tokens with their lemmas.
    ///
    /// Input is already lowercased, punctuation-free, single-spaced.
    fn reduce(&self, text: &str) -> String;
}

/// No-op lemmatizer used when no lexicon could be constructed.
pub struct PassthroughLemmatizer;

impl Lemmatizer for PassthroughLemmatizer {
    fn is_available(&self) -> bool {
        false
    }

    fn reduce(&self, text: &str) -> String {
        text.to_string()
    }
}

/// On-disk lexicon format: a stop-word list and a token-to-lemma map.
#[derive(Debug, Deserialize)]
struct LexiconFile {
    #[serde(default)]
    stop_words: Vec<String>,
    #[serde(default)]
    lemmas: HashMap<String, String>,
}

/// Dictionary-backed lemmatizer loaded from a JSON lexicon file.
pub struct LexiconLemmatizer {
    stop_words: HashSet<String>,
    lemmas: HashMap<String, String>,
}

impl LexiconLemmatizer {
    /// Load a lexicon from disk.
    ///
    /// Entries that would make reduction unstable are dropped at load
    /// time: lemmas that target a stop word, and lemmas whose target
    /// itself maps onward to a different token. Reduction is therefore
    /// a fixed point on its own output.
    pub fn load(path: &Path) -> Result<LexiconLemmatizer> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read lexicon file: {:?}", path))?;
        let file: LexiconFile =
            serde_json::from_str(&content).context("Failed to parse lexicon JSON")?;

        let stop_words: HashSet<String> =
            file.stop_words.iter().map(|w| w.to_lowercase()).collect();

        let raw: HashMap<String, String> = file
            .lemmas
            .into_iter()
            .map(|(token, lemma)| (token.to_lowercase(), lemma.to_lowercase()))
            .collect();

        let lemmas: HashMap<String, String> = raw
            .iter()
            .filter(|(_, lemma)| {
                !stop_words.contains(*lemma)
                    && raw.get(*lemma).is_none_or(|next| next == *lemma)
            })
            .map(|(token, lemma)| (token.clone(), lemma.clone()))
            .collect();

        Ok(LexiconLemmatizer { stop_words, lemmas })
    }
}

impl Lemmatizer for LexiconLemmatizer {
    fn is_available(&self) -> bool {
        true
    }

    fn reduce(&self, text: &str) -> String {
        text.split_whitespace()
            .filter(|token| !self.stop_words.contains(*token))
            .map(|token| self.lemmas.get(token).map_or(token, String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
