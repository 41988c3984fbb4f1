use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::{ArtifactError, Features, FeatureTransformer};

/// On-disk vectorizer artifact: token-to-column vocabulary plus the
/// inverse document frequency per column.
#[derive(Debug, Deserialize)]
struct VectorizerArtifact {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

/// TF-IDF feature transformer loaded from `vectorizer.json`.
///
/// Tokens are whitespace-delimited words of at least two characters;
/// term counts are scaled by idf and the result is L2-normalized.
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn load(path: &Path) -> Result<TfidfVectorizer, ArtifactError> {
        let content = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            path: format!("{path:?}"),
            source,
        })?;
        let artifact: VectorizerArtifact =
            serde_json::from_str(&content).map_err(|source| ArtifactError::Parse {
                path: format!("{path:?}"),
                source,
            })?;

        if artifact.idf.len() != artifact.vocabulary.len() {
            return Err(ArtifactError::IdfShape {
                idf: artifact.idf.len(),
                vocabulary: artifact.vocabulary.len(),
            });
        }
        for &index in artifact.vocabulary.values() {
            if index >= artifact.idf.len() {
                return Err(ArtifactError::VocabularyIndex {
                    index,
                    size: artifact.idf.len(),
                });
            }
        }

        Ok(TfidfVectorizer {
            vocabulary: artifact.vocabulary,
            idf: artifact.idf,
        })
    }
}

impl FeatureTransformer for TfidfVectorizer {
    fn transform(&self, text: &str) -> Features {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in text.split_whitespace() {
            if token.chars().count() < 2 {
                continue;
            }
            if let Some(&column) = self.vocabulary.get(token) {
                *counts.entry(column).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(column, tf)| (column, tf * self.idf[column]))
            .collect();
        entries.sort_by_key(|&(column, _)| column);

        let norm = entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for entry in &mut entries {
                entry.1 /= norm;
            }
        }

        Features(entries)
    }
}
