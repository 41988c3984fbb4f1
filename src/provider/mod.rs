pub mod linear;
pub mod tfidf;

pub use linear::*;
pub use tfidf::*;

use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

/// Sparse feature vector produced by a transformer: (column, value)
/// pairs with ascending column indices.
#[derive(Debug, Clone, Default)]
pub struct Features(pub Vec<(usize, f64)>);

/// Turns normalized text into feature vectors for a classifier.
pub trait FeatureTransformer: Send + Sync {
    fn transform(&self, text: &str) -> Features;
}

/// A trained statistical classifier over emotion classes.
///
/// Methods on a loaded classifier are infallible: artifact validation
/// at load time guarantees shape coherence, so prediction itself has
/// nothing left to fail on.
pub trait EmotionClassifier: Send + Sync {
    /// Class names in the model's own output order.
    fn classes(&self) -> &[String];

    /// Predicted raw class name for the given features.
    fn predict(&self, features: &Features) -> String;

    /// Per-class probabilities aligned to [`Self::classes`], or `None`
    /// when the artifact carries no probability support.
    fn predict_proba(&self, features: &Features) -> Option<Vec<f64>>;
}

/// The classifier/vectorizer pair supplied by the model provider.
pub struct ModelBundle {
    pub transformer: Box<dyn FeatureTransformer>,
    pub classifier: Box<dyn EmotionClassifier>,
    pub version: String,
}

/// Validation failures while loading model artifacts.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("artifact declares no classes")]
    NoClasses,
    #[error("coefficient rows ({rows}) do not match class count ({classes})")]
    CoefficientShape { rows: usize, classes: usize },
    #[error("intercept count ({intercepts}) does not match class count ({classes})")]
    InterceptShape { intercepts: usize, classes: usize },
    #[error("idf length ({idf}) does not match vocabulary size ({vocabulary})")]
    IdfShape { idf: usize, vocabulary: usize },
    #[error("vocabulary index {index} out of range for {size} columns")]
    VocabularyIndex { index: usize, size: usize },
    #[error("model class {0:?} does not resolve to a known emotion label")]
    UnknownClass(String),
}

/// Load the classifier/vectorizer pair from a directory holding
/// `model.json` and `vectorizer.json`.
///
/// Any failure is logged and reported as `None`, switching the caller
/// into rule-based fallback mode for the life of the process.
pub fn load_bundle(dir: &Path) -> Option<ModelBundle> {
    match try_load_bundle(dir) {
        Ok(bundle) => {
            info!(
                "Loaded model {} ({} classes)",
                bundle.version,
                bundle.classifier.classes().len()
            );
            Some(bundle)
        }
        Err(err) => {
            warn!("Model unavailable, running in fallback mode: {err}");
            None
        }
    }
}

fn try_load_bundle(dir: &Path) -> Result<ModelBundle, ArtifactError> {
    let transformer = TfidfVectorizer::load(&dir.join("vectorizer.json"))?;
    let classifier = LinearClassifier::load(&dir.join("model.json"))?;
    let version = classifier.version().to_string();

    Ok(ModelBundle {
        transformer: Box::new(transformer),
        classifier: Box::new(classifier),
        version,
    })
}
