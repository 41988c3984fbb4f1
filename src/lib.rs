pub mod engine;
pub mod models;
pub mod provider;
pub mod rules;
pub mod store;
pub mod text;

pub use engine::{Engine, EngineConfig};
pub use models::{Distribution, EmotionLabel, LABEL_COUNT, Prediction, PredictionRecord};
pub use provider::{
    EmotionClassifier, FeatureTransformer, Features, LinearClassifier, ModelBundle,
    TfidfVectorizer, load_bundle,
};
pub use rules::{KeywordTable, ScoreMap, contains_crisis_language, pick_label, score};
pub use store::{HttpSink, JsonlSink, PredictionSink};
pub use text::{Lemmatizer, LexiconLemmatizer, PassthroughLemmatizer, normalize};
