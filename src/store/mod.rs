pub mod http;
pub mod jsonl;

pub use http::*;
pub use jsonl::*;

use anyhow::Result;

use crate::models::PredictionRecord;

/// External store for prediction audit records.
///
/// Writes are fire-and-forget from the engine's point of view: any
/// error returned here is logged and discarded by the caller, never
/// surfaced in a prediction result.
pub enum PredictionSink {
    /// Accept and drop every record.
    Null,
    /// Append JSON lines to a local file.
    Jsonl(JsonlSink),
    /// POST each record to a collector endpoint.
    Http(HttpSink),
}

impl PredictionSink {
    pub async fn record(&self, record: &PredictionRecord) -> Result<()> {
        match self {
            PredictionSink::Null => Ok(()),
            PredictionSink::Jsonl(sink) => sink.record(record),
            PredictionSink::Http(sink) => sink.record(record).await,
        }
    }
}
