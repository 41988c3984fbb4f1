use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::models::PredictionRecord;

/// Appends prediction records to a local file, one JSON object per line.
pub struct JsonlSink {
    path: PathBuf,
}

impl JsonlSink {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn record(&self, record: &PredictionRecord) -> Result<()> {
        let line =
            serde_json::to_string(record).context("Failed to serialize prediction record")?;
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open prediction log: {:?}", self.path))?;
        writeln!(file, "{line}").context("Failed to write prediction record")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Distribution, EmotionLabel, Prediction};

    fn record() -> PredictionRecord {
        let prediction = Prediction {
            label: EmotionLabel::Sadness,
            distribution: Distribution::one_hot(EmotionLabel::Sadness),
        };
        PredictionRecord::new("feeling down", "feeling down", &prediction, "fallback")
    }

    #[test]
    fn test_appends_one_line_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let sink = JsonlSink::new(dir.path().join("predictions.jsonl"));

        sink.record(&record()).unwrap();
        sink.record(&record()).unwrap();

        let content = std::fs::read_to_string(dir.path().join("predictions.jsonl")).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: PredictionRecord = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed.label, EmotionLabel::Sadness);
        assert_eq!(parsed.model_version, "fallback");
    }

    #[test]
    fn test_unwritable_path_is_an_error() {
        let sink = JsonlSink::new(PathBuf::from("/nonexistent/dir/predictions.jsonl"));
        assert!(sink.record(&record()).is_err());
    }
}
