use anyhow::{Context, Result};
use reqwest::Client;

use crate::models::PredictionRecord;

/// Posts prediction records to a remote collector endpoint.
pub struct HttpSink {
    client: Client,
    url: String,
}

impl HttpSink {
    pub fn new(url: String) -> Self {
        Self {
            client: Client::new(),
            url,
        }
    }

    pub async fn record(&self, record: &PredictionRecord) -> Result<()> {
        let response = self
            .client
            .post(&self.url)
            .json(record)
            .send()
            .await
            .context("Failed to send prediction record")?;

        if !response.status().is_success() {
            anyhow::bail!("Prediction store error: {}", response.status());
        }
        Ok(())
    }
}
