//! Scoring by a remote HTTP endpoint (e.g. `http://localhost:8000/calculate`).

use std::time::Duration;

use ovaware_core::QuestionnaireRecord;
use tracing::info;

use crate::error::ScoringError;
use crate::payload::PayloadFormat;
use crate::{BoxFuture, ScoringCollaborator};

#[derive(Debug, Clone)]
pub struct HttpScorer {
    client: reqwest::Client,
    url: String,
    payload: PayloadFormat,
    timeout: Duration,
}

impl HttpScorer {
    pub fn new(
        url: impl Into<String>,
        payload: PayloadFormat,
        timeout: Duration,
    ) -> Result<Self, ScoringError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ScoringError::Config(e.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
            payload,
            timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// The client timeout covers the whole exchange, body included.
    fn transport_error(&self, e: reqwest::Error, context: &str) -> ScoringError {
        if e.is_timeout() {
            ScoringError::Timeout(self.timeout)
        } else {
            ScoringError::Unreachable(format!("{context}: {e}"))
        }
    }
}

impl ScoringCollaborator for HttpScorer {
    fn name(&self) -> &str {
        "http"
    }

    fn score<'a>(
        &'a self,
        record: &'a QuestionnaireRecord,
    ) -> BoxFuture<'a, Result<serde_json::Value, ScoringError>> {
        Box::pin(async move {
            let payload = self.payload.encode(record)?;

            info!(url = %self.url, payload = ?self.payload, "posting record to scoring endpoint");

            let response = self
                .client
                .post(&self.url)
                .json(&payload)
                .send()
                .await
                .map_err(|e| self.transport_error(e, "request failed"))?;

            let status = response.status();
            let body = response
                .bytes()
                .await
                .map_err(|e| self.transport_error(e, "failed to read body"))?;

            if !status.is_success() {
                return Err(ScoringError::Status {
                    status: status.as_u16(),
                    body: String::from_utf8_lossy(&body).into_owned(),
                });
            }

            serde_json::from_slice(&body).map_err(|e| {
                ScoringError::Malformed(format!("response body is not JSON: {e}"))
            })
        })
    }
}
