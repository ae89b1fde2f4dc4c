//! Scoring by a local model process.
//!
//! The request JSON is written to the child's stdin while its output is
//! read, then stdin is closed. A child that exits without reading its input
//! is fine. The child must exit 0, write nothing to stderr, and print one
//! JSON document on stdout.

use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;

use ovaware_core::QuestionnaireRecord;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::error::ScoringError;
use crate::payload::PayloadFormat;
use crate::{BoxFuture, ScoringCollaborator};

#[derive(Debug, Clone)]
pub struct SubprocessScorer {
    pub program: String,
    pub args: Vec<String>,
    pub payload: PayloadFormat,
    pub timeout: Duration,
}

impl SubprocessScorer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            payload: PayloadFormat::default(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_payload(mut self, payload: PayloadFormat) -> Self {
        self.payload = payload;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn run(&self, body: Vec<u8>) -> Result<serde_json::Value, ScoringError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ScoringError::Process(format!("failed to start {}: {e}", self.program)))?;

        // Feed stdin while stdout/stderr are drained. The pipe is closed when
        // `stdin` drops at the end of the block so the child sees EOF.
        let stdin = child.stdin.take();
        let write = async move {
            let Some(mut stdin) = stdin else {
                return Ok(());
            };
            match stdin.write_all(&body).await {
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                    debug!("scoring process closed stdin before reading the request");
                    Ok(())
                }
                other => other,
            }
        };

        let (written, output) = tokio::join!(write, child.wait_with_output());
        let output =
            output.map_err(|e| ScoringError::Process(format!("failed to wait for process: {e}")))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            return Err(ScoringError::Process(format!(
                "process exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        written.map_err(|e| ScoringError::Process(format!("failed to write request: {e}")))?;
        if !stderr.trim().is_empty() {
            warn!(program = %self.program, stderr = %stderr.trim(), "scoring process wrote to stderr");
            return Err(ScoringError::Process(format!(
                "process reported an error: {}",
                stderr.trim()
            )));
        }

        debug!(program = %self.program, bytes = output.stdout.len(), "scoring process finished");

        serde_json::from_slice(&output.stdout).map_err(|e| {
            ScoringError::Malformed(format!(
                "process output is not JSON ({e}): {}",
                String::from_utf8_lossy(&output.stdout).trim()
            ))
        })
    }
}

impl ScoringCollaborator for SubprocessScorer {
    fn name(&self) -> &str {
        "subprocess"
    }

    fn score<'a>(
        &'a self,
        record: &'a QuestionnaireRecord,
    ) -> BoxFuture<'a, Result<serde_json::Value, ScoringError>> {
        Box::pin(async move {
            let payload = self.payload.encode(record)?;
            let body =
                serde_json::to_vec(&payload).map_err(|e| ScoringError::Encode(e.to_string()))?;

            info!(program = %self.program, payload = ?self.payload, "invoking scoring process");

            tokio::time::timeout(self.timeout, self.run(body))
                .await
                .map_err(|_| ScoringError::Timeout(self.timeout))?
        })
    }
}
