//! ovaware-scoring
//!
//! The scoring collaborator: an opaque capability that turns a complete
//! questionnaire record into a risk result. Three backends are provided
//! (canned mock, local subprocess, HTTP endpoint), selected by
//! [`ScorerConfig`]. Responses are normalized by [`response::normalize`].

pub mod config;
pub mod error;
pub mod http;
pub mod mock;
pub mod multiplier;
pub mod payload;
pub mod response;
pub mod subprocess;

use std::future::Future;
use std::pin::Pin;

use ovaware_core::QuestionnaireRecord;

pub use crate::config::ScorerConfig;
pub use crate::error::ScoringError;
pub use crate::http::HttpScorer;
pub use crate::mock::MockScorer;
pub use crate::multiplier::MultiplierAdapter;
pub use crate::payload::PayloadFormat;
pub use crate::subprocess::SubprocessScorer;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One impl per scoring backend.
///
/// Implementations make exactly one call per invocation and never retry.
/// The returned JSON is the backend's raw answer; callers normalize it.
pub trait ScoringCollaborator: Send + Sync {
    /// Short name used in logs (e.g. "mock", "http").
    fn name(&self) -> &str;

    /// Score a complete record.
    fn score<'a>(
        &'a self,
        record: &'a QuestionnaireRecord,
    ) -> BoxFuture<'a, Result<serde_json::Value, ScoringError>>;
}
