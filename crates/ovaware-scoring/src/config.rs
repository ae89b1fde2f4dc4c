use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ScoringError;
use crate::http::HttpScorer;
use crate::mock::MockScorer;
use crate::multiplier::MultiplierAdapter;
use crate::payload::PayloadFormat;
use crate::subprocess::SubprocessScorer;
use crate::ScoringCollaborator;

fn default_timeout_secs() -> u64 {
    30
}

/// Which scoring backend to use, as stored in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScorerConfig {
    #[default]
    Mock,
    Subprocess {
        program: String,
        #[serde(default)]
        args: Vec<String>,
        #[serde(default)]
        payload: PayloadFormat,
        /// The process answers `{ "risk": <multiplier> }`.
        #[serde(default)]
        legacy_multiplier: bool,
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },
    Http {
        url: String,
        #[serde(default)]
        payload: PayloadFormat,
        /// The endpoint answers `{ "risk": <multiplier> }`.
        #[serde(default)]
        legacy_multiplier: bool,
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },
}

impl ScorerConfig {
    /// Build the configured collaborator.
    pub fn build(&self) -> Result<Arc<dyn ScoringCollaborator>, ScoringError> {
        let (inner, legacy_multiplier): (Box<dyn ScoringCollaborator>, bool) = match self {
            ScorerConfig::Mock => (Box::new(MockScorer::default()), false),
            ScorerConfig::Subprocess {
                program,
                args,
                payload,
                legacy_multiplier,
                timeout_secs,
            } => {
                if program.trim().is_empty() {
                    return Err(ScoringError::Config("subprocess program is empty".to_string()));
                }
                let scorer = SubprocessScorer::new(program.clone(), args.clone())
                    .with_payload(*payload)
                    .with_timeout(Duration::from_secs(*timeout_secs));
                (Box::new(scorer), *legacy_multiplier)
            }
            ScorerConfig::Http {
                url,
                payload,
                legacy_multiplier,
                timeout_secs,
            } => {
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(ScoringError::Config(format!("not an http(s) url: {url}")));
                }
                let scorer = HttpScorer::new(url.clone(), *payload, Duration::from_secs(*timeout_secs))?;
                (Box::new(scorer), *legacy_multiplier)
            }
        };

        tracing::info!(scorer = inner.name(), legacy_multiplier, "scoring collaborator configured");

        if legacy_multiplier {
            Ok(Arc::new(MultiplierAdapter::new(inner)))
        } else {
            Ok(Arc::from(inner))
        }
    }
}
