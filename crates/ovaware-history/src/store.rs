use std::path::{Path, PathBuf};

use ovaware_core::QuestionnaireRecord;
use ovaware_core::RiskAssessment;
use ovaware_core::models::history::{HistoryEntry, HistoryResult};
use uuid::Uuid;

use crate::error::HistoryError;

/// Fixed name of the history document.
pub const HISTORY_FILE: &str = "assessment_history.json";

/// Reads and writes the history document.
///
/// There is no locking: the whole list is rewritten on every change and the
/// last writer wins.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store `HISTORY_FILE` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(HISTORY_FILE))
    }

    /// `<data dir>/ovaware/assessment_history.json`.
    pub fn open_default() -> Result<Self, HistoryError> {
        let base = dirs::data_dir().ok_or(HistoryError::NoDataDir)?;
        Ok(Self::in_dir(base.join("ovaware")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All entries, newest first. A missing file is an empty history.
    pub fn load(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let bytes = std::fs::read(&self.path)?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Prepend a scored assessment and persist the list.
    pub fn record(
        &self,
        data: &QuestionnaireRecord,
        assessment: &RiskAssessment,
    ) -> Result<HistoryEntry, HistoryError> {
        let entry = HistoryEntry {
            id: Uuid::new_v4(),
            date: jiff::Timestamp::now(),
            data: data.clone(),
            result: HistoryResult::from(assessment),
        };

        let mut entries = self.load()?;
        entries.insert(0, entry.clone());
        self.save(&entries)?;

        tracing::info!(
            id = %entry.id,
            level = %entry.result.risk_level,
            total = entries.len(),
            "assessment added to history"
        );
        Ok(entry)
    }

    pub fn latest(&self) -> Result<Option<HistoryEntry>, HistoryError> {
        Ok(self.load()?.into_iter().next())
    }

    pub fn clear(&self) -> Result<(), HistoryError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
            tracing::info!(path = %self.path.display(), "history cleared");
        }
        Ok(())
    }

    fn save(&self, entries: &[HistoryEntry]) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec_pretty(entries)?;

        // Write to a temp file then rename for atomicity
        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, &json)?;
        std::fs::rename(&tmp_path, &self.path)?;

        tracing::debug!(path = %self.path.display(), "history saved");
        Ok(())
    }
}
