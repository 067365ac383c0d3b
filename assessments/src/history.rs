//! Assessment history and its JSON persistence
//!
//! Every evaluation can be recorded together with its originating inputs
//! and a timestamp. The in-memory log is append-only, with no deduplication
//! or eviction. A [`JsonFileStore`] mirrors the log to disk under a single
//! namespaced key; saving is best-effort (failures are logged and
//! swallowed), loading rebuilds the log on demand.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::HistoryError;
use crate::protocols::RawInput;
use crate::types::{CalculationResult, ProtocolId};

/// Namespace under which history is persisted
pub const STORAGE_KEY: &str = "assessment-data";

/// One recorded evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub protocol: ProtocolId,
    pub result: CalculationResult,
    pub inputs: RawInput,
    pub timestamp: DateTime<Utc>,
}

/// In-memory assessment history, in append order
#[derive(Debug, Clone, Default)]
pub struct AssessmentLog {
    entries: Vec<HistoryEntry>,
}

impl AssessmentLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a result with its inputs, stamped with the current time
    pub fn record(
        &mut self,
        protocol: ProtocolId,
        result: CalculationResult,
        inputs: RawInput,
    ) -> &HistoryEntry {
        self.entries.push(HistoryEntry {
            protocol,
            result,
            inputs,
            timestamp: Utc::now(),
        });
        self.entries.last().unwrap_or_else(|| unreachable!("just pushed"))
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Most recent entry for a protocol
    pub fn latest(&self, protocol: ProtocolId) -> Option<&HistoryEntry> {
        self.entries.iter().rev().find(|e| e.protocol == protocol)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Persisted shape
// ============================================================================

// On disk the log is grouped per protocol, matching the shape the platform
// has always stored: { assessments: { <protocol>: { results, last_updated } } }.

#[derive(Debug, Default, Serialize, Deserialize)]
struct SavedData {
    #[serde(default)]
    assessments: BTreeMap<String, ProtocolHistory>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ProtocolHistory {
    #[serde(default)]
    results: Vec<SavedResult>,
    last_updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SavedResult {
    #[serde(flatten)]
    result: CalculationResult,
    #[serde(default)]
    inputs: RawInput,
    timestamp: Option<DateTime<Utc>>,
}

/// File-backed store persisting the log as JSON in a directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self) -> PathBuf {
        self.dir.join(format!("{STORAGE_KEY}.json"))
    }

    /// Persist the log, best-effort
    ///
    /// Failures are reported with a warning and otherwise ignored: history
    /// persistence must never break the assessment flow.
    pub fn save(&self, log: &AssessmentLog) {
        if let Err(error) = self.try_save(log) {
            warn!(%error, path = %self.path().display(), "failed to persist assessment history");
        }
    }

    fn try_save(&self, log: &AssessmentLog) -> Result<(), HistoryError> {
        let mut data = SavedData::default();
        for entry in log.entries() {
            let bucket = data
                .assessments
                .entry(entry.protocol.as_str().to_string())
                .or_default();
            bucket.results.push(SavedResult {
                result: entry.result.clone(),
                inputs: entry.inputs.clone(),
                timestamp: Some(entry.timestamp),
            });
            let newer = bucket.last_updated.map_or(true, |t| entry.timestamp > t);
            if newer {
                bucket.last_updated = Some(entry.timestamp);
            }
        }

        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(&data)?;
        fs::write(self.path(), json)?;
        Ok(())
    }

    /// Load the persisted history back into an in-memory log
    ///
    /// A missing file yields an empty log; unreadable protocol keys are
    /// skipped with a warning so one unknown entry cannot poison the rest.
    pub fn load(&self) -> Result<AssessmentLog, HistoryError> {
        let path = self.path();
        if !path.exists() {
            return Ok(AssessmentLog::new());
        }
        let json = fs::read_to_string(&path)?;
        let data: SavedData = serde_json::from_str(&json)?;

        let mut log = AssessmentLog::new();
        for (key, bucket) in data.assessments {
            let protocol = match ProtocolId::from_str(&key) {
                Ok(protocol) => protocol,
                Err(_) => {
                    warn!(protocol = %key, "skipping unknown protocol in stored history");
                    continue;
                }
            };
            let fallback = bucket.last_updated.unwrap_or_else(Utc::now);
            for saved in bucket.results {
                log.entries.push(HistoryEntry {
                    protocol,
                    result: saved.result,
                    inputs: saved.inputs,
                    timestamp: saved.timestamp.unwrap_or(fallback),
                });
            }
        }
        Ok(log)
    }

    /// Remove the persisted history, best-effort
    pub fn clear(&self) {
        let path = self.path();
        if !path.exists() {
            return;
        }
        if let Err(error) = fs::remove_file(&path) {
            warn!(%error, path = %path.display(), "failed to clear assessment history");
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
