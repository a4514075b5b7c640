//! Public output types for youtools command responses.
//!
//! These are serialized into the `data` field of the CLI's JSON envelope and
//! returned as-is to library consumers.

use serde::Serialize;
use std::path::PathBuf;

// ============================================================================
// Per-utility results
// ============================================================================

/// Terminal state of one requested utility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MaterializationStatus {
    Written,
    SkippedExisting,
    Overwritten,
    Failed { reason: String },
}

impl MaterializationStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, MaterializationStatus::Failed { .. })
    }
}

/// What happened to the utility's export line in the index file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexStatus {
    Appended,
    Present,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterializationResult {
    pub name: String,
    pub output_path: PathBuf,
    #[serde(flatten)]
    pub status: MaterializationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<IndexStatus>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl MaterializationResult {
    pub fn failed(name: &str, output_path: PathBuf, reason: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            output_path,
            status: MaterializationStatus::Failed {
                reason: reason.into(),
            },
            index: None,
            warnings: Vec::new(),
        }
    }
}

// ============================================================================
// Run summary
// ============================================================================

/// Counts over one add run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub total: usize,
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn from_results(results: &[MaterializationResult]) -> Self {
        let mut summary = Self {
            total: results.len(),
            ..Self::default()
        };

        for result in results {
            match result.status {
                MaterializationStatus::Written | MaterializationStatus::Overwritten => {
                    summary.succeeded += 1
                }
                MaterializationStatus::SkippedExisting => summary.skipped += 1,
                MaterializationStatus::Failed { .. } => summary.failed += 1,
            }
        }

        summary
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}
