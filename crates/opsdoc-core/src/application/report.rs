//! Outcome types handed back to the caller after a run.

use std::collections::BTreeMap;

use crate::application::orchestrator::{BatchState, GenerationResult};
use crate::domain::FailurePolicy;

/// File and byte counts of a generated tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationStats {
    pub total_files: u64,
    pub total_size: u64,
    /// Lower-cased extension with its leading dot (`.md`); `""` for files
    /// without one.
    pub files_by_type: BTreeMap<String, u64>,
}

impl GenerationStats {
    pub fn record_file(&mut self, extension: &str, size: u64) {
        self.total_files += 1;
        self.total_size += size;
        *self.files_by_type.entry(extension.to_string()).or_insert(0) += 1;
    }

    pub fn total_size_kb(&self) -> f64 {
        self.total_size as f64 / 1024.0
    }
}

/// Results of one settled batch.
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub stage: String,
    pub policy: FailurePolicy,
    pub state: BatchState,
    pub results: Vec<GenerationResult>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.success()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }

    pub fn bytes_written(&self) -> u64 {
        self.results.iter().map(GenerationResult::size).sum()
    }
}

/// Everything one `generate` call produced.
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub batches: Vec<BatchReport>,
    pub stats: GenerationStats,
}

impl GenerationReport {
    pub fn results(&self) -> impl Iterator<Item = &GenerationResult> {
        self.batches.iter().flat_map(|b| b.results.iter())
    }

    /// `true` when every task of every batch succeeded.
    pub fn is_complete(&self) -> bool {
        self.results().all(GenerationResult::success)
    }

    pub fn failures(&self) -> impl Iterator<Item = &GenerationResult> {
        self.results().filter(|r| !r.success())
    }
}
