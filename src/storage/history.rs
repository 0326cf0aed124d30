use crate::error::Result;
use crate::payload::SubmissionReceipt;
use crate::storage::{read_json, write_json};
use std::path::PathBuf;
use tracing::debug;

/// Local record of accepted submissions, oldest first on disk
#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    entries: Vec<SubmissionReceipt>,
}

impl HistoryStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = read_json(&path)?.unwrap_or_default();
        Ok(Self { path, entries })
    }

    pub fn record(&mut self, receipt: SubmissionReceipt) -> Result<()> {
        debug!("Recording submission {} in history", receipt.id);
        self.entries.push(receipt);
        write_json(&self.path, &self.entries)
    }

    /// All entries, newest first
    pub fn entries(&self) -> impl Iterator<Item = &SubmissionReceipt> {
        self.entries.iter().rev()
    }

    /// Up to `n` newest entries, optionally limited to one preset
    pub fn recent(&self, n: usize, preset: Option<&str>) -> Vec<&SubmissionReceipt> {
        self.entries()
            .filter(|r| preset.map_or(true, |p| r.preset == p))
            .take(n)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
