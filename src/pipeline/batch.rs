// ============================================================
// Layer 4 — Batch Results
// ============================================================
// What a batch run hands back: successful scores and skipped
// pairs are kept apart, both tagged with the pair's position
// in the input. A skipped pair never gets a placeholder score.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredPair {
    pub index: usize,
    pub score: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedPair {
    pub index:  usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub label:     String,
    pub total:     usize,
    pub scored:    Vec<ScoredPair>,
    pub skipped:   Vec<SkippedPair>,
    pub cancelled: bool,
}

impl BatchReport {
    pub fn new(label: impl Into<String>, total: usize) -> Self {
        Self { label: label.into(), total, ..Self::default() }
    }

    /// Scores of the successful pairs, in input order.
    pub fn scores(&self) -> Vec<f32> {
        self.scored.iter().map(|p| p.score).collect()
    }

    /// Pairs that were either scored or skipped.
    pub fn processed(&self) -> usize {
        self.scored.len() + self.skipped.len()
    }
}

/// Shared flag a driver sets to stop a batch between pairs.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
