//! Progress observation
//!
//! The pager reports progress at two granularities: identifier batches and
//! pages within a batch. Sinks are optional; a stream produces the same
//! items whether or not anyone is listening.

use std::fmt;
use tracing::info;

/// Granularity of a progress update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgressScope {
    /// One step per identifier batch
    Batches,
    /// One step per fetched page
    Pages,
}

impl fmt::Display for ProgressScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Batches => write!(f, "batches"),
            Self::Pages => write!(f, "pages"),
        }
    }
}

/// Receiver of progress updates.
///
/// `total` is the expected number of steps for the scope, if known, and may
/// change between updates (the remote total is re-read from every page).
/// `advanced` is the number of steps completed since the previous update.
pub trait ProgressSink: Send + Sync {
    /// Record progress
    fn update(&self, scope: ProgressScope, total: Option<u64>, advanced: u64);
}

/// Sink that discards every update
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn update(&self, _scope: ProgressScope, _total: Option<u64>, _advanced: u64) {}
}

/// Sink that reports progress as `tracing` events
#[derive(Debug, Default)]
pub struct TracingProgress {
    label: String,
    counters: std::sync::Mutex<[u64; 2]>,
}

impl TracingProgress {
    /// Create a sink whose events carry the given label
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            counters: std::sync::Mutex::new([0; 2]),
        }
    }

    /// Steps completed so far for a scope
    pub fn completed(&self, scope: ProgressScope) -> u64 {
        self.counters.lock().map_or(0, |c| c[slot(scope)])
    }
}

impl ProgressSink for TracingProgress {
    fn update(&self, scope: ProgressScope, total: Option<u64>, advanced: u64) {
        let done = match self.counters.lock() {
            Ok(mut counters) => {
                counters[slot(scope)] += advanced;
                counters[slot(scope)]
            }
            Err(_) => return,
        };
        match total {
            Some(total) => info!(label = %self.label, %scope, done, total, "progress"),
            None => info!(label = %self.label, %scope, done, "progress"),
        }
    }
}

fn slot(scope: ProgressScope) -> usize {
    match scope {
        ProgressScope::Batches => 0,
        ProgressScope::Pages => 1,
    }
}

/// Number of steps needed to cover `total` units at `per_step` units each
pub(crate) fn steps(total: u64, per_step: u64) -> u64 {
    if per_step == 0 {
        return 0;
    }
    total.div_ceil(per_step)
}
