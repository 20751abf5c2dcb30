use crate::corpus::Corpus;
use crate::error::ComputationError;
use crate::layout::Layout;
use crate::scorer::{Analyzer, MetricReport};
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

pub trait ProgressCallback: Send + Sync {
    /// Called after each finished layout. Returning `false` cancels the
    /// layouts that have not started yet.
    fn on_progress(&self, done: usize, total: usize, layout_name: &str) -> bool;
}

/// Callback that never cancels.
pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_progress(&self, _done: usize, _total: usize, _layout_name: &str) -> bool {
        true
    }
}

/// Cooperative cancellation flag, shareable with another thread. Checked
/// before each layout starts, never during one.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome {
    Completed(Box<MetricReport>),
    Failed(ComputationError),
    Cancelled,
}

impl BatchOutcome {
    pub fn report(&self) -> Option<&MetricReport> {
        match self {
            BatchOutcome::Completed(r) => Some(r),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BatchResult {
    /// `(layout name, outcome)` in input order.
    pub outcomes: Vec<(String, BatchOutcome)>,
    pub completed: usize,
    pub failed: usize,
    pub cancelled: usize,
}

pub fn analyze_batch<CB: ProgressCallback>(
    analyzer: &Analyzer,
    layouts: &[Layout],
    corpus: &Corpus,
    cancel: &CancelToken,
    callback: &CB,
) -> BatchResult {
    let total = layouts.len();
    let done = AtomicUsize::new(0);

    let outcomes: Vec<(String, BatchOutcome)> = layouts
        .par_iter()
        .map(|layout| {
            if cancel.is_cancelled() {
                return (layout.name().to_string(), BatchOutcome::Cancelled);
            }

            let outcome = match analyzer.analyze(layout, corpus) {
                Ok(report) => BatchOutcome::Completed(Box::new(report)),
                Err(e) => {
                    warn!("Layout '{}' failed: {}", layout.name(), e);
                    BatchOutcome::Failed(e)
                }
            };

            let n = done.fetch_add(1, Ordering::Relaxed) + 1;
            if !callback.on_progress(n, total, layout.name()) {
                cancel.cancel();
            }
            (layout.name().to_string(), outcome)
        })
        .collect();

    let count = |pred: fn(&BatchOutcome) -> bool| outcomes.iter().filter(|(_, o)| pred(o)).count();
    let completed = count(|o| matches!(o, BatchOutcome::Completed(_)));
    let failed = count(|o| matches!(o, BatchOutcome::Failed(_)));
    let cancelled = count(|o| matches!(o, BatchOutcome::Cancelled));

    if cancelled > 0 {
        info!(
            "Batch cancelled: {} of {} layout(s) analyzed, {} skipped",
            completed + failed,
            total,
            cancelled
        );
    } else {
        info!(
            "Batch finished: {} layout(s), {} failed",
            total, failed
        );
    }

    BatchResult {
        outcomes,
        completed,
        failed,
        cancelled,
    }
}
