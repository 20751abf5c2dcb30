use crate::corpus::Corpus;
use crate::effort::EffortModel;
use crate::error::ComputationError;
use crate::layout::Layout;
use crate::scorer::{Analyzer, MetricReport};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::{debug, warn};

/// Identifies a report by the content of its three inputs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    pub layout_hash: String,
    pub corpus_version: String,
    pub effort_model_version: String,
}

impl CacheKey {
    pub fn new(layout: &Layout, corpus: &Corpus, effort: &EffortModel) -> Self {
        Self {
            layout_hash: layout.layout_hash().to_string(),
            corpus_version: corpus.version().to_string(),
            effort_model_version: effort.version.clone(),
        }
    }

    pub fn from_report(report: &MetricReport) -> Self {
        Self {
            layout_hash: report.layout_hash.clone(),
            corpus_version: report.corpus_version.clone(),
            effort_model_version: report.effort_model_version.clone(),
        }
    }
}

/// External key-value collaborator for finished reports. The engine itself
/// keeps no state between calls.
pub trait ReportStore: Send + Sync {
    fn get(&self, key: &CacheKey) -> Option<MetricReport>;
    fn put(&self, key: CacheKey, report: MetricReport);
}

#[derive(Default)]
pub struct InMemoryReportStore {
    reports: RwLock<HashMap<CacheKey, MetricReport>>,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.reports.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut reports) = self.reports.write() {
            reports.clear();
        }
    }
}

impl ReportStore for InMemoryReportStore {
    fn get(&self, key: &CacheKey) -> Option<MetricReport> {
        self.reports.read().ok()?.get(key).cloned()
    }

    fn put(&self, key: CacheKey, report: MetricReport) {
        match self.reports.write() {
            Ok(mut reports) => {
                reports.insert(key, report);
            }
            Err(_) => warn!(
                "Report cache lock poisoned; dropping report for layout {}",
                key.layout_hash
            ),
        }
    }
}

/// Looks the report up first and computes it on a miss. The key does not
/// cover geometry or thresholds, so a store must not be shared between
/// analyzers configured differently.
pub fn analyze_cached<S: ReportStore + ?Sized>(
    store: &S,
    analyzer: &Analyzer,
    layout: &Layout,
    corpus: &Corpus,
) -> Result<MetricReport, ComputationError> {
    let key = CacheKey::new(layout, corpus, analyzer.effort());

    if let Some(mut report) = store.get(&key) {
        debug!("Report cache hit for '{}'", layout.name());
        // Same mapping under another name
        report.layout_name = layout.name().to_string();
        return Ok(report);
    }

    let report = analyzer.analyze(layout, corpus)?;
    store.put(key, report.clone());
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CorpusOptions, LayoutRules};
    use crate::corpus::CorpusBuilder;
    use crate::geometry::GeometryTable;
    use crate::layouts::KnownLayout;
    use std::sync::Arc;

    #[test]
    fn test_put_on_poisoned_store_drops_report() {
        let store = Arc::new(InMemoryReportStore::new());
        let poisoner = Arc::clone(&store);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.reports.write().unwrap();
            panic!("poison the cache lock");
        })
        .join();
        assert!(store.reports.is_poisoned());

        let layout = KnownLayout::Qwerty
            .build(&GeometryTable::standard(), &LayoutRules::default())
            .unwrap();
        let mut builder = CorpusBuilder::new(CorpusOptions::default());
        builder.add_source("test", "hello");
        let corpus = builder.build().unwrap();
        let report = Analyzer::default().analyze(&layout, &corpus).unwrap();
        let key = CacheKey::from_report(&report);

        store.put(key.clone(), report);
        assert!(store.get(&key).is_none());
        assert_eq!(store.len(), 0);
    }
}
