pub mod aggregate;
pub mod engine;
pub mod flow;
pub mod metrics;
pub mod physics;
pub mod types;

pub use self::types::{Metric, MetricReport, MetricValue, MetricViolation, RawTallies};

use self::aggregate::{build_report, ReportHeader};
use self::engine::PosMap;
use crate::config::ClassifierSettings;
use crate::corpus::Corpus;
use crate::effort::EffortModel;
use crate::error::ComputationError;
use crate::geometry::GeometryTable;
use crate::layout::Layout;
use tracing::debug;
use typed_builder::TypedBuilder;

#[derive(TypedBuilder)]
pub struct AnalyzerParams {
    #[builder(default = GeometryTable::standard())]
    pub geometry: GeometryTable,
    #[builder(default)]
    pub effort: EffortModel,
    #[builder(default)]
    pub settings: ClassifierSettings,
}

impl AnalyzerParams {
    pub fn build_analyzer(self) -> Result<Analyzer, ComputationError> {
        Analyzer::new(self.geometry, self.effort, self.settings)
    }
}

/// Holds the reference data (geometry, effort model, thresholds) and computes
/// reports. Stateless between calls; safe to share across threads.
#[derive(Debug, Clone)]
pub struct Analyzer {
    geometry: GeometryTable,
    effort: EffortModel,
    settings: ClassifierSettings,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self {
            geometry: GeometryTable::standard(),
            effort: EffortModel::default(),
            settings: ClassifierSettings::default(),
        }
    }
}

impl Analyzer {
    pub fn new(
        geometry: GeometryTable,
        effort: EffortModel,
        settings: ClassifierSettings,
    ) -> Result<Self, ComputationError> {
        effort.validate()?;
        Ok(Self {
            geometry,
            effort,
            settings,
        })
    }

    pub fn geometry(&self) -> &GeometryTable {
        &self.geometry
    }

    pub fn effort(&self) -> &EffortModel {
        &self.effort
    }

    pub fn settings(&self) -> &ClassifierSettings {
        &self.settings
    }

    /// Maps every layout character onto this analyzer's geometry. A slot the
    /// geometry does not define is an invalid state, not a diagnostic.
    pub fn resolve(&self, layout: &Layout) -> Result<PosMap<'_>, ComputationError> {
        layout
            .keys()
            .iter()
            .map(|(&ch, slot)| {
                self.geometry
                    .slot(&slot.id)
                    .map(|s| (ch, s))
                    .ok_or_else(|| ComputationError::UnknownSlot {
                        ch,
                        slot: slot.id.clone(),
                    })
            })
            .collect()
    }

    pub fn tally(&self, layout: &Layout, corpus: &Corpus) -> Result<RawTallies, ComputationError> {
        let pos_map = self.resolve(layout)?;
        Ok(engine::tally(self, &pos_map, corpus))
    }

    pub fn analyze(&self, layout: &Layout, corpus: &Corpus) -> Result<MetricReport, ComputationError> {
        let tallies = self.tally(layout, corpus)?;
        let header = ReportHeader {
            layout_name: layout.name().to_string(),
            layout_hash: layout.layout_hash().to_string(),
            corpus_version: corpus.version().to_string(),
            effort_model_version: self.effort.version.clone(),
        };

        let report = build_report(header, tallies);
        debug!(
            "Analyzed '{}' against corpus {}: sfb={:?} effort={:?}",
            layout.name(),
            &corpus.version()[..12.min(corpus.version().len())],
            report.get(Metric::Sfb).value(),
            report.get(Metric::Effort).value()
        );
        Ok(report)
    }
}
