pub mod analyze;
pub mod compare;
pub mod corpus;

use crate::GlobalArgs;
use clap::Args;
use keyscope::config::AnalysisConfig;
use keyscope::corpus::loader::{load_counts, read_text_sources};
use keyscope::corpus::{Corpus, CorpusBuilder};
use keyscope::effort::EffortModel;
use keyscope::error::{KeyscopeError, KsResult};
use keyscope::geometry::GeometryTable;
use keyscope::layout::{Layout, LayoutSpec};
use keyscope::layouts::KnownLayout;
use keyscope::scorer::{Analyzer, AnalyzerParams};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;

/// Corpus source plus the tunable analysis settings shared by every command.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Plain-text corpus files.
    #[arg(long, num_args = 1.., required_unless_present = "counts")]
    pub corpus: Vec<PathBuf>,

    /// Directory of saved count tables (1grams.csv, 2grams.csv, 3grams.csv).
    #[arg(long, conflicts_with = "corpus")]
    pub counts: Option<PathBuf>,

    #[command(flatten)]
    pub config: AnalysisConfig,
}

pub fn load_config(input: &InputArgs, global: &GlobalArgs) -> KsResult<AnalysisConfig> {
    match &global.config {
        Some(path) => {
            info!("Loading analysis config from {:?}", path);
            AnalysisConfig::load_from_file(path)
        }
        None => Ok(input.config.clone()),
    }
}

pub fn load_geometry(global: &GlobalArgs) -> KsResult<GeometryTable> {
    match global.geometry.as_str() {
        "standard" => Ok(GeometryTable::standard()),
        "ortho" => Ok(GeometryTable::ortho()),
        path => {
            info!("Loading geometry from {}", path);
            GeometryTable::load_from_file(path)
        }
    }
}

pub fn build_analyzer(global: &GlobalArgs, config: &AnalysisConfig) -> KsResult<Analyzer> {
    let effort = match &global.effort {
        Some(path) => EffortModel::load_from_file(path)?,
        None => EffortModel::default(),
    };

    let analyzer = AnalyzerParams::builder()
        .geometry(load_geometry(global)?)
        .effort(effort)
        .settings(config.thresholds.resolve()?)
        .build()
        .build_analyzer()?;
    Ok(analyzer)
}

pub fn build_corpus(input: &InputArgs, config: &AnalysisConfig) -> KsResult<Corpus> {
    if let Some(dir) = &input.counts {
        return Ok(Corpus::from_counts(load_counts(dir)?)?);
    }

    let mut builder = CorpusBuilder::new(config.corpus.clone());
    for (name, text) in read_text_sources(&input.corpus)? {
        builder.add_source(&name, &text);
    }
    Ok(builder.build()?)
}

/// A reference layout name (`qwerty`, `colemak_dh`, ...) or a layout JSON file.
pub fn resolve_layout(
    name: &str,
    analyzer: &Analyzer,
    config: &AnalysisConfig,
) -> KsResult<Layout> {
    let geometry = analyzer.geometry();
    if let Ok(known) = KnownLayout::from_str(name) {
        return Ok(known.build(geometry, &config.rules)?);
    }

    let path = PathBuf::from(name);
    if !path.exists() {
        return Err(KeyscopeError::Config(format!(
            "'{}' is neither a known layout nor a layout file",
            name
        )));
    }
    let spec = LayoutSpec::load_from_file(&path)?;
    Ok(Layout::validate(&spec, geometry, &config.rules)?)
}
