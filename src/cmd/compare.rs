use super::{build_analyzer, build_corpus, load_config, resolve_layout, InputArgs};
use crate::reports;
use crate::GlobalArgs;
use clap::Args;
use keyscope::batch::{analyze_batch, BatchOutcome, CancelToken, ProgressCallback};
use keyscope::error::{KeyscopeError, KsResult};
use keyscope::layouts::KnownLayout;
use keyscope::scorer::{Metric, MetricReport};
use std::str::FromStr;
use strum::IntoEnumIterator;
use tracing::{debug, warn};

#[derive(Args, Debug, Clone)]
pub struct CompareArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Comma-separated layout names or files. Defaults to every reference layout.
    #[arg(short, long, value_delimiter = ',')]
    pub layouts: Vec<String>,

    /// Metric to sort by, ascending (e.g. `sfb`, `effort`, `redirect`).
    #[arg(long, default_value = "sfb")]
    pub sort_by: String,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

struct LogProgress;

impl ProgressCallback for LogProgress {
    fn on_progress(&self, done: usize, total: usize, layout_name: &str) -> bool {
        debug!("[{}/{}] {}", done, total, layout_name);
        true
    }
}

pub fn run(args: CompareArgs, global: &GlobalArgs) -> KsResult<()> {
    let sort_metric = Metric::from_str(&args.sort_by)
        .map_err(|_| KeyscopeError::Config(format!("Unknown metric '{}'", args.sort_by)))?;

    let config = load_config(&args.input, global)?;
    let analyzer = build_analyzer(global, &config)?;
    let corpus = build_corpus(&args.input, &config)?;

    let names: Vec<String> = if args.layouts.is_empty() {
        KnownLayout::iter().map(|k| k.to_string()).collect()
    } else {
        args.layouts.clone()
    };
    let layouts = names
        .iter()
        .map(|n| resolve_layout(n, &analyzer, &config))
        .collect::<KsResult<Vec<_>>>()?;

    let batch = analyze_batch(&analyzer, &layouts, &corpus, &CancelToken::new(), &LogProgress);

    let mut results: Vec<MetricReport> = Vec::with_capacity(batch.completed);
    for (name, outcome) in batch.outcomes {
        match outcome {
            BatchOutcome::Completed(report) => results.push(report.rounded(2)),
            BatchOutcome::Failed(e) => warn!("Skipping '{}': {}", name, e),
            BatchOutcome::Cancelled => {}
        }
    }

    // Undefined values sort last
    results.sort_by(|a, b| {
        let va = a.get(sort_metric).value().unwrap_or(f64::INFINITY);
        let vb = b.get(sort_metric).value().unwrap_or(f64::INFINITY);
        va.total_cmp(&vb).then_with(|| a.layout_name.cmp(&b.layout_name))
    });

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    reports::print_comparison_report(&results, sort_metric);
    Ok(())
}
