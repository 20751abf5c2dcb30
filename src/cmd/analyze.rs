use super::{build_analyzer, build_corpus, load_config, resolve_layout, InputArgs};
use crate::reports;
use crate::GlobalArgs;
use clap::Args;
use keyscope::error::KsResult;

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Reference layout name or layout JSON file.
    #[arg(short, long, default_value = "qwerty")]
    pub layout: String,

    /// Print the report as JSON instead of tables.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: AnalyzeArgs, global: &GlobalArgs) -> KsResult<()> {
    let config = load_config(&args.input, global)?;
    let analyzer = build_analyzer(global, &config)?;
    let corpus = build_corpus(&args.input, &config)?;
    let layout = resolve_layout(&args.layout, &analyzer, &config)?;

    let report = analyzer.analyze(&layout, &corpus)?.rounded(2);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    reports::print_layout_grid(&layout, analyzer.geometry());
    reports::print_metric_report(&report);
    reports::print_usage_report(&report);
    reports::print_offenders(&report);
    Ok(())
}
