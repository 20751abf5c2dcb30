use super::{build_corpus, load_config, InputArgs};
use crate::reports;
use crate::GlobalArgs;
use clap::Args;
use keyscope::corpus::loader::save_counts;
use keyscope::error::KsResult;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct CorpusArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Write integer count tables to this directory.
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Number of most frequent n-grams to list.
    #[arg(long, default_value_t = 20)]
    pub top: usize,
}

pub fn run(args: CorpusArgs, global: &GlobalArgs) -> KsResult<()> {
    let config = load_config(&args.input, global)?;
    let corpus = build_corpus(&args.input, &config)?;

    reports::print_corpus_summary(&corpus, args.top);

    if let Some(dir) = &args.out {
        save_counts(dir, corpus.counts())?;
        info!("Count tables written to {:?}", dir);
    }
    Ok(())
}
