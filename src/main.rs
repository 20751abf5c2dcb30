use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalArgs,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// JSON analysis config. Replaces the corpus/threshold flags when given.
    #[arg(global = true, long)]
    pub config: Option<PathBuf>,

    /// JSON effort model (defaults to the built-in standard model).
    #[arg(global = true, long)]
    pub effort: Option<PathBuf>,

    /// `standard`, `ortho`, or a path to a geometry JSON file.
    #[arg(global = true, short, long, default_value = "standard")]
    pub geometry: String,

    #[arg(global = true, long, default_value_t = false)]
    pub debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Full metric report for one layout.
    Analyze(cmd::analyze::AnalyzeArgs),
    /// Side-by-side metrics for several layouts.
    Compare(cmd::compare::CompareArgs),
    /// Build, inspect and export corpus count tables.
    Corpus(cmd::corpus::CorpusArgs),
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.global.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Analyze(args) => cmd::analyze::run(args, &cli.global),
        Commands::Compare(args) => cmd::compare::run(args, &cli.global),
        Commands::Corpus(args) => cmd::corpus::run(args, &cli.global),
    };

    if let Err(e) = result {
        eprintln!("\n❌ {}", e);
        process::exit(1);
    }
}
