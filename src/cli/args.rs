use clap::{Parser, Subcommand, ValueEnum};
use seqstats::core::metrics::DEFAULT_BUCKETS;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "seqstats",
    version,
    about = "Sequence statistics for FASTA and tabular input"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze input files and write reports.
    Run(RunArgs),
    /// Print statistics and histograms for one file without writing anything.
    Summary(SummaryArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    #[arg(long)]
    pub out: PathBuf,

    #[arg(long, default_value_t = num_cpus::get())]
    pub threads: usize,

    #[arg(long)]
    pub sample_name: Option<String>,

    #[arg(long, value_enum, default_value_t = FormatArg::Auto)]
    pub format: FormatArg,

    #[arg(long, default_value_t = DEFAULT_BUCKETS)]
    pub bins: usize,

    #[arg(long, default_value_t = false)]
    pub no_zip: bool,
}

#[derive(Parser)]
pub struct SummaryArgs {
    pub input: PathBuf,

    #[arg(long, value_enum, default_value_t = FormatArg::Auto)]
    pub format: FormatArg,

    #[arg(long, default_value_t = DEFAULT_BUCKETS)]
    pub bins: usize,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FormatArg {
    #[value(name = "auto")]
    Auto,
    #[value(name = "fasta")]
    Fasta,
    #[value(name = "csv")]
    Csv,
    #[value(name = "tsv")]
    Tsv,
}
