use crate::cli::args::{Cli, Commands, FormatArg, RunArgs, SummaryArgs};
use anyhow::{Result, bail};
use clap::Parser;
use seqstats::core::engine::{self, InputJob, RunConfig, fmt_dur, log_stage, stats_enabled};
use seqstats::core::io::InputFormat;
use seqstats::core::metrics::MAX_BUCKETS;
use seqstats::report;
use std::collections::HashSet;
use std::path::Path;
use std::time::Instant;

pub fn entry() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => run(args),
        Commands::Summary(args) => summary(args),
    }
}

fn run(args: RunArgs) -> Result<()> {
    let stats = stats_enabled();
    let t0 = Instant::now();

    stage(stats, "preflight", || validate_run(&args))?;

    let t_name = Instant::now();
    let jobs = build_jobs(&args)?;
    log_stage(stats, "sample-names", t_name);

    let config = RunConfig {
        jobs,
        threads: args.threads,
        format: format_choice(args.format),
        bucket_count: args.bins,
    };

    let t_engine = Instant::now();
    let outputs = engine::run(config)?;
    log_stage(stats, "engine", t_engine);

    for output in &outputs {
        report::write_reports(&args.out, output, !args.no_zip)?;
        print!("{}", report::summary_txt::render(output));
        println!();
    }

    if stats {
        eprintln!("SEQSTATS_STATS output_dir={}", args.out.display());
        eprintln!("SEQSTATS_STATS total={}", fmt_dur(t0.elapsed()));
    }

    Ok(())
}

fn summary(args: SummaryArgs) -> Result<()> {
    let stats = stats_enabled();
    stage(stats, "preflight", || validate_summary(&args))?;

    let job = InputJob {
        sample_name: engine::sample_name_for(&args.input)?,
        path: args.input.clone(),
    };
    let output = engine::analyze_file(&job, format_choice(args.format), 1, args.bins)?;

    print!("{}", report::summary_txt::render(&output));
    println!();
    print!("{}", report::summary_txt::render_histograms(&output));
    Ok(())
}

fn validate_run(args: &RunArgs) -> Result<()> {
    for input in &args.inputs {
        check_input(input)?;
    }
    if args.threads == 0 {
        bail!("--threads must be >= 1");
    }
    check_bins(args.bins)?;
    if args.sample_name.is_some() && args.inputs.len() > 1 {
        bail!("--sample-name can only be used with a single input");
    }
    Ok(())
}

fn validate_summary(args: &SummaryArgs) -> Result<()> {
    check_input(&args.input)?;
    check_bins(args.bins)
}

fn check_input(path: &Path) -> Result<()> {
    if !path.is_file() {
        bail!("input file not found: {}", path.display());
    }
    Ok(())
}

fn check_bins(bins: usize) -> Result<()> {
    if bins == 0 {
        bail!("--bins must be >= 1");
    }
    if bins > MAX_BUCKETS {
        bail!("--bins must be <= {}", MAX_BUCKETS);
    }
    Ok(())
}

fn build_jobs(args: &RunArgs) -> Result<Vec<InputJob>> {
    let mut jobs = Vec::with_capacity(args.inputs.len());
    let mut seen = HashSet::new();
    for input in &args.inputs {
        let sample_name = match &args.sample_name {
            Some(s) => s.clone(),
            None => engine::sample_name_for(input)?,
        };
        if !seen.insert(sample_name.clone()) {
            bail!(
                "duplicate sample name '{}' (from {})",
                sample_name,
                input.display()
            );
        }
        jobs.push(InputJob {
            path: input.clone(),
            sample_name,
        });
    }
    Ok(jobs)
}

fn format_choice(arg: FormatArg) -> Option<InputFormat> {
    match arg {
        FormatArg::Auto => None,
        FormatArg::Fasta => Some(InputFormat::Fasta),
        FormatArg::Csv => Some(InputFormat::Csv),
        FormatArg::Tsv => Some(InputFormat::Tsv),
    }
}

fn stage<F>(stats: bool, name: &str, f: F) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    let t = Instant::now();
    let res = f();
    log_stage(stats, name, t);
    res
}
