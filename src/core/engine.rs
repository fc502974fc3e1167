use crate::core::io::{self, InputFormat};
use crate::core::metrics::{self, Domain, Histogram, StatsSummary, bucketize};
use crate::core::model::Records;
use crate::core::{fasta, tabular};
use anyhow::{Context, Result, anyhow, bail};
use crossbeam_channel as channel;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

#[derive(Clone, Debug)]
pub struct InputJob {
    pub path: PathBuf,
    pub sample_name: String,
}

pub struct RunConfig {
    pub jobs: Vec<InputJob>,
    pub threads: usize,
    /// `None` picks the format from each file's extension.
    pub format: Option<InputFormat>,
    pub bucket_count: usize,
}

pub struct InputContext {
    pub file_name: String,
    pub sample_name: String,
    pub format: InputFormat,
}

pub struct Analysis {
    pub records: Records,
    pub summary: StatsSummary,
    pub length_hist: Histogram,
    pub gc_hist: Histogram,
}

impl Analysis {
    pub fn new(records: Records, bucket_count: usize) -> Self {
        let summary = metrics::compute_stats(&records);
        let lengths: Vec<f64> = metrics::extract_lengths(&records)
            .into_iter()
            .map(|l| l as f64)
            .collect();
        let length_hist = bucketize(&lengths, bucket_count, Domain::DataMax);
        let gc_hist = bucketize(
            &metrics::extract_gc_values(&records),
            bucket_count,
            Domain::Percent,
        );
        Self {
            records,
            summary,
            length_hist,
            gc_hist,
        }
    }
}

pub struct RunOutput {
    pub analysis: Analysis,
    pub ctx: InputContext,
}

pub fn parse_records(data: &[u8], format: InputFormat) -> Result<Records> {
    let records = match format {
        InputFormat::Fasta => Records::Fasta(fasta::parse(data)?),
        InputFormat::Csv => Records::Tabular(tabular::parse(data, b',')?),
        InputFormat::Tsv => Records::Tabular(tabular::parse(data, b'\t')?),
    };
    Ok(records)
}

pub fn sample_name_for(path: &Path) -> Result<String> {
    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .context("failed to determine sample name from input file")?;
    let name = name.strip_suffix(".gz").unwrap_or(name);
    let stem = match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    };
    Ok(stem.to_string())
}

pub fn analyze_file(
    job: &InputJob,
    format: Option<InputFormat>,
    threads: usize,
    bucket_count: usize,
) -> Result<RunOutput> {
    let stats = stats_enabled();
    let format = match format {
        Some(f) => f,
        None => io::detect_format(&job.path)?,
    };
    let file_name = job
        .path
        .file_name()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
        .context("failed to determine input filename")?;

    let t_read = Instant::now();
    let input = io::read_input(&job.path, threads)?;
    log_stage(stats, "engine.read", t_read);

    let t_parse = Instant::now();
    let records = parse_records(input.bytes(), format)
        .with_context(|| format!("failed to parse {} as {}", job.path.display(), format))?;
    log_stage(stats, "engine.parse", t_parse);

    let t_metrics = Instant::now();
    let analysis = Analysis::new(records, bucket_count);
    log_stage(stats, "engine.metrics", t_metrics);

    if stats {
        eprintln!(
            "SEQSTATS_STATS input={} bytes={} records={} format={}",
            job.path.display(),
            input.bytes().len(),
            analysis.summary.total,
            format
        );
    }

    Ok(RunOutput {
        analysis,
        ctx: InputContext {
            file_name,
            sample_name: job.sample_name.clone(),
            format,
        },
    })
}

pub fn run(cfg: RunConfig) -> Result<Vec<RunOutput>> {
    let stats = stats_enabled();
    let t_total = Instant::now();
    if cfg.jobs.is_empty() {
        bail!("no input files given");
    }
    let total_jobs = cfg.jobs.len();
    let workers = cfg.threads.clamp(1, total_jobs);
    let threads_per_job = (cfg.threads / workers).max(1);

    let (job_tx, job_rx) = channel::bounded::<(usize, InputJob)>(workers * 2);
    let (result_tx, result_rx) = channel::unbounded::<(usize, Result<RunOutput>)>();

    let t_workers = Instant::now();
    let mut handles = Vec::with_capacity(workers);
    for _ in 0..workers {
        let rx = job_rx.clone();
        let tx = result_tx.clone();
        let format = cfg.format;
        let bucket_count = cfg.bucket_count;
        handles.push(thread::spawn(move || {
            for (index, job) in rx.iter() {
                let out = analyze_file(&job, format, threads_per_job, bucket_count)
                    .with_context(|| format!("failed to analyze {}", job.path.display()));
                if tx.send((index, out)).is_err() {
                    break;
                }
            }
        }));
    }
    log_stage(stats, "engine.spawn_workers", t_workers);
    drop(job_rx);
    drop(result_tx);

    for (index, job) in cfg.jobs.into_iter().enumerate() {
        if job_tx.send((index, job)).is_err() {
            break;
        }
    }
    drop(job_tx);

    let t_collect = Instant::now();
    let mut parts: Vec<Option<Result<RunOutput>>> = (0..total_jobs).map(|_| None).collect();
    for (index, out) in result_rx.iter() {
        if let Some(slot) = parts.get_mut(index) {
            *slot = Some(out);
        }
    }
    log_stage(stats, "engine.collect", t_collect);

    for handle in handles {
        if handle.join().is_err() {
            bail!("analysis worker panicked");
        }
    }
    log_stage(stats, "engine.total", t_total);

    // Every worker has finished, so the first failure in input order wins.
    parts
        .into_iter()
        .enumerate()
        .map(|(i, part)| {
            part.unwrap_or_else(|| Err(anyhow!("worker exited before finishing input {}", i)))
        })
        .collect()
}

pub fn stats_enabled() -> bool {
    matches!(std::env::var("SEQSTATS_STATS").as_deref(), Ok("1"))
}

pub fn log_stage(stats: bool, name: &str, t: Instant) {
    if stats {
        eprintln!("SEQSTATS_STATS stage={} time={}", name, fmt_dur(t.elapsed()));
    }
}

pub fn fmt_dur(d: Duration) -> String {
    if d.as_secs_f64() < 1.0 {
        format!("{}ms", d.as_millis())
    } else {
        format!("{:.3}s", d.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, TempDir};

    fn write_file(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content).unwrap();
        path
    }

    #[test]
    fn sample_names() {
        assert_eq!(sample_name_for(Path::new("x/reads.fa.gz")).unwrap(), "reads");
        assert_eq!(sample_name_for(Path::new("table.csv")).unwrap(), "table");
        assert_eq!(sample_name_for(Path::new("a.b.fasta")).unwrap(), "a.b");
        assert_eq!(sample_name_for(Path::new(".fa")).unwrap(), ".fa");
    }

    #[test]
    fn parse_by_format() {
        let fasta = parse_records(b">a\nGC\n", InputFormat::Fasta).unwrap();
        assert_eq!(fasta.len(), 1);
        let csv = parse_records(b"seq\nAC\nGG\n", InputFormat::Csv).unwrap();
        assert_eq!(csv.len(), 2);
        let tsv = parse_records(b"seq\tid\nAC\t1\n", InputFormat::Tsv).unwrap();
        assert_eq!(tsv.sequences().collect::<Vec<_>>(), vec!["AC"]);
    }

    #[test]
    fn analysis_of_fasta() {
        let records = parse_records(b">a\nGCGC\n>b\nATAT\n", InputFormat::Fasta).unwrap();
        let analysis = Analysis::new(records, 10);
        assert_eq!(analysis.summary.total, 2);
        assert_eq!(analysis.length_hist.total(), 2);
        assert_eq!(analysis.gc_hist.buckets()[0].count, 1);
        assert_eq!(analysis.gc_hist.buckets()[9].count, 1);
    }

    #[test]
    fn analysis_of_csv_has_no_gc_histogram() {
        let records = parse_records(b"seq\nACGT\nACGTACGT\n", InputFormat::Csv).unwrap();
        let analysis = Analysis::new(records, 10);
        assert_eq!(analysis.gc_hist, Histogram::Unavailable);
        assert_eq!(analysis.length_hist.total(), 2);
    }

    #[test]
    fn run_keeps_input_order() {
        let dir = TempDir::new().unwrap();
        let jobs: Vec<InputJob> = (0..5)
            .map(|i| {
                let body = format!(">s\n{}\n", "A".repeat(i + 1));
                let path = write_file(&dir, &format!("s{}.fa", i), body.as_bytes());
                InputJob {
                    sample_name: format!("s{}", i),
                    path,
                }
            })
            .collect();
        let outputs = run(RunConfig {
            jobs,
            threads: 3,
            format: None,
            bucket_count: 10,
        })
        .unwrap();
        let lens: Vec<u64> = outputs.iter().map(|o| o.analysis.summary.max_length).collect();
        assert_eq!(lens, vec![1, 2, 3, 4, 5]);
        assert_eq!(outputs[2].ctx.sample_name, "s2");
        assert_eq!(outputs[2].ctx.file_name, "s2.fa");
    }

    #[test]
    fn run_reports_unsupported_format() {
        let file = Builder::new().suffix(".txt").tempfile().unwrap();
        let err = run(RunConfig {
            jobs: vec![InputJob {
                path: file.path().to_path_buf(),
                sample_name: "x".into(),
            }],
            threads: 1,
            format: None,
            bucket_count: 10,
        })
        .err()
        .unwrap();
        assert!(format!("{:#}", err).contains("unsupported file format"));
    }

    #[test]
    fn first_failure_in_input_order_is_reported() {
        let dir = TempDir::new().unwrap();
        // The large valid file is first; the two broken ones finish sooner.
        let big = format!(">a\n{}\n", "ACGT".repeat(200_000));
        let mut jobs = vec![InputJob {
            path: write_file(&dir, "big.fa", big.as_bytes()),
            sample_name: "big".into(),
        }];
        for name in ["bad1", "bad2"] {
            jobs.push(InputJob {
                path: write_file(&dir, &format!("{}.fa", name), b">a\nA\xffC\n"),
                sample_name: name.into(),
            });
        }
        for _ in 0..5 {
            let err = run(RunConfig {
                jobs: jobs.clone(),
                threads: 3,
                format: None,
                bucket_count: 10,
            })
            .err()
            .unwrap();
            let msg = format!("{:#}", err);
            assert!(msg.contains("bad1.fa"), "{}", msg);
            assert!(!msg.contains("bad2.fa"), "{}", msg);
        }
    }

    #[test]
    fn format_override_wins() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "seqs.txt", b">a\nNNGC\n");
        let out = analyze_file(
            &InputJob {
                path,
                sample_name: "seqs".into(),
            },
            Some(InputFormat::Fasta),
            1,
            10,
        )
        .unwrap();
        assert_eq!(out.ctx.format, InputFormat::Fasta);
        assert_eq!(out.analysis.summary.avg_n.unwrap().to_string(), "50.00");
    }

    #[test]
    fn durations() {
        assert_eq!(fmt_dur(Duration::from_millis(12)), "12ms");
        assert_eq!(fmt_dur(Duration::from_millis(1500)), "1.500s");
    }
}
