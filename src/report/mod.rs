pub mod seqstats_txt;
pub mod summary_txt;
pub mod zip;

use crate::core::engine::{RunOutput, log_stage, stats_enabled};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub const DATA_FILE: &str = "seqstats_data.txt";
pub const SUMMARY_FILE: &str = "summary.txt";

pub fn write_reports(out: &Path, output: &RunOutput, bundle: bool) -> Result<PathBuf> {
    let stats = stats_enabled();
    let dir = out.join(zip::report_dir_name(&output.ctx.sample_name));
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create output dir {}", dir.display()))?;

    let t_data = Instant::now();
    let data = seqstats_txt::render(output)?;
    write_file(&dir.join(DATA_FILE), &data)?;
    log_stage(stats, "seqstats_data", t_data);

    let t_summary = Instant::now();
    let summary = summary_txt::render(output);
    write_file(&dir.join(SUMMARY_FILE), &summary)?;
    log_stage(stats, "summary", t_summary);

    if bundle {
        let t_zip = Instant::now();
        zip::write_zip(
            out,
            &output.ctx.sample_name,
            &[
                (DATA_FILE, data.as_bytes()),
                (SUMMARY_FILE, summary.as_bytes()),
            ],
        )
        .context("failed to create zip output")?;
        log_stage(stats, "zip", t_zip);
    }
    Ok(dir)
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

pub fn fmt_int(v: u64) -> String {
    let s = v.to_string();
    let mut out = String::with_capacity(s.len() + s.len() / 3);
    let len = s.len();
    for (i, ch) in s.chars().enumerate() {
        if i != 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
