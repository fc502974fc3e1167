use crate::core::engine::RunOutput;
use crate::core::metrics::Histogram;
use crate::core::model::{Percent, Records};
use crate::report::fmt_int;
use std::fmt::Write as _;

const PREVIEW_RECORDS: usize = 3;
const PREVIEW_SEQ_CHARS: usize = 60;

pub fn render(output: &RunOutput) -> String {
    let summary = &output.analysis.summary;
    let mut s = String::new();
    let _ = writeln!(s, "Sequence Stats ({})", output.ctx.file_name);
    let _ = writeln!(s, "Total Sequences: {}", fmt_int(summary.total));
    let _ = writeln!(s, "Average Length: {}", fmt_int(summary.avg_length));
    let _ = writeln!(s, "Minimum Length: {}", fmt_int(summary.min_length));
    let _ = writeln!(s, "Maximum Length: {}", fmt_int(summary.max_length));
    if let Some(gc) = summary.avg_gc {
        let _ = writeln!(s, "Average GC Content: {}%", gc);
    }
    if let Some(n) = summary.avg_n {
        let _ = writeln!(s, "Average N Content: {}%", n);
    }

    let records = &output.analysis.records;
    if !records.is_empty() {
        let _ = writeln!(s);
        let _ = writeln!(s, "Parsed Data");
        write_preview(&mut s, records);
        if records.len() > PREVIEW_RECORDS {
            let _ = writeln!(s, "...and {} more", records.len() - PREVIEW_RECORDS);
        }
    }
    s
}

pub fn render_histograms(output: &RunOutput) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "Length Distribution");
    match &output.analysis.length_hist {
        Histogram::Unavailable => {
            let _ = writeln!(s, "Length distribution not available (no sequences).");
        }
        Histogram::Single(v) => {
            let _ = writeln!(
                s,
                "Only one sequence uploaded (Length: {} bp)",
                fmt_int(*v as u64)
            );
        }
        Histogram::Buckets(_) => write_bars(&mut s, &output.analysis.length_hist),
    }
    let _ = writeln!(s);
    let _ = writeln!(s, "GC Content Distribution");
    match &output.analysis.gc_hist {
        Histogram::Unavailable => {
            let _ = writeln!(
                s,
                "GC content distribution not available (CSV or no sequences)."
            );
        }
        Histogram::Single(v) => {
            let _ = writeln!(
                s,
                "Only one sequence uploaded (GC Content: {}%)",
                Percent::round(*v)
            );
        }
        Histogram::Buckets(_) => write_bars(&mut s, &output.analysis.gc_hist),
    }
    s
}

fn write_bars(s: &mut String, hist: &Histogram) {
    let buckets = hist.buckets();
    let width = buckets.iter().map(|b| b.label.len()).max().unwrap_or(0);
    for b in buckets {
        let _ = writeln!(s, "{:>width$}  {}", b.label, b.count, width = width);
    }
}

fn write_preview(s: &mut String, records: &Records) {
    match records {
        Records::Fasta(entries) => {
            for r in entries.iter().take(PREVIEW_RECORDS) {
                let _ = writeln!(s, ">{}", r.header);
                let _ = writeln!(s, "{}", clip(&r.sequence));
            }
        }
        Records::Tabular(rows) => {
            for row in rows.iter().take(PREVIEW_RECORDS) {
                let fields: Vec<String> = row
                    .iter()
                    .map(|(k, v)| format!("{}={}", k, clip(v)))
                    .collect();
                let _ = writeln!(s, "{}", fields.join(", "));
            }
        }
    }
}

fn clip(v: &str) -> String {
    match v.char_indices().nth(PREVIEW_SEQ_CHARS) {
        Some((idx, _)) => format!("{}...", &v[..idx]),
        None => v.to_string(),
    }
}
