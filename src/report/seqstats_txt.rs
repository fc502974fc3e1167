use crate::core::engine::RunOutput;
use crate::core::metrics::{Histogram, StatsSummary};
use crate::core::model::Percent;
use anyhow::Result;
use std::io::Write;

pub fn render(output: &RunOutput) -> Result<String> {
    let mut buf = Vec::new();
    write_to(&mut buf, output)?;
    Ok(String::from_utf8(buf)?)
}

pub fn write_to(w: &mut dyn Write, output: &RunOutput) -> Result<()> {
    write_basic(w, output)?;
    write_histogram(
        w,
        "Sequence Length Distribution",
        &output.analysis.length_hist,
        |v| format!("{}", v as u64),
    )?;
    write_histogram(
        w,
        "GC Content Distribution",
        &output.analysis.gc_hist,
        |v| Percent::round(v).to_string(),
    )?;
    Ok(())
}

fn write_basic(w: &mut dyn Write, output: &RunOutput) -> Result<()> {
    let summary: &StatsSummary = &output.analysis.summary;
    writeln!(w, ">>Basic Statistics")?;
    writeln!(w, "#Measure\tValue")?;
    writeln!(w, "Filename\t{}", output.ctx.file_name)?;
    writeln!(w, "File type\t{}", output.ctx.format)?;
    writeln!(w, "Total Sequences\t{}", summary.total)?;
    if summary.min_length == summary.max_length {
        writeln!(w, "Sequence length\t{}", summary.min_length)?;
    } else {
        writeln!(
            w,
            "Sequence length\t{}-{}",
            summary.min_length, summary.max_length
        )?;
    }
    writeln!(w, "Average length\t{}", summary.avg_length)?;
    if let Some(gc) = summary.avg_gc {
        writeln!(w, "%GC\t{}", gc)?;
    }
    if let Some(n) = summary.avg_n {
        writeln!(w, "%N\t{}", n)?;
    }
    writeln!(w, ">>END_MODULE")?;
    Ok(())
}

fn write_histogram(
    w: &mut dyn Write,
    title: &str,
    hist: &Histogram,
    fmt_single: impl Fn(f64) -> String,
) -> Result<()> {
    writeln!(w, ">>{}", title)?;
    match hist {
        Histogram::Unavailable => writeln!(w, "#Not available")?,
        Histogram::Single(v) => {
            writeln!(w, "#Single value")?;
            writeln!(w, "{}", fmt_single(*v))?;
        }
        Histogram::Buckets(buckets) => {
            writeln!(w, "#Range\tCount")?;
            for b in buckets {
                writeln!(w, "{}\t{}", b.label, b.count)?;
            }
        }
    }
    writeln!(w, ">>END_MODULE")?;
    Ok(())
}
