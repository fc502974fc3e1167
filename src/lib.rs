//! Sequence statistics for FASTA and tabular input: counts, length and GC
//! summaries, N content, and fixed-width histograms of lengths and GC.

pub mod core;
pub mod report;
mod simd;
