use crate::core::model::{Percent, Records, Shape};
use crate::simd;

mod basic;
mod histogram;

pub use basic::StatsSummary;
pub use histogram::{Bucket, DEFAULT_BUCKETS, Domain, Histogram, MAX_BUCKETS, bucketize};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Composition {
    pub gc: f64,
    pub n: f64,
}

impl Composition {
    pub fn of(seq: &[u8]) -> Self {
        if seq.is_empty() {
            return Self::default();
        }
        let tally = simd::count_gc_n(seq);
        let len = seq.len() as f64;
        Self {
            gc: (tally.gc as f64 / len) * 100.0,
            n: (tally.n as f64 / len) * 100.0,
        }
    }
}

pub fn gc_percent(seq: &str) -> f64 {
    Composition::of(seq.as_bytes()).gc
}

pub fn n_percent(seq: &str) -> f64 {
    Composition::of(seq.as_bytes()).n
}

#[derive(Clone, Debug)]
pub struct Agg {
    pub shape: Shape,
    pub total: u64,
    pub total_bases: u64,
    pub min_len: u64,
    pub max_len: u64,
    pub gc_sum: f64,
    pub n_sum: f64,
}

impl Agg {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            total: 0,
            total_bases: 0,
            min_len: u64::MAX,
            max_len: 0,
            gc_sum: 0.0,
            n_sum: 0.0,
        }
    }

    pub fn update(&mut self, seq: &[u8]) {
        let len = seq.len() as u64;
        self.total += 1;
        self.total_bases += len;
        if len > self.max_len {
            self.max_len = len;
        }
        if len < self.min_len {
            self.min_len = len;
        }
        if self.shape == Shape::Fasta {
            let comp = Composition::of(seq);
            self.gc_sum += comp.gc;
            self.n_sum += comp.n;
        }
    }

    pub fn finalize(&self) -> StatsSummary {
        if self.total == 0 {
            return StatsSummary::default();
        }
        // Round half up in integer space.
        let avg_length = (self.total_bases + self.total / 2) / self.total;
        let (avg_gc, avg_n) = match self.shape {
            Shape::Fasta => (
                Some(Percent::round(self.gc_sum / self.total as f64)),
                Some(Percent::round(self.n_sum / self.total as f64)),
            ),
            Shape::Tabular => (None, None),
        };
        StatsSummary {
            total: self.total,
            avg_length,
            min_length: self.min_len,
            max_length: self.max_len,
            avg_gc,
            avg_n,
        }
    }
}

pub fn compute_stats(records: &Records) -> StatsSummary {
    let mut agg = Agg::new(records.shape());
    for seq in records.sequences() {
        agg.update(seq.as_bytes());
    }
    agg.finalize()
}

pub fn extract_gc_values(records: &Records) -> Vec<f64> {
    match records {
        Records::Fasta(entries) => entries.iter().map(|r| gc_percent(&r.sequence)).collect(),
        Records::Tabular(_) => Vec::new(),
    }
}

pub fn extract_lengths(records: &Records) -> Vec<u64> {
    records.sequences().map(|s| s.len() as u64).collect()
}
