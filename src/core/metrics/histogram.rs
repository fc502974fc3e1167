pub const DEFAULT_BUCKETS: usize = 10;
pub const MAX_BUCKETS: usize = 1000;

const PERCENT_MAX: f64 = 100.0;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Domain {
    // [0, max], whole-number width
    DataMax,
    // [0, 100], exact width
    Percent,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Bucket {
    pub label: String,
    pub count: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Histogram {
    Unavailable,
    Single(f64),
    Buckets(Vec<Bucket>),
}

impl Histogram {
    pub fn buckets(&self) -> &[Bucket] {
        match self {
            Histogram::Buckets(b) => b,
            _ => &[],
        }
    }

    pub fn total(&self) -> u64 {
        self.buckets().iter().map(|b| b.count).sum()
    }
}

/// Splits `values` into `bucket_count` equal-width buckets starting at zero.
///
/// Buckets are half-open `[start, end)` except the last one, which is closed
/// so a value equal to the domain maximum is still counted. A bucket count of
/// zero is treated as one.
pub fn bucketize(values: &[f64], bucket_count: usize, domain: Domain) -> Histogram {
    match values {
        [] => return Histogram::Unavailable,
        [v] => return Histogram::Single(*v),
        _ => {}
    }

    let bucket_count = bucket_count.max(1);
    let size = match domain {
        Domain::DataMax => {
            let max = values.iter().copied().fold(0.0f64, f64::max);
            (max / bucket_count as f64).ceil()
        }
        Domain::Percent => PERCENT_MAX / bucket_count as f64,
    };
    let upper = match domain {
        Domain::DataMax => size * bucket_count as f64,
        Domain::Percent => PERCENT_MAX,
    };

    let mut counts = vec![0u64; bucket_count];
    for &v in values {
        // NaN fails both comparisons.
        if !(v >= 0.0 && v <= upper) {
            continue;
        }
        counts[bucket_index(v, size, bucket_count)] += 1;
    }

    let buckets = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let start = i as f64 * size;
            let end = start + size;
            let label = match domain {
                Domain::DataMax => format!("{}-{}", fmt_bound(start), fmt_bound(end)),
                Domain::Percent => format!("{}-{}%", fmt_bound(start), fmt_bound(end)),
            };
            Bucket { label, count }
        })
        .collect();
    Histogram::Buckets(buckets)
}

fn bucket_index(v: f64, size: f64, bucket_count: usize) -> usize {
    let last = bucket_count - 1;
    if size <= 0.0 {
        return last;
    }
    let mut idx = ((v / size).floor() as usize).min(last);
    // Settle rounding noise against the same `i * size` bounds used for labels.
    while idx > 0 && v < idx as f64 * size {
        idx -= 1;
    }
    while idx < last && v >= (idx + 1) as f64 * size {
        idx += 1;
    }
    idx
}

fn fmt_bound(v: f64) -> String {
    format!("{}", v.round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(h: &Histogram) -> Vec<u64> {
        h.buckets().iter().map(|b| b.count).collect()
    }

    fn labels(h: &Histogram) -> Vec<&str> {
        h.buckets().iter().map(|b| b.label.as_str()).collect()
    }

    #[test]
    fn no_values_is_unavailable() {
        assert_eq!(bucketize(&[], 10, Domain::Percent), Histogram::Unavailable);
        assert_eq!(bucketize(&[], 10, Domain::DataMax), Histogram::Unavailable);
    }

    #[test]
    fn one_value_is_single() {
        assert_eq!(bucketize(&[42.0], 10, Domain::DataMax), Histogram::Single(42.0));
    }

    #[test]
    fn evenly_spread_gc_fills_every_bucket() {
        let values: Vec<f64> = (0..10).map(|i| 5.0 + 10.0 * i as f64).collect();
        let h = bucketize(&values, 10, Domain::Percent);
        assert_eq!(counts(&h), vec![1; 10]);
        assert_eq!(
            labels(&h),
            vec![
                "0-10%", "10-20%", "20-30%", "30-40%", "40-50%", "50-60%", "60-70%", "70-80%",
                "80-90%", "90-100%"
            ]
        );
    }

    #[test]
    fn gc_of_100_lands_in_last_bucket() {
        let h = bucketize(&[0.0, 100.0, 50.0], 10, Domain::Percent);
        assert_eq!(counts(&h), vec![1, 0, 0, 0, 0, 1, 0, 0, 0, 1]);
        assert_eq!(h.total(), 3);
    }

    #[test]
    fn length_max_on_boundary_is_counted() {
        let h = bucketize(&[50.0, 100.0], 10, Domain::DataMax);
        assert_eq!(h.buckets().len(), 10);
        assert_eq!(h.buckets()[5].count, 1);
        assert_eq!(h.buckets()[9].count, 1);
        assert_eq!(h.buckets()[9].label, "90-100");
        assert_eq!(h.total(), 2);
    }

    #[test]
    fn length_width_rounds_up() {
        let h = bucketize(&[4.0, 8.0], 10, Domain::DataMax);
        assert_eq!(labels(&h)[0], "0-1");
        assert_eq!(labels(&h)[9], "9-10");
        assert_eq!(counts(&h), vec![0, 0, 0, 0, 1, 0, 0, 0, 1, 0]);

        let h = bucketize(&[1.0, 95.0], 10, Domain::DataMax);
        assert_eq!(labels(&h)[0], "0-10");
        assert_eq!(labels(&h)[9], "90-100");
        assert_eq!(counts(&h), vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn all_zero_lengths_go_to_last_bucket() {
        let h = bucketize(&[0.0, 0.0, 0.0], 10, Domain::DataMax);
        assert_eq!(h.buckets().len(), 10);
        assert_eq!(h.buckets()[9].count, 3);
        assert_eq!(h.total(), 3);
        assert!(h.buckets().iter().all(|b| b.label == "0-0"));
    }

    #[test]
    fn out_of_domain_values_are_skipped() {
        let h = bucketize(&[-1.0, f64::NAN, 10.0, 101.0], 10, Domain::Percent);
        assert_eq!(h.total(), 1);
    }

    #[test]
    fn zero_bucket_count_means_one_bucket() {
        let h = bucketize(&[3.0, 7.0], 0, Domain::DataMax);
        assert_eq!(h.buckets().len(), 1);
        assert_eq!(h.buckets()[0].label, "0-7");
        assert_eq!(h.total(), 2);
    }

    #[test]
    fn uneven_percent_width_keeps_every_value() {
        let values: Vec<f64> = (0..=300).map(|i| i as f64 / 3.0).collect();
        let h = bucketize(&values, 3, Domain::Percent);
        assert_eq!(labels(&h), vec!["0-33%", "33-67%", "67-100%"]);
        assert_eq!(h.total(), values.len() as u64);
    }
}
