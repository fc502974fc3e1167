use crate::core::model::Percent;

/// Aggregate statistics for one batch of records.
///
/// `avg_gc` and `avg_n` are only computed for FASTA input; `None` means
/// "not computed", which is different from a computed zero.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StatsSummary {
    pub total: u64,
    pub avg_length: u64,
    pub min_length: u64,
    pub max_length: u64,
    pub avg_gc: Option<Percent>,
    pub avg_n: Option<Percent>,
}
