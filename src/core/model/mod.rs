use std::fmt;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Shape {
    Fasta,
    Tabular,
}

impl Shape {
    pub fn as_str(self) -> &'static str {
        match self {
            Shape::Fasta => "FASTA",
            Shape::Tabular => "tabular",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FastaRecord {
    pub header: String,
    pub sequence: String,
}

impl FastaRecord {
    pub fn new(header: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            sequence: sequence.into(),
        }
    }
}

/// One row of tabular input. Column order is the order of the header row;
/// the sequence is whatever sits in the first column.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TabularRecord {
    fields: Vec<(String, String)>,
}

impl TabularRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(columns: usize) -> Self {
        Self {
            fields: Vec::with_capacity(columns),
        }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn push(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.push((column.into(), value.into()));
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == column)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn first_value(&self) -> &str {
        self.fields.first().map(|(_, v)| v.as_str()).unwrap_or("")
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Record {
    Fasta(FastaRecord),
    Tabular(TabularRecord),
}

impl Record {
    pub fn shape(&self) -> Shape {
        match self {
            Record::Fasta(_) => Shape::Fasta,
            Record::Tabular(_) => Shape::Tabular,
        }
    }

    pub fn sequence(&self) -> &str {
        match self {
            Record::Fasta(r) => &r.sequence,
            Record::Tabular(r) => r.first_value(),
        }
    }
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ShapeError {
    #[error("record {index} is {found}-shaped but the collection is {expected}-shaped")]
    MixedShape {
        index: usize,
        expected: Shape,
        found: Shape,
    },
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Records {
    Fasta(Vec<FastaRecord>),
    Tabular(Vec<TabularRecord>),
}

impl Default for Records {
    fn default() -> Self {
        Records::Tabular(Vec::new())
    }
}

impl Records {
    /// Builds a collection whose shape is taken from the first record.
    /// Any later record of the other shape is rejected.
    pub fn from_records(records: Vec<Record>) -> Result<Self, ShapeError> {
        let expected = match records.first() {
            Some(r) => r.shape(),
            None => return Ok(Records::default()),
        };
        match expected {
            Shape::Fasta => {
                let mut out = Vec::with_capacity(records.len());
                for (index, record) in records.into_iter().enumerate() {
                    match record {
                        Record::Fasta(r) => out.push(r),
                        Record::Tabular(_) => {
                            return Err(ShapeError::MixedShape {
                                index,
                                expected,
                                found: Shape::Tabular,
                            });
                        }
                    }
                }
                Ok(Records::Fasta(out))
            }
            Shape::Tabular => {
                let mut out = Vec::with_capacity(records.len());
                for (index, record) in records.into_iter().enumerate() {
                    match record {
                        Record::Tabular(r) => out.push(r),
                        Record::Fasta(_) => {
                            return Err(ShapeError::MixedShape {
                                index,
                                expected,
                                found: Shape::Fasta,
                            });
                        }
                    }
                }
                Ok(Records::Tabular(out))
            }
        }
    }

    pub fn shape(&self) -> Shape {
        match self {
            Records::Fasta(_) => Shape::Fasta,
            Records::Tabular(_) => Shape::Tabular,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Records::Fasta(r) => r.len(),
            Records::Tabular(r) => r.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn sequences(&self) -> impl Iterator<Item = &str> + '_ {
        let (fasta, tabular): (&[FastaRecord], &[TabularRecord]) = match self {
            Records::Fasta(r) => (r.as_slice(), &[]),
            Records::Tabular(r) => (&[], r.as_slice()),
        };
        fasta
            .iter()
            .map(|r| r.sequence.as_str())
            .chain(tabular.iter().map(TabularRecord::first_value))
    }
}

/// A percentage held as a whole number of hundredths, so it always prints
/// with exactly two decimals.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Percent(u32);

impl Percent {
    pub const ZERO: Percent = Percent(0);

    pub fn from_hundredths(hundredths: u32) -> Self {
        Percent(hundredths)
    }

    /// Rounds to two decimals, ties away from zero. The cast saturates, so
    /// negative and NaN inputs become zero.
    pub fn round(value: f64) -> Self {
        Percent((value * 100.0).round() as u32)
    }

    pub fn hundredths(self) -> u32 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}
