use crate::core::model::FastaRecord;
use memchr::memchr_iter;
use thiserror::Error;

#[derive(Debug, Error, Eq, PartialEq)]
#[error("invalid UTF-8 in FASTA input at byte offset {byte_offset}")]
pub struct ParseError {
    pub byte_offset: usize,
}

/// Parses FASTA text into header/sequence pairs.
///
/// Sequence lines are trimmed and concatenated. Lines before the first
/// `>` header carry no record and are dropped. A `>` line with nothing after
/// it still starts a record, with an empty header.
pub fn parse(data: &[u8]) -> Result<Vec<FastaRecord>, ParseError> {
    let mut records = Vec::new();
    let mut current: Option<FastaRecord> = None;
    let mut start = 0usize;

    for end in memchr_iter(b'\n', data).chain(std::iter::once(data.len())) {
        let raw = &data[start..end];
        let line = std::str::from_utf8(raw).map_err(|e| ParseError {
            byte_offset: start + e.valid_up_to(),
        })?;
        start = end + 1;

        if let Some(header) = line.strip_prefix('>') {
            if let Some(done) = current.take() {
                records.push(done);
            }
            current = Some(FastaRecord::new(header.trim(), String::new()));
        } else if let Some(record) = current.as_mut() {
            record.sequence.push_str(line.trim());
        }
    }

    records.extend(current);
    Ok(records)
}
