use crate::core::model::TabularRecord;
use anyhow::{Context, Result};
use csv::ReaderBuilder;

pub fn parse(data: &[u8], delimiter: u8) -> Result<Vec<TabularRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(data);

    let headers = reader
        .headers()
        .with_context(|| "failed to read header row")?
        .clone();

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.with_context(|| format!("malformed row after record {}", records.len()))?;
        let mut record = TabularRecord::with_capacity(headers.len());
        for (column, value) in headers.iter().zip(row.iter()) {
            record.push(column, value);
        }
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_rows_keep_column_order() {
        let data = b"sequence,id\nACGT,r1\n\nACGTACGT,r2\n";
        let records = parse(data, b',').unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].first_value(), "ACGT");
        assert_eq!(records[1].first_value(), "ACGTACGT");
        let columns: Vec<&str> = records[0].iter().map(|(k, _)| k).collect();
        assert_eq!(columns, vec!["sequence", "id"]);
        assert_eq!(records[1].get("id"), Some("r2"));
    }

    #[test]
    fn tsv_and_quoted_fields() {
        let data = b"seq\tnote\nGGCC\t\"a, b\"\n";
        let records = parse(data, b'\t').unwrap();
        assert_eq!(records[0].get("note"), Some("a, b"));
        assert_eq!(records[0].first_value(), "GGCC");
    }

    #[test]
    fn short_rows_are_allowed() {
        let records = parse(b"seq,id\nAC\n", b',').unwrap();
        assert_eq!(records[0].len(), 1);
        assert_eq!(records[0].get("id"), None);
    }

    #[test]
    fn header_only_and_empty_input() {
        assert!(parse(b"seq,id\n", b',').unwrap().is_empty());
        assert!(parse(b"", b',').unwrap().is_empty());
    }
}
