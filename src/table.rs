//! Delimited-text parsing for order imports.
//!
//! The format is deliberately simple: the delimiter is `;` when the header
//! line has a `;` and no `,`, otherwise `,`. Quotes carry no meaning.

use std::collections::HashMap;

use tracing::warn;

/// One imported record keyed by its (trimmed) header names.
pub type Row = HashMap<String, String>;

/// Picks the delimiter from the header line.
pub fn detect_delimiter(header: &str) -> u8 {
    if header.contains(';') && !header.contains(',') {
        b';'
    } else {
        b','
    }
}

/// Parses `text` into header-keyed rows.
///
/// Blank lines are skipped, cells are trimmed, short records are padded with
/// empty strings and cells beyond the header are dropped. When a header name
/// repeats, the rightmost column wins.
pub fn parse_delimited(text: &str) -> Vec<Row> {
    let Some(header) = text
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .find(|line| !line.is_empty())
    else {
        return Vec::new();
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(detect_delimiter(header))
        .quoting(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .has_headers(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = match reader.headers() {
        Ok(headers) => headers.iter().map(str::to_string).collect(),
        Err(err) => {
            warn!(error = %err, "unreadable header row");
            return Vec::new();
        }
    };

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                warn!(error = %err, record = index + 1, "skipping unreadable record");
                continue;
            }
        };
        let row = headers
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), record.get(i).unwrap_or_default().to_string()))
            .collect();
        rows.push(row);
    }
    rows
}
