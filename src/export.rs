//! `;`-separated export of history and alert tables.
//!
//! Fields containing `;`, `"`, a newline or `,` are wrapped in double quotes
//! with inner quotes doubled.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

const SEPARATOR: char = ';';

/// Which history table an export belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportKind {
    Contracts,
    Orders,
    Alerts,
    /// One alert from its detail view; see [`single_alert_file_name`].
    SingleAlert,
}

impl ExportKind {
    pub fn file_name(self) -> &'static str {
        match self {
            ExportKind::Contracts => "historico_contratos.csv",
            ExportKind::Orders => "historico_ordens.csv",
            ExportKind::Alerts => "historico_alertas.csv",
            ExportKind::SingleAlert => "alerta.csv",
        }
    }
}

/// `alerta_{code}.csv`, the download name of a single alert.
pub fn single_alert_file_name(code: &str) -> String {
    format!("alerta_{code}.csv")
}

/// A header row plus body rows, ready to encode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportTable {
    pub kind: ExportKind,
    pub file_name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ExportTable {
    pub fn new(kind: ExportKind, headers: &[&str]) -> Self {
        Self {
            kind,
            file_name: kind.file_name().to_string(),
            headers: headers.iter().map(|header| header.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Replaces the kind's default download name.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Encoded file contents.
    pub fn to_delimited(&self) -> String {
        to_delimited(&self.headers, &self.rows)
    }
}

/// Joins `headers` and `rows` into one `;`-separated document.
///
/// Headers are written verbatim; row fields are escaped.
pub fn to_delimited<H: AsRef<str>, F: AsRef<str>>(headers: &[H], rows: &[Vec<F>]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        headers
            .iter()
            .map(|header| header.as_ref())
            .collect::<Vec<&str>>()
            .join(&SEPARATOR.to_string()),
    );
    for row in rows {
        lines.push(
            row.iter()
                .map(|field| escape_field(field.as_ref()))
                .collect::<Vec<_>>()
                .join(&SEPARATOR.to_string()),
        );
    }
    lines.join("\n")
}

pub fn escape_field(value: &str) -> String {
    if value.contains([SEPARATOR, '"', '\n', ',']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Brazilian real, e.g. `R$ 1.234,56`.
pub fn format_brl(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}R$ {},{:02}", group_thousands(cents / 100), cents % 100)
}

/// Brazilian real rounded to whole reais, e.g. `R$ 280.000`.
pub fn format_brl_whole(value: f64) -> String {
    let whole = value.abs().round() as u64;
    let sign = if value < 0.0 && whole > 0 { "-" } else { "" };
    format!("{sign}R$ {}", group_thousands(whole))
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    grouped
}

/// `dd/mm/yyyy`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// `dd/mm/yyyy HH:MM`.
pub fn format_date_time(at: DateTime<Utc>) -> String {
    at.format("%d/%m/%Y %H:%M").to_string()
}
