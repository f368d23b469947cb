//! Test fixtures for stock-planner.
//!
//! Provides:
//! - Reference coordinates inside and outside the Brazil outline
//! - Small polygons for membership tests
//! - Delimited import samples and history data builders

#![allow(dead_code)]

pub mod brazil_locations;

pub use brazil_locations::*;

use chrono::{DateTime, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;

use stock_planner::geo::Boundary;

/// The 0..10 square.
pub fn unit_square() -> Boundary {
    Boundary::single(vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)])
}

/// A boundary far too small to ever be hit by uniform draws.
pub fn pinhole() -> Boundary {
    Boundary::single(vec![(0.0, 0.0), (1e-9, 0.0), (1e-9, 1e-9), (0.0, 1e-9)])
}

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
}

/// Builder for delimited import text.
#[derive(Debug, Clone)]
pub struct ImportSheet {
    separator: char,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ImportSheet {
    pub fn new(separator: char, headers: &[&str]) -> Self {
        Self {
            separator,
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row(mut self, cells: &[&str]) -> Self {
        self.rows.push(cells.iter().map(|c| c.to_string()).collect());
        self
    }

    pub fn build(&self) -> String {
        let sep = self.separator.to_string();
        let mut out = self.headers.join(&sep);
        for row in &self.rows {
            out.push('\n');
            out.push_str(&row.join(&sep));
        }
        out.push('\n');
        out
    }
}

/// Purchase sheet with two demo codes.
pub fn purchase_sheet(separator: char) -> String {
    ImportSheet::new(separator, &["codigo", "quantidade", "fornecedor", "valorUnit"])
        .row(&["ROXR-033849", "2", "PrimeParts", "100"])
        .row(&["VEIF-010806", "3", "BetaLog", ""])
        .build()
}

/// Transfer sheet exercising the receipt scheduling columns.
pub fn transfer_sheet() -> String {
    ImportSheet::new(
        ';',
        &[
            "Codigo", "Qtd", "Origem", "Destino", "Prazo", "Agendar", "DataReceb", "HoraReceb",
            "Priorizar",
        ],
    )
    .row(&[
        "AARO-020619", "4", "CD Recife", "CD Salvador", "3", "TRUE", "2025-07-01", "08:30", "true",
    ])
    .row(&[
        "QOER-084064", "0", "CD Curitiba", "CD São Paulo", "", "false", "2025-07-02", "09:00", "no",
    ])
    .build()
}
