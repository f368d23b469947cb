//! Normalisation of imported rows into typed order lines.
//!
//! Column names vary between spreadsheets, so each logical field accepts a
//! list of aliases. Header matching ignores case and surrounding whitespace,
//! and the first alias with a non-empty value wins.

use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, info};

use crate::order::{
    OrderKind, OrderLine, PurchaseLine, ReceiptSlot, TransferLine, PURCHASE_LEAD_TIME_DAYS,
    TRANSFER_LEAD_TIME_DAYS,
};
use crate::table::Row;
use crate::traits::ProductLookup;

const CODE: &[&str] = &["codigo", "codigo_produto", "codigo do item"];
const CLASS: &[&str] = &["classe", "abc"];
const QUANTITY: &[&str] = &["quantidade", "qtd", "qtde"];
const LEAD_TIME: &[&str] = &["prazologisticodias", "prazo", "leadtime"];
const SUPPLIER: &[&str] = &["fornecedor"];
const LOCATION: &[&str] = &["local"];
const UNIT_PRICE: &[&str] = &["valorunit", "valor_unit", "preco", "precounit", "valor"];
const ORIGIN: &[&str] = &["origem", "centro_origem"];
const DESTINATION: &[&str] = &["destino", "centro_destino"];
const SCHEDULE_RECEIPT: &[&str] = &["agendarrecebimento", "agendar"];
const PRIORITIZE_ROUTE: &[&str] = &["priorizarrota", "priorizarrotamaisrapida", "priorizar"];
const RECEIPT_DATE: &[&str] = &["datareceb", "data_receb"];
const RECEIPT_TIME: &[&str] = &["horareceb", "hora_receb"];

/// Builds the replacement line set for an order of `kind` from `rows`.
///
/// Rows without a product code are dropped. Bad numbers fall back to
/// defaults instead of failing the import. An empty result means nothing
/// usable was found; callers should keep their current lines in that case.
pub fn import_rows<L: ProductLookup + ?Sized>(
    rows: &[Row],
    kind: OrderKind,
    lookup: &L,
) -> Vec<OrderLine> {
    let lines: Vec<OrderLine> = rows
        .iter()
        .enumerate()
        .filter_map(|(index, row)| {
            let line = import_row(row, kind, lookup);
            if line.is_none() {
                debug!(row = index + 1, "skipping row without product code");
            }
            line
        })
        .collect();

    info!(rows = rows.len(), lines = lines.len(), ?kind, "normalised imported rows");
    lines
}

fn import_row<L: ProductLookup + ?Sized>(
    row: &Row,
    kind: OrderKind,
    lookup: &L,
) -> Option<OrderLine> {
    let fields = Fields::new(row);
    let code = fields.get(CODE)?.to_string();
    let entry = lookup.entry(&code);

    let class = fields
        .get(CLASS)
        .map(str::to_string)
        .or_else(|| entry.map(|entry| entry.class.clone()));
    let quantity = parse_quantity(fields.get(QUANTITY));

    let line = match kind {
        OrderKind::Purchase => OrderLine::Purchase(PurchaseLine {
            class,
            description: entry.and_then(|entry| entry.description.clone()),
            quantity,
            supplier: fields.text(SUPPLIER),
            location: fields.text(LOCATION),
            lead_time_days: parse_lead_time(fields.get(LEAD_TIME), PURCHASE_LEAD_TIME_DAYS),
            unit_price: parse_price(fields.get(UNIT_PRICE))
                .or_else(|| entry.and_then(|entry| entry.reference_price)),
            code,
        }),
        OrderKind::Transfer => {
            let receipt = parse_flag(fields.get(SCHEDULE_RECEIPT)).then(|| ReceiptSlot {
                date: fields
                    .get(RECEIPT_DATE)
                    .and_then(|value| NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()),
                time: fields
                    .get(RECEIPT_TIME)
                    .and_then(|value| NaiveTime::parse_from_str(value, "%H:%M").ok()),
            });
            OrderLine::Transfer(TransferLine {
                class,
                quantity,
                origin: fields.text(ORIGIN),
                destination: fields.text(DESTINATION),
                lead_time_days: parse_lead_time(fields.get(LEAD_TIME), TRANSFER_LEAD_TIME_DAYS),
                receipt,
                prioritize_fastest_route: parse_flag(fields.get(PRIORITIZE_ROUTE)),
                code,
            })
        }
    };
    Some(line)
}

/// Case-insensitive view over a row.
struct Fields<'a> {
    cells: Vec<(String, &'a str)>,
}

impl<'a> Fields<'a> {
    fn new(row: &'a Row) -> Self {
        Self {
            cells: row
                .iter()
                .map(|(name, value)| (name.trim().to_lowercase(), value.trim()))
                .collect(),
        }
    }

    /// First non-empty value among `aliases`, in alias order.
    fn get(&self, aliases: &[&str]) -> Option<&'a str> {
        aliases.iter().find_map(|alias| {
            self.cells
                .iter()
                .find(|(name, value)| name == alias && !value.is_empty())
                .map(|(_, value)| *value)
        })
    }

    fn text(&self, aliases: &[&str]) -> String {
        self.get(aliases).unwrap_or_default().to_string()
    }
}

fn parse_number(value: Option<&str>) -> Option<f64> {
    value
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|number| number.is_finite())
}

/// Positive integer, 1 when missing or not a positive number.
fn parse_quantity(value: Option<&str>) -> u32 {
    match parse_number(value) {
        Some(number) if number >= 1.0 => number.round().min(f64::from(u32::MAX)) as u32,
        _ => 1,
    }
}

fn parse_lead_time(value: Option<&str>, default: u32) -> u32 {
    match parse_number(value) {
        Some(number) if number >= 0.0 => number.round().min(f64::from(u32::MAX)) as u32,
        _ => default,
    }
}

/// Strictly positive prices only.
fn parse_price(value: Option<&str>) -> Option<f64> {
    parse_number(value).filter(|price| *price > 0.0)
}

fn parse_flag(value: Option<&str>) -> bool {
    value.is_some_and(|value| value.eq_ignore_ascii_case("true"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductCatalog;

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn test_rows_without_code_are_skipped() {
        let rows = vec![
            row(&[("codigo", ""), ("qtd", "3")]),
            row(&[("qtd", "3")]),
            row(&[("codigo", "A-1")]),
        ];
        let lines = import_rows(&rows, OrderKind::Purchase, &ProductCatalog::default());
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].code(), "A-1");
    }

    #[test]
    fn test_header_case_and_alias() {
        let rows = vec![row(&[("Codigo", "A-1"), ("QTD", "4")]), row(&[("codigo do item", "B-2")])];
        let lines = import_rows(&rows, OrderKind::Purchase, &ProductCatalog::default());
        assert_eq!(lines[0].code(), "A-1");
        assert_eq!(lines[0].quantity(), 4);
        assert_eq!(lines[1].code(), "B-2");
    }

    #[test]
    fn test_quantity_coercion() {
        assert_eq!(parse_quantity(None), 1);
        assert_eq!(parse_quantity(Some("abc")), 1);
        assert_eq!(parse_quantity(Some("0")), 1);
        assert_eq!(parse_quantity(Some("-4")), 1);
        assert_eq!(parse_quantity(Some("NaN")), 1);
        assert_eq!(parse_quantity(Some("12")), 12);
        assert_eq!(parse_quantity(Some("2.6")), 3);
    }

    #[test]
    fn test_lead_time_coercion() {
        assert_eq!(parse_lead_time(None, 7), 7);
        assert_eq!(parse_lead_time(Some("x"), 5), 5);
        assert_eq!(parse_lead_time(Some("-2"), 5), 5);
        assert_eq!(parse_lead_time(Some("0"), 5), 0);
        assert_eq!(parse_lead_time(Some("10"), 5), 10);
    }

    #[test]
    fn test_purchase_fields_and_price_fallback() {
        let catalog = ProductCatalog::demo();
        let rows = vec![
            row(&[
                ("codigo", "ROXR-033849"),
                ("fornecedor", "TechNord"),
                ("local", "D1"),
                ("preco", "0"),
            ]),
            row(&[("codigo", "ROXR-033849"), ("valor_unit", "99.9"), ("prazo", "3")]),
        ];
        let lines = import_rows(&rows, OrderKind::Purchase, &catalog);
        match (&lines[0], &lines[1]) {
            (OrderLine::Purchase(first), OrderLine::Purchase(second)) => {
                assert_eq!(first.supplier, "TechNord");
                assert_eq!(first.location, "D1");
                assert_eq!(first.unit_price, Some(120.0));
                assert_eq!(first.lead_time_days, 7);
                assert_eq!(first.class.as_deref(), Some("C"));
                assert_eq!(first.description.as_deref(), Some("Peça ROXR-033849"));
                assert_eq!(second.unit_price, Some(99.9));
                assert_eq!(second.lead_time_days, 3);
            }
            _ => panic!("expected purchase lines"),
        }
    }

    #[test]
    fn test_explicit_class_wins() {
        let catalog = ProductCatalog::demo();
        let rows = vec![row(&[("codigo", "ROXR-033849"), ("ABC", "A")])];
        let lines = import_rows(&rows, OrderKind::Purchase, &catalog);
        assert_eq!(lines[0].class(), Some("A"));
    }

    #[test]
    fn test_transfer_fields() {
        let rows = vec![
            row(&[
                ("codigo", "X"),
                ("centro_origem", "CD Recife"),
                ("destino", "CD Salvador"),
                ("agendar", "TRUE"),
                ("dataReceb", "2025-03-04"),
                ("hora_receb", "14:30"),
                ("priorizar", "yes"),
            ]),
            row(&[
                ("codigo", "Y"),
                ("agendarRecebimento", "false"),
                ("data_receb", "2025-03-04"),
                ("priorizarRota", "True"),
            ]),
        ];
        let lines = import_rows(&rows, OrderKind::Transfer, &ProductCatalog::default());
        match (&lines[0], &lines[1]) {
            (OrderLine::Transfer(first), OrderLine::Transfer(second)) => {
                assert_eq!(first.origin, "CD Recife");
                assert_eq!(first.destination, "CD Salvador");
                assert_eq!(first.lead_time_days, 5);
                let receipt = first.receipt.expect("receipt scheduled");
                assert_eq!(receipt.date, NaiveDate::from_ymd_opt(2025, 3, 4));
                assert_eq!(receipt.time, NaiveTime::from_hms_opt(14, 30, 0));
                assert!(!first.prioritize_fastest_route);

                assert!(second.receipt.is_none());
                assert!(second.prioritize_fastest_route);
            }
            _ => panic!("expected transfer lines"),
        }
    }

    #[test]
    fn test_first_non_empty_alias_wins() {
        let rows = vec![row(&[("codigo", "X"), ("quantidade", ""), ("qtde", "6")])];
        let lines = import_rows(&rows, OrderKind::Transfer, &ProductCatalog::default());
        assert_eq!(lines[0].quantity(), 6);
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        assert!(import_rows(&[], OrderKind::Purchase, &ProductCatalog::demo()).is_empty());
    }
}
