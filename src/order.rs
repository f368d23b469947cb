//! Order lines, code-driven defaulting, kind conversion and totals.
//!
//! An order is either a purchase order or a transfer (planning) order. Lines
//! carry their kind in the type, so every consumer matches on [`OrderLine`].

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::traits::ProductLookup;

/// Lead time given to new purchase lines.
pub const PURCHASE_LEAD_TIME_DAYS: u32 = 7;

/// Lead time given to new transfer lines.
pub const TRANSFER_LEAD_TIME_DAYS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderKind {
    Purchase,
    Transfer,
}

impl OrderKind {
    pub fn default_lead_time(self) -> u32 {
        match self {
            OrderKind::Purchase => PURCHASE_LEAD_TIME_DAYS,
            OrderKind::Transfer => TRANSFER_LEAD_TIME_DAYS,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OrderKind::Purchase => "Ordem de Compra",
            OrderKind::Transfer => "Ordem de Planejamento",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseLine {
    pub code: String,
    pub class: Option<String>,
    pub description: Option<String>,
    pub quantity: u32,
    /// Empty when not chosen yet.
    pub supplier: String,
    /// Storage location; empty when not chosen yet.
    pub location: String,
    pub lead_time_days: u32,
    pub unit_price: Option<f64>,
}

impl Default for PurchaseLine {
    fn default() -> Self {
        Self {
            code: String::new(),
            class: None,
            description: None,
            quantity: 1,
            supplier: String::new(),
            location: String::new(),
            lead_time_days: PURCHASE_LEAD_TIME_DAYS,
            unit_price: None,
        }
    }
}

/// Requested receipt slot of a transfer line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptSlot {
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferLine {
    pub code: String,
    pub class: Option<String>,
    pub quantity: u32,
    /// Origin centre; empty when not chosen yet.
    pub origin: String,
    /// Destination centre; empty when not chosen yet.
    pub destination: String,
    pub lead_time_days: u32,
    /// `Some` iff the receipt is scheduled.
    pub receipt: Option<ReceiptSlot>,
    pub prioritize_fastest_route: bool,
}

impl Default for TransferLine {
    fn default() -> Self {
        Self {
            code: String::new(),
            class: None,
            quantity: 1,
            origin: String::new(),
            destination: String::new(),
            lead_time_days: TRANSFER_LEAD_TIME_DAYS,
            receipt: None,
            prioritize_fastest_route: false,
        }
    }
}

impl TransferLine {
    pub fn schedules_receipt(&self) -> bool {
        self.receipt.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OrderLine {
    Purchase(PurchaseLine),
    Transfer(TransferLine),
}

impl OrderLine {
    /// A fresh line with the defaults of `kind`.
    pub fn blank(kind: OrderKind) -> Self {
        match kind {
            OrderKind::Purchase => OrderLine::Purchase(PurchaseLine::default()),
            OrderKind::Transfer => OrderLine::Transfer(TransferLine::default()),
        }
    }

    pub fn kind(&self) -> OrderKind {
        match self {
            OrderLine::Purchase(_) => OrderKind::Purchase,
            OrderLine::Transfer(_) => OrderKind::Transfer,
        }
    }

    pub fn code(&self) -> &str {
        match self {
            OrderLine::Purchase(line) => &line.code,
            OrderLine::Transfer(line) => &line.code,
        }
    }

    pub fn class(&self) -> Option<&str> {
        match self {
            OrderLine::Purchase(line) => line.class.as_deref(),
            OrderLine::Transfer(line) => line.class.as_deref(),
        }
    }

    pub fn quantity(&self) -> u32 {
        match self {
            OrderLine::Purchase(line) => line.quantity,
            OrderLine::Transfer(line) => line.quantity,
        }
    }

    pub fn lead_time_days(&self) -> u32 {
        match self {
            OrderLine::Purchase(line) => line.lead_time_days,
            OrderLine::Transfer(line) => line.lead_time_days,
        }
    }
}

/// Values the caller sets explicitly alongside a code change.
///
/// Anything set here wins over the looked-up defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodeOverrides {
    pub class: Option<String>,
    pub description: Option<String>,
    pub unit_price: Option<f64>,
}

/// Sets the product code of `line` and refreshes the fields it drives.
///
/// Class is refreshed for both kinds; description and unit price only exist
/// on purchase lines. An unknown code clears the looked-up fields unless
/// `overrides` provides them.
pub fn apply_code<L: ProductLookup + ?Sized>(
    line: &mut OrderLine,
    code: &str,
    lookup: &L,
    overrides: &CodeOverrides,
) {
    let entry = lookup.entry(code);
    let class = overrides
        .class
        .clone()
        .or_else(|| entry.map(|entry| entry.class.clone()));

    match line {
        OrderLine::Purchase(line) => {
            line.code = code.to_string();
            line.class = class;
            line.description = overrides
                .description
                .clone()
                .or_else(|| entry.and_then(|entry| entry.description.clone()));
            line.unit_price = overrides
                .unit_price
                .or_else(|| entry.and_then(|entry| entry.reference_price));
        }
        OrderLine::Transfer(line) => {
            line.code = code.to_string();
            line.class = class;
        }
    }
}

/// Converts `line` to `to`, keeping the fields both kinds share.
///
/// Code, class, quantity and lead time carry over; fields that only exist in
/// the target kind start empty. Missing class, description and unit price are
/// filled from `lookup`. Converting to the line's own kind returns a copy.
pub fn convert<L: ProductLookup + ?Sized>(
    line: &OrderLine,
    to: OrderKind,
    lookup: &L,
) -> OrderLine {
    if line.kind() == to {
        return line.clone();
    }

    let entry = lookup.entry(line.code());
    let class = line
        .class()
        .map(str::to_string)
        .or_else(|| entry.map(|entry| entry.class.clone()));
    let quantity = line.quantity().max(1);

    match to {
        OrderKind::Purchase => OrderLine::Purchase(PurchaseLine {
            code: line.code().to_string(),
            class,
            description: entry.and_then(|entry| entry.description.clone()),
            quantity,
            supplier: String::new(),
            location: String::new(),
            lead_time_days: line.lead_time_days(),
            unit_price: entry.and_then(|entry| entry.reference_price),
        }),
        OrderKind::Transfer => OrderLine::Transfer(TransferLine {
            code: line.code().to_string(),
            class,
            quantity,
            lead_time_days: line.lead_time_days(),
            ..TransferLine::default()
        }),
    }
}

/// Sum of quantity × unit price over purchase lines. Missing prices count as
/// zero and transfer lines contribute nothing.
pub fn purchase_total(lines: &[OrderLine]) -> f64 {
    lines
        .iter()
        .map(|line| match line {
            OrderLine::Purchase(line) => f64::from(line.quantity) * line.unit_price.unwrap_or(0.0),
            OrderLine::Transfer(_) => 0.0,
        })
        .sum()
}

/// Mean lead time over all lines, rounded; 0 for no lines.
pub fn average_lead_time(lines: &[OrderLine]) -> u32 {
    if lines.is_empty() {
        return 0;
    }
    let sum: u64 = lines.iter().map(|line| u64::from(line.lead_time_days())).sum();
    (sum as f64 / lines.len() as f64).round() as u32
}

/// Headline figure of an order summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryFigure {
    EstimatedTotal(f64),
    AverageLeadTime(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrderSummary {
    pub kind: OrderKind,
    pub line_count: usize,
    pub figure: SummaryFigure,
}

/// An order being edited. Lives only as long as the editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub kind: OrderKind,
    pub created_on: Option<NaiveDate>,
    pub needed_by: Option<NaiveDate>,
    pub notes: String,
    /// Contract number the order is raised against, if any.
    pub contract: Option<String>,
    pub lines: Vec<OrderLine>,
}

impl Order {
    pub fn new(kind: OrderKind) -> Self {
        Self {
            kind,
            created_on: None,
            needed_by: None,
            notes: String::new(),
            contract: None,
            lines: Vec::new(),
        }
    }

    /// Switches the order kind, converting every line.
    pub fn set_kind<L: ProductLookup + ?Sized>(&mut self, kind: OrderKind, lookup: &L) {
        self.kind = kind;
        self.lines = self
            .lines
            .iter()
            .map(|line| convert(line, kind, lookup))
            .collect();
    }

    pub fn summary(&self) -> OrderSummary {
        let figure = match self.kind {
            OrderKind::Purchase => SummaryFigure::EstimatedTotal(purchase_total(&self.lines)),
            OrderKind::Transfer => SummaryFigure::AverageLeadTime(average_lead_time(&self.lines)),
        };
        OrderSummary {
            kind: self.kind,
            line_count: self.lines.len(),
            figure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ProductCatalog, ProductEntry};

    fn purchase(quantity: u32, unit_price: Option<f64>) -> OrderLine {
        OrderLine::Purchase(PurchaseLine {
            code: "ROXR-033849".to_string(),
            quantity,
            unit_price,
            ..PurchaseLine::default()
        })
    }

    #[test]
    fn test_blank_defaults() {
        let purchase = OrderLine::blank(OrderKind::Purchase);
        assert_eq!(purchase.quantity(), 1);
        assert_eq!(purchase.lead_time_days(), 7);
        let transfer = OrderLine::blank(OrderKind::Transfer);
        assert_eq!(transfer.lead_time_days(), 5);
        match transfer {
            OrderLine::Transfer(line) => {
                assert!(!line.schedules_receipt());
                assert!(!line.prioritize_fastest_route);
            }
            OrderLine::Purchase(_) => panic!("expected transfer line"),
        }
    }

    #[test]
    fn test_apply_code_known() {
        let catalog = ProductCatalog::demo();
        let mut line = OrderLine::blank(OrderKind::Purchase);
        apply_code(&mut line, "AARO-020619", &catalog, &CodeOverrides::default());
        match &line {
            OrderLine::Purchase(line) => {
                assert_eq!(line.code, "AARO-020619");
                assert_eq!(line.class.as_deref(), Some("C"));
                assert_eq!(line.description.as_deref(), Some("Peça AARO-020619"));
                assert_eq!(line.unit_price, Some(95.0));
            }
            OrderLine::Transfer(_) => panic!("kind changed"),
        }
    }

    #[test]
    fn test_apply_code_overrides_win() {
        let catalog = ProductCatalog::demo();
        let mut line = OrderLine::blank(OrderKind::Purchase);
        let overrides = CodeOverrides {
            class: Some("A".to_string()),
            unit_price: Some(99.5),
            ..CodeOverrides::default()
        };
        apply_code(&mut line, "AARO-020619", &catalog, &overrides);
        match &line {
            OrderLine::Purchase(line) => {
                assert_eq!(line.class.as_deref(), Some("A"));
                assert_eq!(line.unit_price, Some(99.5));
                assert_eq!(line.description.as_deref(), Some("Peça AARO-020619"));
            }
            OrderLine::Transfer(_) => panic!("kind changed"),
        }
    }

    #[test]
    fn test_apply_code_unknown_clears_lookup_fields() {
        let catalog = ProductCatalog::demo();
        let mut line = OrderLine::blank(OrderKind::Purchase);
        apply_code(&mut line, "AARO-020619", &catalog, &CodeOverrides::default());
        apply_code(&mut line, "UNKNOWN", &catalog, &CodeOverrides::default());
        match &line {
            OrderLine::Purchase(line) => {
                assert_eq!(line.code, "UNKNOWN");
                assert_eq!(line.class, None);
                assert_eq!(line.description, None);
                assert_eq!(line.unit_price, None);
            }
            OrderLine::Transfer(_) => panic!("kind changed"),
        }
    }

    #[test]
    fn test_apply_code_transfer_sets_class_only() {
        let catalog = ProductCatalog::new([ProductEntry::new("X-1", "B").with_price(3.0)]);
        let mut line = OrderLine::blank(OrderKind::Transfer);
        apply_code(&mut line, "X-1", &catalog, &CodeOverrides::default());
        assert_eq!(line.code(), "X-1");
        assert_eq!(line.class(), Some("B"));
    }

    #[test]
    fn test_convert_purchase_to_transfer() {
        let catalog = ProductCatalog::demo();
        let line = OrderLine::Purchase(PurchaseLine {
            code: "VEIF-010806".to_string(),
            class: Some("A".to_string()),
            quantity: 12,
            supplier: "TechNord".to_string(),
            lead_time_days: 9,
            unit_price: Some(1.0),
            ..PurchaseLine::default()
        });
        let converted = convert(&line, OrderKind::Transfer, &catalog);
        match converted {
            OrderLine::Transfer(line) => {
                assert_eq!(line.code, "VEIF-010806");
                assert_eq!(line.class.as_deref(), Some("A"));
                assert_eq!(line.quantity, 12);
                assert_eq!(line.lead_time_days, 9);
                assert!(line.origin.is_empty());
                assert!(line.destination.is_empty());
                assert!(line.receipt.is_none());
                assert!(!line.prioritize_fastest_route);
            }
            OrderLine::Purchase(_) => panic!("expected transfer line"),
        }
    }

    #[test]
    fn test_convert_transfer_to_purchase_uses_lookup() {
        let catalog = ProductCatalog::demo();
        let line = OrderLine::Transfer(TransferLine {
            code: "QOER-084064".to_string(),
            quantity: 4,
            origin: "CD Recife".to_string(),
            ..TransferLine::default()
        });
        match convert(&line, OrderKind::Purchase, &catalog) {
            OrderLine::Purchase(line) => {
                assert_eq!(line.class.as_deref(), Some("C"));
                assert_eq!(line.description.as_deref(), Some("Peça QOER-084064"));
                assert_eq!(line.unit_price, Some(132.0));
                assert_eq!(line.quantity, 4);
                assert_eq!(line.lead_time_days, 5);
                assert!(line.supplier.is_empty());
            }
            OrderLine::Transfer(_) => panic!("expected purchase line"),
        }
    }

    #[test]
    fn test_convert_same_kind_is_identity() {
        let catalog = ProductCatalog::demo();
        let line = OrderLine::Purchase(PurchaseLine {
            supplier: "AlphaTel".to_string(),
            ..PurchaseLine::default()
        });
        assert_eq!(convert(&line, OrderKind::Purchase, &catalog), line);
    }

    #[test]
    fn test_convert_zero_quantity_becomes_one() {
        let catalog = ProductCatalog::default();
        let line = purchase(0, None);
        assert_eq!(convert(&line, OrderKind::Transfer, &catalog).quantity(), 1);
    }

    #[test]
    fn test_purchase_total() {
        let lines = vec![purchase(2, Some(10.0)), purchase(3, Some(0.0))];
        assert_eq!(purchase_total(&lines), 20.0);
    }

    #[test]
    fn test_purchase_total_ignores_transfer_and_missing_price() {
        let lines = vec![
            purchase(2, Some(10.0)),
            purchase(5, None),
            OrderLine::Transfer(TransferLine {
                quantity: 100,
                ..TransferLine::default()
            }),
        ];
        assert_eq!(purchase_total(&lines), 20.0);
    }

    #[test]
    fn test_average_lead_time() {
        assert_eq!(average_lead_time(&[]), 0);
        let lines = vec![
            OrderLine::blank(OrderKind::Purchase),
            OrderLine::blank(OrderKind::Transfer),
        ];
        // (7 + 5) / 2
        assert_eq!(average_lead_time(&lines), 6);
        let lines = vec![
            OrderLine::blank(OrderKind::Purchase),
            OrderLine::blank(OrderKind::Purchase),
            OrderLine::blank(OrderKind::Transfer),
        ];
        // 19 / 3 = 6.33
        assert_eq!(average_lead_time(&lines), 6);
    }

    #[test]
    fn test_order_set_kind_converts_lines() {
        let catalog = ProductCatalog::demo();
        let mut order = Order::new(OrderKind::Purchase);
        order.lines = vec![purchase(3, Some(5.0)), purchase(1, None)];
        order.set_kind(OrderKind::Transfer, &catalog);
        assert!(order.lines.iter().all(|line| line.kind() == OrderKind::Transfer));
        assert_eq!(order.lines[0].quantity(), 3);
    }

    #[test]
    fn test_order_summary() {
        let mut order = Order::new(OrderKind::Purchase);
        order.lines = vec![purchase(2, Some(10.0))];
        let summary = order.summary();
        assert_eq!(summary.line_count, 1);
        assert_eq!(summary.figure, SummaryFigure::EstimatedTotal(20.0));

        let transfer = Order::new(OrderKind::Transfer);
        assert_eq!(transfer.summary().figure, SummaryFigure::AverageLeadTime(0));
    }

    #[test]
    fn test_line_serde_tag() {
        let json = serde_json::to_value(OrderLine::blank(OrderKind::Transfer)).unwrap();
        assert_eq!(json["kind"], "transfer");
        assert_eq!(json["lead_time_days"], 5);
    }
}
