//! Historical records browser: contracts, orders and alerts.
//!
//! All three tabs share a text query and an inclusive date range; each has
//! its own status filter. Filtered records feed the export tables.

use chrono::{DateTime, Duration, Months, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::alerts::{Alert, Criticality, DISTRIBUTION_CENTERS};
use crate::export::{
    format_brl, format_date, format_date_time, single_alert_file_name, ExportKind, ExportTable,
};
use crate::order::OrderKind;
use crate::traits::RandomSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractStatus {
    Active,
    Closed,
    Suspended,
}

impl ContractStatus {
    pub fn label(self) -> &'static str {
        match self {
            ContractStatus::Active => "Vigente",
            ContractStatus::Closed => "Encerrado",
            ContractStatus::Suspended => "Suspenso",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Draft,
    Registered,
    Approved,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Draft,
        OrderStatus::Registered,
        OrderStatus::Approved,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Draft => "Rascunho",
            OrderStatus::Registered => "Registrada",
            OrderStatus::Approved => "Aprovada",
            OrderStatus::Completed => "Concluída",
            OrderStatus::Cancelled => "Cancelada",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractRecord {
    pub id: String,
    pub number: String,
    pub supplier: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub total_value: f64,
    pub status: ContractStatus,
}

/// Which side of an order record is filled depends on its kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OrderParty {
    Purchase {
        supplier: String,
        unit_price: f64,
    },
    Transfer {
        origin: String,
        destination: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: String,
    pub code: String,
    pub quantity: u32,
    pub party: OrderParty,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
}

impl OrderRecord {
    pub fn kind(&self) -> OrderKind {
        match self.party {
            OrderParty::Purchase { .. } => OrderKind::Purchase,
            OrderParty::Transfer { .. } => OrderKind::Transfer,
        }
    }

    /// Quantity × unit price for purchases.
    pub fn subtotal(&self) -> Option<f64> {
        match &self.party {
            OrderParty::Purchase { unit_price, .. } => Some(unit_price * f64::from(self.quantity)),
            OrderParty::Transfer { .. } => None,
        }
    }

    fn kind_label(&self) -> &'static str {
        match self.kind() {
            OrderKind::Purchase => "Compra",
            OrderKind::Transfer => "Planejamento",
        }
    }

    fn search_text(&self) -> String {
        let mut fields = vec![self.id.as_str(), self.kind_label(), self.code.as_str()];
        match &self.party {
            OrderParty::Purchase { supplier, .. } => fields.push(supplier.as_str()),
            OrderParty::Transfer { origin, destination } => {
                fields.extend([origin.as_str(), destination.as_str()])
            }
        }
        fields.join(" ")
    }
}

/// Inclusive calendar-day range; open ends match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        let day = at.date_naive();
        self.from.is_none_or(|from| day >= from) && self.to.is_none_or(|to| day <= to)
    }
}

/// Filters shared by the history tabs. Empty text and open ends match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryQuery {
    pub text: String,
    pub range: DateRange,
}

impl HistoryQuery {
    fn matches_text(&self, haystack: &str) -> bool {
        let needle = self.text.trim().to_lowercase();
        needle.is_empty() || haystack.to_lowercase().contains(&needle)
    }
}

/// Contracts matching the query; the range matches either the start or the end.
pub fn filter_contracts<'a>(
    contracts: &'a [ContractRecord],
    query: &HistoryQuery,
    status: Option<ContractStatus>,
) -> Vec<&'a ContractRecord> {
    contracts
        .iter()
        .filter(|contract| {
            query.matches_text(&format!("{} {}", contract.number, contract.supplier))
                && status.is_none_or(|status| contract.status == status)
                && (query.range.contains(contract.starts_at)
                    || query.range.contains(contract.ends_at))
        })
        .collect()
}

pub fn filter_orders<'a>(
    orders: &'a [OrderRecord],
    query: &HistoryQuery,
    status: Option<OrderStatus>,
    kind: Option<OrderKind>,
) -> Vec<&'a OrderRecord> {
    orders
        .iter()
        .filter(|order| {
            query.matches_text(&order.search_text())
                && status.is_none_or(|status| order.status == status)
                && kind.is_none_or(|kind| order.kind() == kind)
                && query.range.contains(order.created_at)
        })
        .collect()
}

/// Alerts tab: the status filter is the criticality.
pub fn filter_alerts<'a>(
    alerts: &'a [Alert],
    query: &HistoryQuery,
    criticality: Option<Criticality>,
) -> Vec<&'a Alert> {
    alerts
        .iter()
        .filter(|alert| {
            query.matches_text(&format!("{} {}", alert.code, alert.center))
                && criticality.is_none_or(|level| alert.criticality == level)
                && query.range.contains(alert.issued_at)
        })
        .collect()
}

pub fn contracts_table(contracts: &[&ContractRecord]) -> ExportTable {
    let mut table = ExportTable::new(
        ExportKind::Contracts,
        &["Número", "Fornecedor", "Início", "Fim", "Valor Total", "Status"],
    );
    for contract in contracts {
        table.push_row(vec![
            contract.number.clone(),
            contract.supplier.clone(),
            format_date(contract.starts_at.date_naive()),
            format_date(contract.ends_at.date_naive()),
            format_brl(contract.total_value),
            contract.status.label().to_string(),
        ]);
    }
    table
}

pub fn orders_table(orders: &[&OrderRecord]) -> ExportTable {
    let mut table = ExportTable::new(
        ExportKind::Orders,
        &[
            "ID",
            "Tipo",
            "Código",
            "Qtd",
            "Fornecedor",
            "Origem",
            "Destino",
            "Valor Unit.",
            "Subtotal",
            "Data",
            "Status",
        ],
    );
    for order in orders {
        let (supplier, origin, destination, unit_price) = match &order.party {
            OrderParty::Purchase { supplier, unit_price } => {
                (supplier.clone(), String::new(), String::new(), format_brl(*unit_price))
            }
            OrderParty::Transfer { origin, destination } => {
                (String::new(), origin.clone(), destination.clone(), String::new())
            }
        };
        table.push_row(vec![
            order.id.clone(),
            order.kind_label().to_string(),
            order.code.clone(),
            order.quantity.to_string(),
            supplier,
            origin,
            destination,
            unit_price,
            order.subtotal().map(format_brl).unwrap_or_default(),
            format_date_time(order.created_at),
            order.status.label().to_string(),
        ]);
    }
    table
}

const ALERT_HEADERS: [&str; 5] = ["Código", "Severidade", "Criticidade", "CD", "Emitido em"];

fn alert_row(alert: &Alert) -> Vec<String> {
    vec![
        alert.code.clone(),
        format!("{}%", alert.severity),
        alert.criticality.label().to_string(),
        alert.center.clone(),
        format_date_time(alert.issued_at),
    ]
}

pub fn alerts_table(alerts: &[&Alert]) -> ExportTable {
    let mut table = ExportTable::new(ExportKind::Alerts, &ALERT_HEADERS);
    for alert in alerts {
        table.push_row(alert_row(alert));
    }
    table
}

/// One-row export of a single alert, named `alerta_{code}.csv`.
pub fn alert_detail_table(alert: &Alert) -> ExportTable {
    let mut table = ExportTable::new(ExportKind::SingleAlert, &ALERT_HEADERS)
        .with_file_name(single_alert_file_name(&alert.code));
    table.push_row(alert_row(alert));
    table
}

const CONTRACT_SUPPLIERS: [&str; 5] =
    ["PrimeParts", "BetaLog", "SupplyMax", "NordicRep", "ACME Parts"];
const ORDER_SUPPLIERS: [&str; 4] = ["PrimeParts", "BetaLog", "SupplyMax", "ACME Parts"];
const ORDER_CODES: [&str; 8] = [
    "ROXR-033849",
    "AOLR-068182",
    "WOSR-096625",
    "AARO-020619",
    "QOER-084064",
    "VEIF-010806",
    "HCKB-398523",
    "YOLR-082236",
];

/// Demo contracts starting in `year`, newest first.
pub fn generate_contracts<R: RandomSource + ?Sized>(
    count: usize,
    year: i32,
    rng: &mut R,
) -> Vec<ContractRecord> {
    let statuses = [ContractStatus::Active, ContractStatus::Closed, ContractStatus::Suspended];
    let mut contracts: Vec<ContractRecord> = (0..count)
        .map(|i| {
            let month = rng.uniform_int(1, 12) as u32;
            let day = rng.uniform_int(1, 27) as u32;
            let starts_at = NaiveDate::from_ymd_opt(year, month, day)
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|start| Utc.from_utc_datetime(&start))
                .unwrap_or_default();
            let length = Months::new(rng.uniform_int(6, 17) as u32);
            let ends_at = starts_at.checked_add_months(length).unwrap_or(starts_at);
            ContractRecord {
                id: format!("CT-{i}"),
                number: format!("CT-{}", 1000 + i),
                supplier: CONTRACT_SUPPLIERS[i % CONTRACT_SUPPLIERS.len()].to_string(),
                starts_at,
                ends_at,
                total_value: (120_000 + rng.uniform_int(0, 519_999)) as f64,
                status: rng.pick(&statuses).copied().unwrap_or(ContractStatus::Active),
            }
        })
        .collect();
    contracts.sort_by(|a, b| b.starts_at.cmp(&a.starts_at));
    contracts
}

/// Demo orders created in the 30 days before `now`, newest first.
pub fn generate_orders<R: RandomSource + ?Sized>(
    count: usize,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<OrderRecord> {
    let window_secs = Duration::days(30).num_seconds();
    let centers = DISTRIBUTION_CENTERS;
    let mut orders: Vec<OrderRecord> = (0..count)
        .map(|i| {
            let party = if rng.uniform(0.0, 1.0) < 0.55 {
                OrderParty::Purchase {
                    supplier: ORDER_SUPPLIERS[i % ORDER_SUPPLIERS.len()].to_string(),
                    unit_price: (70 + rng.uniform_int(0, 799)) as f64,
                }
            } else {
                OrderParty::Transfer {
                    origin: centers[i % centers.len()].to_string(),
                    destination: centers[(i + 2) % centers.len()].to_string(),
                }
            };
            OrderRecord {
                id: format!("OR-{i}"),
                code: ORDER_CODES[i % ORDER_CODES.len()].to_string(),
                quantity: rng.uniform_int(1, 150) as u32,
                party,
                created_at: now - Duration::seconds(rng.uniform_int(0, window_secs)),
                status: OrderStatus::ALL[i % OrderStatus::ALL.len()],
            }
        })
        .collect();
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    orders
}

/// Demo alert history over the 15 days before `now`, newest first.
pub fn generate_alert_history<R: RandomSource + ?Sized>(
    count: usize,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<Alert> {
    let window_secs = Duration::days(15).num_seconds();
    let mut alerts: Vec<Alert> = (0..count)
        .map(|i| {
            Alert::new(
                format!("AL-{i}"),
                ORDER_CODES[i % ORDER_CODES.len()],
                rng.uniform_int(0, 100) as u8,
                DISTRIBUTION_CENTERS[(i + 1) % DISTRIBUTION_CENTERS.len()],
                now - Duration::seconds(rng.uniform_int(0, window_secs)),
            )
        })
        .collect();
    alerts.sort_by(|a, b| b.issued_at.cmp(&a.issued_at));
    alerts
}
