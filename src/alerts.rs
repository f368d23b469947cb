//! Stock alerts: severity, criticality and the alerts list filters.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::traits::RandomSource;

/// Distribution centres used by the demo data.
pub const DISTRIBUTION_CENTERS: [&str; 6] = [
    "CD São Paulo",
    "CD Rio de Janeiro",
    "CD Curitiba",
    "CD Recife",
    "CD Salvador",
    "CD Brasília",
];

/// Product codes alerts are raised for in the demo data.
pub const ALERT_CODES: [&str; 10] = [
    "ROXR-033849",
    "AOLR-068182",
    "WOSR-096625",
    "AARO-020619",
    "QOER-084064",
    "VEIF-010806",
    "HCKB-398523",
    "YOLR-082236",
    "ZKTR-778901",
    "PLMN-445566",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Criticality {
    Low,
    Medium,
    High,
    Critical,
}

impl Criticality {
    /// Maps a 0..=100 severity to its band.
    pub fn from_severity(severity: u8) -> Self {
        match severity {
            85.. => Criticality::Critical,
            70..=84 => Criticality::High,
            40..=69 => Criticality::Medium,
            _ => Criticality::Low,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Criticality::Low => "Baixo",
            Criticality::Medium => "Médio",
            Criticality::High => "Alto",
            Criticality::Critical => "Crítico",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub code: String,
    /// 0..=100.
    pub severity: u8,
    pub criticality: Criticality,
    pub issued_at: DateTime<Utc>,
    pub center: String,
}

impl Alert {
    pub fn new(
        id: impl Into<String>,
        code: impl Into<String>,
        severity: u8,
        center: impl Into<String>,
        issued_at: DateTime<Utc>,
    ) -> Self {
        let severity = severity.min(100);
        Self {
            id: id.into(),
            code: code.into(),
            severity,
            criticality: Criticality::from_severity(severity),
            issued_at,
            center: center.into(),
        }
    }

    /// Case-insensitive match on product code or centre.
    pub fn matches_text(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.code.to_lowercase().contains(&query)
            || self.center.to_lowercase().contains(&query)
    }
}

/// Filters of the alerts list. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertFilter {
    pub query: String,
    pub criticality: Option<Criticality>,
    pub center: Option<String>,
}

impl AlertFilter {
    pub fn matches(&self, alert: &Alert) -> bool {
        alert.matches_text(&self.query)
            && self.criticality.is_none_or(|level| alert.criticality == level)
            && self.center.as_deref().is_none_or(|center| alert.center == center)
    }

    pub fn apply<'a>(&self, alerts: &'a [Alert]) -> Vec<&'a Alert> {
        alerts.iter().filter(|alert| self.matches(alert)).collect()
    }
}

/// Most severe first; ties keep their order.
pub fn sort_by_severity(alerts: &mut [Alert]) {
    alerts.sort_by(|a, b| b.severity.cmp(&a.severity));
}

/// Random alerts issued within the last `days` days, most severe first.
pub fn generate_alerts<R: RandomSource + ?Sized>(
    count: usize,
    now: DateTime<Utc>,
    days: i64,
    rng: &mut R,
) -> Vec<Alert> {
    let window_secs = Duration::days(days.max(0)).num_seconds();
    let mut alerts: Vec<Alert> = (0..count)
        .map(|i| {
            let code = rng.pick(&ALERT_CODES).copied().unwrap_or_default();
            let severity = rng.uniform_int(0, 100) as u8;
            let center = rng.pick(&DISTRIBUTION_CENTERS).copied().unwrap_or_default();
            let issued_at = now - Duration::seconds(rng.uniform_int(0, window_secs));
            Alert::new(
                format!("{code}-{i}-{}", issued_at.timestamp_millis()),
                code,
                severity,
                center,
                issued_at,
            )
        })
        .collect();
    sort_by_severity(&mut alerts);
    alerts
}
