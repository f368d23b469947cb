//! Dashboard KPIs and the mock series behind its charts.
//!
//! Each refresh tick slides the monthly series one month left and appends a
//! jittered successor; the snapshot-style series are re-jittered in place
//! and kept inside their bounds.

use serde::{Deserialize, Serialize};

use crate::traits::RandomSource;

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

pub const LOW_STOCK_LABELS: [&str; 6] =
    ["Cabo", "Conector", "Módulo", "Transceptor", "Bateria", "Outros"];

pub const PLANNING_LABELS: [&str; 4] =
    ["Abertas", "Em execução", "Aguardando aprovação", "Concluídas"];

/// Index of "Concluídas" in the planning-order series.
const PLANNING_COMPLETED: usize = 3;

pub fn clamp(value: i64, min: i64, max: i64) -> i64 {
    value.max(min).min(max)
}

/// `value` moved by a uniform offset in `[-amount, amount]`, rounded and
/// floored at `min`.
pub fn jitter<R: RandomSource + ?Sized>(value: i64, amount: f64, min: i64, rng: &mut R) -> i64 {
    let moved = value as f64 + rng.uniform(-amount, amount);
    (moved.round() as i64).max(min)
}

/// How one series moves per tick: jitter parameters plus an optional hard
/// range applied afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesBounds {
    pub amount: f64,
    pub floor: i64,
    pub range: Option<(i64, i64)>,
}

impl SeriesBounds {
    pub const fn jitter(amount: f64, floor: i64) -> Self {
        Self { amount, floor, range: None }
    }

    pub const fn clamped(amount: f64, floor: i64, min: i64, max: i64) -> Self {
        Self {
            amount,
            floor,
            range: Some((min, max)),
        }
    }

    pub fn next<R: RandomSource + ?Sized>(&self, value: i64, rng: &mut R) -> i64 {
        let moved = jitter(value, self.amount, self.floor, rng);
        match self.range {
            Some((min, max)) => clamp(moved, min, max),
            None => moved,
        }
    }
}

/// Per-series movement rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardRules {
    pub active_contracts: SeriesBounds,
    pub expiring_contracts: SeriesBounds,
    pub expired_contracts: SeriesBounds,
    pub monthly_alerts: SeriesBounds,
    pub class_a: SeriesBounds,
    pub class_b: SeriesBounds,
    pub class_c: SeriesBounds,
    pub low_stock: SeriesBounds,
    pub planning: SeriesBounds,
    pub planning_completed: SeriesBounds,
}

impl Default for DashboardRules {
    fn default() -> Self {
        Self {
            active_contracts: SeriesBounds::jitter(3.0, 100),
            expiring_contracts: SeriesBounds::jitter(2.0, 3),
            expired_contracts: SeriesBounds::jitter(1.0, 0),
            monthly_alerts: SeriesBounds::jitter(3.0, 5),
            class_a: SeriesBounds::clamped(10.0, 600, 400, 1200),
            class_b: SeriesBounds::clamped(15.0, 900, 700, 2200),
            class_c: SeriesBounds::clamped(20.0, 1200, 1000, 3200),
            low_stock: SeriesBounds::clamped(2.0, 1, 1, 30),
            planning: SeriesBounds::clamped(2.0, 3, 3, 30),
            planning_completed: SeriesBounds::clamped(1.0, 40, 35, 60),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassStock {
    pub a: i64,
    pub b: i64,
    pub c: i64,
}

impl ClassStock {
    pub fn total(&self) -> i64 {
        self.a + self.b + self.c
    }
}

/// Headline figures shown above the charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Kpis {
    pub active_contracts: i64,
    pub stock_units: i64,
    pub open_service_orders: i64,
    pub pending_items: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardState {
    pub active_contracts: Vec<i64>,
    pub expiring_contracts: Vec<i64>,
    pub expired_contracts: Vec<i64>,
    pub monthly_alerts: Vec<i64>,
    pub class_stock: ClassStock,
    /// Aligned with [`LOW_STOCK_LABELS`].
    pub low_stock: Vec<i64>,
    /// Aligned with [`PLANNING_LABELS`].
    pub planning_orders: Vec<i64>,
    pub open_service_orders: i64,
    pub pending_items: i64,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            active_contracts: vec![120, 126, 130, 128, 135, 142, 148, 150, 152, 154, 155, 156],
            expiring_contracts: vec![5, 7, 6, 8, 9, 10, 11, 12, 13, 11, 10, 9],
            expired_contracts: vec![1, 1, 2, 2, 3, 2, 1, 2, 3, 3, 4, 4],
            monthly_alerts: vec![8, 12, 7, 10, 14, 9, 11, 16, 12, 10, 9, 13],
            class_stock: ClassStock { a: 820, b: 1560, c: 2310 },
            low_stock: vec![22, 18, 12, 9, 7, 5],
            planning_orders: vec![23, 12, 7, 48],
            open_service_orders: 37,
            pending_items: 23,
        }
    }
}

impl DashboardState {
    pub fn kpis(&self) -> Kpis {
        Kpis {
            active_contracts: self.active_contracts.last().copied().unwrap_or(0),
            stock_units: self.class_stock.total(),
            open_service_orders: self.open_service_orders,
            pending_items: self.pending_items,
        }
    }

    /// Advances every series by one refresh.
    pub fn tick<R: RandomSource + ?Sized>(&mut self, rules: &DashboardRules, rng: &mut R) {
        slide(&mut self.active_contracts, &rules.active_contracts, rng);
        slide(&mut self.expiring_contracts, &rules.expiring_contracts, rng);
        slide(&mut self.expired_contracts, &rules.expired_contracts, rng);
        slide(&mut self.monthly_alerts, &rules.monthly_alerts, rng);

        self.class_stock = ClassStock {
            a: rules.class_a.next(self.class_stock.a, rng),
            b: rules.class_b.next(self.class_stock.b, rng),
            c: rules.class_c.next(self.class_stock.c, rng),
        };

        for value in &mut self.low_stock {
            *value = rules.low_stock.next(*value, rng);
        }
        for (i, value) in self.planning_orders.iter_mut().enumerate() {
            let bounds = if i == PLANNING_COMPLETED {
                &rules.planning_completed
            } else {
                &rules.planning
            };
            *value = bounds.next(*value, rng);
        }
    }
}

fn slide<R: RandomSource + ?Sized>(series: &mut Vec<i64>, bounds: &SeriesBounds, rng: &mut R) {
    let Some(&last) = series.last() else {
        return;
    };
    series.remove(0);
    series.push(bounds.next(last, rng));
}
