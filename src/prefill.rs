//! Order prefills raised from history and alert details.
//!
//! Duplicating an order, ordering against a contract and ordering for an
//! alert all start a new order with some fields filled in. An
//! [`OrderPrefill`] carries those fields; [`OrderPrefill::to_line`] turns them
//! into the first line of the new order.

use serde::{Deserialize, Serialize};

use crate::alerts::Alert;
use crate::history::{ContractRecord, OrderParty, OrderRecord};
use crate::order::{apply_code, CodeOverrides, OrderKind, OrderLine};
use crate::traits::ProductLookup;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPrefill {
    pub kind: OrderKind,
    pub code: Option<String>,
    pub quantity: Option<u32>,
    pub supplier: Option<String>,
    /// Transfer origin; on purchase lines this becomes the location.
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub unit_price: Option<f64>,
    pub contract: Option<String>,
}

impl OrderPrefill {
    pub fn empty(kind: OrderKind) -> Self {
        Self {
            kind,
            code: None,
            quantity: None,
            supplier: None,
            origin: None,
            destination: None,
            unit_price: None,
            contract: None,
        }
    }

    /// One line of the prefill's kind.
    ///
    /// The code is applied first so catalogue defaults fill class,
    /// description and price; a prefilled price wins over the catalogue.
    pub fn to_line<L: ProductLookup + ?Sized>(&self, lookup: &L) -> OrderLine {
        let mut line = OrderLine::blank(self.kind);
        if let Some(code) = &self.code {
            let overrides = CodeOverrides {
                unit_price: self.unit_price,
                ..CodeOverrides::default()
            };
            apply_code(&mut line, code, lookup, &overrides);
        }

        let quantity = self.quantity.map(|quantity| quantity.max(1));
        match &mut line {
            OrderLine::Purchase(line) => {
                if let Some(quantity) = quantity {
                    line.quantity = quantity;
                }
                line.supplier = self.supplier.clone().unwrap_or_default();
                line.location = self.origin.clone().unwrap_or_default();
            }
            OrderLine::Transfer(line) => {
                if let Some(quantity) = quantity {
                    line.quantity = quantity;
                }
                line.origin = self.origin.clone().unwrap_or_default();
                line.destination = self.destination.clone().unwrap_or_default();
            }
        }
        line
    }
}

/// Duplicates a past order.
impl From<&OrderRecord> for OrderPrefill {
    fn from(record: &OrderRecord) -> Self {
        let mut prefill = Self {
            code: Some(record.code.clone()),
            quantity: Some(record.quantity),
            ..Self::empty(record.kind())
        };
        match &record.party {
            OrderParty::Purchase { supplier, unit_price } => {
                prefill.supplier = Some(supplier.clone());
                prefill.unit_price = Some(*unit_price).filter(|price| *price > 0.0);
            }
            OrderParty::Transfer { origin, destination } => {
                prefill.origin = Some(origin.clone());
                prefill.destination = Some(destination.clone());
            }
        }
        prefill
    }
}

/// Purchase against a contract.
impl From<&ContractRecord> for OrderPrefill {
    fn from(contract: &ContractRecord) -> Self {
        Self {
            supplier: Some(contract.supplier.clone()),
            contract: Some(contract.number.clone()),
            ..Self::empty(OrderKind::Purchase)
        }
    }
}

/// Purchase of the alerted product for the alerting centre.
impl From<&Alert> for OrderPrefill {
    fn from(alert: &Alert) -> Self {
        Self {
            code: Some(alert.code.clone()),
            origin: Some(alert.center.clone()),
            ..Self::empty(OrderKind::Purchase)
        }
    }
}
