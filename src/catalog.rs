//! Product reference table used to default order-line fields.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::traits::ProductLookup;

/// Reference data for a single product code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductEntry {
    pub code: String,
    /// ABC classification tag.
    pub class: String,
    pub reference_price: Option<f64>,
    pub description: Option<String>,
}

impl ProductEntry {
    pub fn new(code: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            class: class.into(),
            reference_price: None,
            description: None,
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.reference_price = Some(price);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// In-memory lookup keyed by product code. Later entries replace earlier
/// ones with the same code.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    entries: HashMap<String, ProductEntry>,
}

impl ProductCatalog {
    pub fn new(entries: impl IntoIterator<Item = ProductEntry>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|entry| (entry.code.clone(), entry))
                .collect(),
        }
    }

    /// The demo dataset the order form ships with.
    pub fn demo() -> Self {
        let items = [
            ("ROXR-033849", 120.0),
            ("AOLR-068182", 145.0),
            ("WOSR-096625", 210.0),
            ("AARO-020619", 95.0),
            ("QOER-084064", 132.0),
            ("VEIF-010806", 160.0),
        ];
        Self::new(items.into_iter().map(|(code, price)| {
            ProductEntry::new(code, "C")
                .with_price(price)
                .with_description(format!("Peça {code}"))
        }))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ProductLookup for ProductCatalog {
    fn entry(&self, code: &str) -> Option<&ProductEntry> {
        self.entries.get(code)
    }
}
