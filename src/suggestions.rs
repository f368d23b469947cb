//! Purchasing recommendations and their applied state.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Notice;
use crate::export::format_brl_whole;

const DEFAULT_ACTION: &str = "Aplicar";
const APPLIED_LABEL: &str = "Aplicada";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl Impact {
    pub fn label(self) -> &'static str {
        match self {
            Impact::High => "Alto",
            Impact::Medium => "Médio",
            Impact::Low => "Baixo",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SuggestionCategory {
    Savings,
    Opportunities,
    Risk,
}

impl SuggestionCategory {
    pub fn label(self) -> &'static str {
        match self {
            SuggestionCategory::Savings => "Economia",
            SuggestionCategory::Opportunities => "Oportunidades",
            SuggestionCategory::Risk => "Risco",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Estimated savings in reais per year.
    pub yearly_savings: Option<f64>,
    pub impact: Impact,
    pub category: SuggestionCategory,
    pub action_label: Option<String>,
}

impl Suggestion {
    pub fn action_label(&self) -> &str {
        self.action_label.as_deref().unwrap_or(DEFAULT_ACTION)
    }

    pub fn savings_label(&self) -> String {
        format_savings(self.yearly_savings)
    }
}

/// Whole reais, or `—` when there is no estimate.
pub fn format_savings(value: Option<f64>) -> String {
    value.map_or_else(|| "—".to_string(), format_brl_whole)
}

/// The recommendation list with the ids already applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SuggestionBoard {
    suggestions: Vec<Suggestion>,
    applied: HashSet<String>,
}

impl SuggestionBoard {
    pub fn new(suggestions: Vec<Suggestion>) -> Self {
        Self {
            suggestions,
            applied: HashSet::new(),
        }
    }

    /// The three recommendations shown by the demo.
    pub fn demo() -> Self {
        Self::new(vec![
            Suggestion {
                id: "s1".to_string(),
                title: "Considerar Fornecedores de TI".to_string(),
                description: "Identificamos 5 fornecedores com produtos similares. Consolidação \
                              pode gerar economia de até R$ 280K/ano."
                    .to_string(),
                yearly_savings: Some(280_000.0),
                impact: Impact::High,
                category: SuggestionCategory::Savings,
                action_label: Some("Aplicar".to_string()),
            },
            Suggestion {
                id: "s2".to_string(),
                title: "Antecipar Compra de Papel".to_string(),
                description: "Previsão de aumento de 15% no preço. Recomendar compra antecipada \
                              para os próximos 6 meses."
                    .to_string(),
                yearly_savings: Some(85_000.0),
                impact: Impact::Medium,
                category: SuggestionCategory::Opportunities,
                action_label: Some("Aplicar".to_string()),
            },
            Suggestion {
                id: "s3".to_string(),
                title: "Revisar Contrato de Logística".to_string(),
                description: "KPIs de SLA fora da meta nas regiões Sul e Sudeste. Revisão pode \
                              reduzir custos de urgência em 12%."
                    .to_string(),
                yearly_savings: Some(120_000.0),
                impact: Impact::High,
                category: SuggestionCategory::Risk,
                action_label: Some("Mitigar".to_string()),
            },
        ])
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn get(&self, id: &str) -> Option<&Suggestion> {
        self.suggestions.iter().find(|suggestion| suggestion.id == id)
    }

    pub fn is_applied(&self, id: &str) -> bool {
        self.applied.contains(id)
    }

    /// Marks `id` applied. Returns `Ok(false)` when it already was.
    pub fn apply(&mut self, id: &str) -> Result<bool, Notice> {
        if self.get(id).is_none() {
            return Err(Notice::SuggestionNotFound(id.to_string()));
        }
        let newly = self.applied.insert(id.to_string());
        if newly {
            info!(id, "suggestion applied");
        }
        Ok(newly)
    }

    /// Button text: the action while pending, `Aplicada` once applied.
    pub fn button_label(&self, id: &str) -> Option<&str> {
        let suggestion = self.get(id)?;
        Some(if self.is_applied(id) {
            APPLIED_LABEL
        } else {
            suggestion.action_label()
        })
    }

    /// Sum of the estimates of applied suggestions.
    pub fn applied_savings(&self) -> f64 {
        self.suggestions
            .iter()
            .filter(|suggestion| self.is_applied(&suggestion.id))
            .filter_map(|suggestion| suggestion.yearly_savings)
            .sum()
    }
}
