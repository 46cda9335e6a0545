use serde::{Deserialize, Serialize};

/// A category's spend for a month, as reported by the ledger API.
/// Categories without a limit come through with `budget_limit` unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetEntry {
    pub category_id: String,
    pub category_name: String,
    pub spent: f64,
    #[serde(default)]
    pub budget_limit: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetBand {
    Ok,
    Warning,
    Exceeded,
}

impl BudgetBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Warning => "warning",
            Self::Exceeded => "exceeded",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetStatus {
    pub category_id: String,
    pub category_name: String,
    pub spent: f64,
    pub limit: f64,
    pub percentage: f64,
    pub status: BudgetBand,
    pub remaining: f64,
}
