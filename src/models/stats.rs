use serde::{Deserialize, Serialize};

use super::CategoryAmounts;
use crate::period::PeriodWindow;

/// Response of the detailed monthly endpoint, which carries true carryover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyStatsResponse {
    pub total_income: f64,
    pub total_expense: f64,
    pub profit: f64,
    #[serde(default)]
    pub income_by_category: CategoryAmounts,
    #[serde(default)]
    pub expense_by_category: CategoryAmounts,
    pub opening_balance: f64,
    pub closing_balance: f64,
    pub loan_amount: f64,
    #[serde(default)]
    pub transaction_count: Option<u64>,
}

/// Response of the period endpoint (quarterly, half-yearly, annual, custom).
/// Aggregates only, no carryover fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodStatsResponse {
    pub total_income: f64,
    pub total_expense: f64,
    pub profit: f64,
    #[serde(default)]
    pub income_by_category: CategoryAmounts,
    #[serde(default)]
    pub expense_by_category: CategoryAmounts,
    #[serde(default)]
    pub transaction_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatsPayload {
    Monthly(MonthlyStatsResponse),
    Period(PeriodStatsResponse),
}

/// Uniform financial summary for a window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodStats {
    pub window: PeriodWindow,
    pub total_income: f64,
    pub total_expense: f64,
    pub profit: f64,
    pub income_by_category: CategoryAmounts,
    pub expense_by_category: CategoryAmounts,
    pub opening_balance: f64,
    pub closing_balance: f64,
    pub loan_amount: f64,
    pub has_deficit: bool,
    pub transaction_count: Option<u64>,
}

/// One month of the yearly trend endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTrendPoint {
    pub month: u32,
    pub income: f64,
    pub expense: f64,
    pub profit: f64,
}
