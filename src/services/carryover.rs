//! Month-to-month carryover of surpluses.
//!
//! A month closes with its surplus (never below zero) and the next month
//! opens with that amount. A deficit is reported as that month's loan and
//! does not carry forward.

use serde::Serialize;

use crate::models::MonthlyTrendPoint;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CarryoverBalances {
    pub opening_balance: f64,
    pub closing_balance: f64,
    pub loan_amount: f64,
}

/// How a month's deficit turns into a loan figure.
///
/// Only [`PerMonthDeficit`] exists. Whether deficits should compound across
/// consecutive months is undecided; a compounding rule would implement this
/// trait using `previous`.
pub trait DeficitPolicy {
    fn loan_amount(&self, profit: f64, previous: Option<&CarryoverBalances>) -> f64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PerMonthDeficit;

impl DeficitPolicy for PerMonthDeficit {
    fn loan_amount(&self, profit: f64, _previous: Option<&CarryoverBalances>) -> f64 {
        (-profit).max(0.0)
    }
}

/// Carryover for chronologically ordered monthly profits.
pub fn accumulate(profits: &[f64]) -> Vec<CarryoverBalances> {
    accumulate_with(profits, &PerMonthDeficit)
}

pub fn accumulate_with<P: DeficitPolicy>(profits: &[f64], policy: &P) -> Vec<CarryoverBalances> {
    let mut out: Vec<CarryoverBalances> = Vec::with_capacity(profits.len());
    for &profit in profits {
        let previous = out.last();
        let balances = CarryoverBalances {
            opening_balance: previous.map(|p| p.closing_balance).unwrap_or(0.0),
            closing_balance: profit.max(0.0),
            loan_amount: policy.loan_amount(profit, previous),
        };
        out.push(balances);
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendMonth {
    pub month: u32,
    pub income: f64,
    pub expense: f64,
    pub profit: f64,
    #[serde(flatten)]
    pub balances: CarryoverBalances,
    pub has_deficit: bool,
}

/// Enrich a yearly trend with carryover. Points are sorted by month first.
pub fn trend_with_carryover(mut points: Vec<MonthlyTrendPoint>) -> Vec<TrendMonth> {
    points.sort_by_key(|p| p.month);
    let profits: Vec<f64> = points.iter().map(|p| p.profit).collect();

    points
        .into_iter()
        .zip(accumulate(&profits))
        .map(|(p, balances)| TrendMonth {
            month: p.month,
            income: p.income,
            expense: p.expense,
            has_deficit: p.profit < 0.0,
            profit: p.profit,
            balances,
        })
        .collect()
}
