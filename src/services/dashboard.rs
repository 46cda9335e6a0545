//! Composes the fetch, normalize and chart steps behind each dashboard view.

use serde::Serialize;

use crate::config::BudgetThresholds;
use crate::error::{AppError, AppResult};
use crate::models::{BudgetStatus, PeriodStats};
use crate::period::PeriodWindow;
use crate::services::carryover::{self, TrendMonth};
use crate::services::line_chart::{self, LineChart, LineRow};
use crate::services::pie_chart::{self, PieChart};
use crate::services::stats_client::{fetch_payload, StatsProvider};
use crate::services::{budget_status, period_stats};

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub stats: PeriodStats,
    pub income_chart: PieChart,
    pub expense_chart: PieChart,
}

pub async fn load_snapshot(
    provider: &dyn StatsProvider,
    window: PeriodWindow,
    palette: &[String],
) -> AppResult<DashboardSnapshot> {
    let payload = fetch_payload(provider, &window).await?;
    let stats = period_stats::normalize(window, payload);

    Ok(DashboardSnapshot {
        income_chart: pie_chart::compute(&stats.income_by_category, palette)
            .map_err(AppError::from_upstream)?,
        expense_chart: pie_chart::compute(&stats.expense_by_category, palette)
            .map_err(AppError::from_upstream)?,
        stats,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub previous: PeriodWindow,
    pub current: PeriodWindow,
    pub chart: LineChart,
    pub rows: Vec<LineRow>,
}

/// Expense by category of the window before `window` (series A) against
/// `window` itself (series B).
pub async fn load_comparison(
    provider: &dyn StatsProvider,
    window: PeriodWindow,
) -> AppResult<Comparison> {
    let previous = window.previous()?;

    let before = period_stats::normalize(
        previous.clone(),
        fetch_payload(provider, &previous).await?,
    );
    let after = period_stats::normalize(window.clone(), fetch_payload(provider, &window).await?);

    let chart = line_chart::compute(&before.expense_by_category, &after.expense_by_category)
        .map_err(AppError::from_upstream)?;
    let rows = chart.series().map(|s| s.rows()).unwrap_or_default();

    Ok(Comparison {
        previous,
        current: window,
        chart,
        rows,
    })
}

pub async fn load_trend(provider: &dyn StatsProvider, year: i32) -> AppResult<Vec<TrendMonth>> {
    let points = provider.monthly_trend(year).await?;
    Ok(carryover::trend_with_carryover(points))
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetOverview {
    pub month: u32,
    pub year: i32,
    pub statuses: Vec<BudgetStatus>,
    pub alerts: Vec<BudgetStatus>,
}

pub async fn load_budget(
    provider: &dyn StatsProvider,
    month: u32,
    year: i32,
    thresholds: &BudgetThresholds,
) -> AppResult<BudgetOverview> {
    let entries = provider.budget_entries(month, year).await?;
    let statuses =
        budget_status::classify_all(&entries, thresholds).map_err(AppError::from_upstream)?;
    let alerts = budget_status::alerts(&statuses, thresholds);

    Ok(BudgetOverview {
        month,
        year,
        statuses,
        alerts,
    })
}
