use axum::extract::{Path, Query, State};
use axum::response::Json;
use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::params::{MonthParams, PeriodParams, YearParams};
use crate::models::{CategoryAmounts, ProfileIcon, ProfileIconInfo};
use crate::period::PeriodWindow;
use crate::services::carryover::TrendMonth;
use crate::services::dashboard::{self, BudgetOverview, Comparison, DashboardSnapshot};
use crate::services::line_chart::{self, LineChart, LineRow};
use crate::services::pie_chart::{self, PieChart};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ResolvedPeriod {
    pub window: PeriodWindow,
    /// True when the selection was invalid and the current month was used.
    pub fallback: bool,
}

pub async fn resolve_period(
    State(state): State<AppState>,
    Query(params): Query<PeriodParams>,
) -> Json<ResolvedPeriod> {
    let (window, fallback) = params.resolve_window(state.today());
    Json(ResolvedPeriod { window, fallback })
}

/// Normalized stats plus pie charts for the selected window.
///
/// With a `view` id, only the newest request for that view may complete;
/// an older one that finishes late gets `409` and its data is dropped.
pub async fn dashboard_stats(
    State(state): State<AppState>,
    Query(params): Query<PeriodParams>,
) -> AppResult<Json<DashboardSnapshot>> {
    let (window, _) = params.resolve_window(state.today());
    let provider = state.provider.as_ref();
    let palette = &state.config.palette;

    let Some(view) = params.view.as_deref() else {
        return Ok(Json(
            dashboard::load_snapshot(provider, window, palette).await?,
        ));
    };

    let slot = state.views.slot(view)?;
    let ticket = slot.issue();
    tracing::debug!(view, generation = ticket.generation(), label = %window.label, "Loading dashboard");

    let snapshot = dashboard::load_snapshot(provider, window, palette).await?;
    if !slot.publish(ticket, snapshot.clone()) {
        return Err(AppError::Stale(ticket.generation()));
    }
    Ok(Json(snapshot))
}

#[derive(Debug, Deserialize)]
pub struct ViewParams {
    pub view: String,
}

/// Last snapshot accepted for a view, `null` if none yet.
pub async fn dashboard_current(
    State(state): State<AppState>,
    Query(params): Query<ViewParams>,
) -> AppResult<Json<Option<DashboardSnapshot>>> {
    Ok(Json(state.views.current(&params.view)?))
}

pub async fn monthly_trend(
    State(state): State<AppState>,
    Query(params): Query<YearParams>,
) -> AppResult<Json<Vec<TrendMonth>>> {
    let year = params.year.unwrap_or(state.today().year());
    let trend = dashboard::load_trend(state.provider.as_ref(), year).await?;
    Ok(Json(trend))
}

pub async fn comparison(
    State(state): State<AppState>,
    Query(params): Query<PeriodParams>,
) -> AppResult<Json<Comparison>> {
    let (window, _) = params.resolve_window(state.today());
    let comparison = dashboard::load_comparison(state.provider.as_ref(), window).await?;
    Ok(Json(comparison))
}

pub async fn budget_status(
    State(state): State<AppState>,
    Query(params): Query<MonthParams>,
) -> AppResult<Json<BudgetOverview>> {
    let (month, year) = params.resolve(state.today())?;
    let overview = dashboard::load_budget(
        state.provider.as_ref(),
        month,
        year,
        &state.config.thresholds,
    )
    .await?;
    Ok(Json(overview))
}

#[derive(Debug, Deserialize)]
pub struct PieRequest {
    pub amounts: CategoryAmounts,
    /// Overrides the configured palette.
    pub palette: Option<Vec<String>>,
}

pub async fn pie_chart(
    State(state): State<AppState>,
    Json(request): Json<PieRequest>,
) -> AppResult<Json<PieChart>> {
    let palette = request
        .palette
        .as_deref()
        .unwrap_or(state.config.palette.as_slice());
    Ok(Json(pie_chart::compute(&request.amounts, palette)?))
}

#[derive(Debug, Deserialize)]
pub struct LineRequest {
    #[serde(default)]
    pub a: CategoryAmounts,
    #[serde(default)]
    pub b: CategoryAmounts,
}

#[derive(Debug, Serialize)]
pub struct LineResponse {
    pub chart: LineChart,
    pub rows: Vec<LineRow>,
}

pub async fn line_chart(Json(request): Json<LineRequest>) -> AppResult<Json<LineResponse>> {
    let chart = line_chart::compute(&request.a, &request.b)?;
    let rows = chart.series().map(|s| s.rows()).unwrap_or_default();
    Ok(Json(LineResponse { chart, rows }))
}

pub async fn profile_icons() -> Json<Vec<ProfileIconInfo>> {
    Json(ProfileIcon::all().iter().map(ProfileIcon::info).collect())
}

/// Icon for a stored member key. Unknown keys resolve to the default icon.
pub async fn profile_icon(Path(key): Path<String>) -> Json<ProfileIconInfo> {
    Json(ProfileIcon::from_key(&key).info())
}
