pub mod api;
pub mod charts;
pub mod params;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        // Period resolution
        .route("/api/period/resolve", get(api::resolve_period))
        // Dashboard (fetch + normalize)
        .route("/api/dashboard/stats", get(api::dashboard_stats))
        .route("/api/dashboard/current", get(api::dashboard_current))
        .route("/api/dashboard/trend", get(api::monthly_trend))
        .route("/api/analytics/comparison", get(api::comparison))
        // Budgets
        .route("/api/budget/status", get(api::budget_status))
        // Pure chart computation
        .route("/api/charts/pie", post(api::pie_chart))
        .route("/api/charts/line", post(api::line_chart))
        // Rendered charts
        .route("/charts/expense-pie.svg", get(charts::expense_pie))
        .route("/charts/income-pie.svg", get(charts::income_pie))
        .route("/charts/comparison.svg", get(charts::comparison))
        // Lookup tables
        .route("/api/profile-icons", get(api::profile_icons))
        .route("/api/profile-icons/:key", get(api::profile_icon))
        // Health check
        .route("/health", get(health))
}

async fn health() -> &'static str {
    "OK"
}
