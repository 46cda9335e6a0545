//! Shared test utilities for integration tests.
//!
//! This module provides a `TestClient` that drives the full router against an
//! in-memory stats provider with a fixed "today" of 2025-06-14. Methods are
//! intentionally broad to support various test scenarios across test files.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use cashflow_radar::config::Config;
use cashflow_radar::error::AppResult;
use cashflow_radar::models::{
    BudgetEntry, CategoryAmounts, MonthlyStatsResponse, MonthlyTrendPoint, PeriodStatsResponse,
};
use cashflow_radar::period::PeriodWindow;
use cashflow_radar::server;
use cashflow_radar::services::stats_client::{ProviderFuture, StatsProvider};
use cashflow_radar::state::FixedClock;
use chrono::NaiveDate;
use http_body_util::BodyExt;
use tower::ServiceExt;

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 14).unwrap()
}

/// In-memory [`StatsProvider`]. Unknown months and windows report zeros.
#[derive(Default)]
pub struct StaticStatsProvider {
    pub monthly: HashMap<(u32, i32), MonthlyStatsResponse>,
    pub periods: HashMap<(String, String), PeriodStatsResponse>,
    pub trends: HashMap<i32, Vec<MonthlyTrendPoint>>,
    pub budgets: Vec<BudgetEntry>,
    /// Upstream calls in order, e.g. `monthly 6/2025`.
    pub calls: Mutex<Vec<String>>,
}

pub fn monthly(
    income: &[(&str, f64)],
    expense: &[(&str, f64)],
    opening: f64,
) -> MonthlyStatsResponse {
    let income = CategoryAmounts::from_pairs(income.iter().copied());
    let expense = CategoryAmounts::from_pairs(expense.iter().copied());
    let profit = income.total() - expense.total();
    MonthlyStatsResponse {
        total_income: income.total(),
        total_expense: expense.total(),
        profit,
        income_by_category: income,
        expense_by_category: expense,
        opening_balance: opening,
        closing_balance: opening + profit.max(0.0),
        loan_amount: (-profit).max(0.0),
        transaction_count: Some(12),
    }
}

pub fn period(income: &[(&str, f64)], expense: &[(&str, f64)]) -> PeriodStatsResponse {
    let income = CategoryAmounts::from_pairs(income.iter().copied());
    let expense = CategoryAmounts::from_pairs(expense.iter().copied());
    PeriodStatsResponse {
        total_income: income.total(),
        total_expense: expense.total(),
        profit: income.total() - expense.total(),
        income_by_category: income,
        expense_by_category: expense,
        transaction_count: None,
    }
}

pub fn budget(name: &str, spent: f64, limit: Option<f64>) -> BudgetEntry {
    BudgetEntry {
        category_id: name.to_lowercase(),
        category_name: name.to_string(),
        spent,
        budget_limit: limit,
    }
}

fn trend_point(month: u32, income: f64, expense: f64) -> MonthlyTrendPoint {
    MonthlyTrendPoint {
        month,
        income,
        expense,
        profit: income - expense,
    }
}

impl StaticStatsProvider {
    /// A household with data for May and June 2025, Q2 2025 and the 2025 trend.
    pub fn household() -> Self {
        let mut provider = Self::default();
        provider.monthly.insert(
            (6, 2025),
            monthly(
                &[("Salary", 5000.0)],
                &[("Rent", 1500.0), ("Food", 1000.0), ("Transport", 700.0)],
                200.0,
            ),
        );
        provider.monthly.insert(
            (5, 2025),
            monthly(&[("Salary", 4800.0)], &[("Rent", 1500.0), ("Food", 900.0)], 0.0),
        );
        provider.periods.insert(
            ("2025-04-01".into(), "2025-06-30".into()),
            period(
                &[("Salary", 14000.0), ("Gifts", 1000.0)],
                &[("Rent", 4500.0), ("Food", 2900.0), ("Car", 7750.0)],
            ),
        );
        // deliberately out of order
        provider.trends.insert(
            2025,
            vec![
                trend_point(3, 1300.0, 1000.0),
                trend_point(1, 1200.0, 1000.0),
                trend_point(2, 950.0, 1000.0),
            ],
        );
        provider.budgets = vec![
            budget("Food", 950.0, Some(1000.0)),
            budget("Rent", 1500.0, Some(1500.0)),
            budget("Fun", 100.0, Some(1000.0)),
            budget("Misc", 40.0, None),
        ];
        provider
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl StatsProvider for StaticStatsProvider {
    fn monthly_stats(&self, month: u32, year: i32) -> ProviderFuture<'_, MonthlyStatsResponse> {
        self.record(format!("monthly {}/{}", month, year));
        let stats = self
            .monthly
            .get(&(month, year))
            .cloned()
            .unwrap_or_else(|| monthly(&[], &[], 0.0));
        Box::pin(async move { AppResult::Ok(stats) })
    }

    fn period_stats<'a>(
        &'a self,
        window: &'a PeriodWindow,
    ) -> ProviderFuture<'a, PeriodStatsResponse> {
        let key = (window.start_str(), window.end_str());
        self.record(format!("period {} {}", key.0, key.1));
        let stats = self
            .periods
            .get(&key)
            .cloned()
            .unwrap_or_else(|| period(&[], &[]));
        Box::pin(async move { AppResult::Ok(stats) })
    }

    fn monthly_trend(&self, year: i32) -> ProviderFuture<'_, Vec<MonthlyTrendPoint>> {
        self.record(format!("trend {}", year));
        let points = self.trends.get(&year).cloned().unwrap_or_default();
        Box::pin(async move { AppResult::Ok(points) })
    }

    fn budget_entries(&self, month: u32, year: i32) -> ProviderFuture<'_, Vec<BudgetEntry>> {
        self.record(format!("budget {}/{}", month, year));
        let entries = self.budgets.clone();
        Box::pin(async move { AppResult::Ok(entries) })
    }
}

/// A test client that sends requests through the full router, sharing state
/// between requests.
pub struct TestClient {
    app: Router,
}

impl TestClient {
    /// Create a new test client backed by [`StaticStatsProvider::household`].
    pub fn new() -> Self {
        Self::with_provider(Arc::new(StaticStatsProvider::household()))
    }

    pub fn with_provider(provider: Arc<dyn StatsProvider>) -> Self {
        Self::with_config(Config::default(), provider)
    }

    pub fn with_config(config: Config, provider: Arc<dyn StatsProvider>) -> Self {
        let (_, app) = server::build_app(config, provider, Arc::new(FixedClock(today())));
        Self { app }
    }

    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Make a GET request and return status, content type and body.
    pub async fn get_with_type(&self, uri: &str) -> (StatusCode, String, String) {
        let response = self
            .router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (
            status,
            content_type,
            String::from_utf8_lossy(&body).to_string(),
        )
    }

    /// Make a GET request and return status and body.
    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        let (status, _, body) = self.get_with_type(uri).await;
        (status, body)
    }

    /// Get JSON from an endpoint and parse it.
    pub async fn get_json(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let (status, body) = self.get(uri).await;
        let parsed = serde_json::from_str(&body).unwrap_or(serde_json::Value::Null);
        (status, parsed)
    }

    /// POST a raw JSON body and parse the JSON response.
    pub async fn post_json(&self, uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
        let response = self
            .router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let parsed = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, parsed)
    }
}
