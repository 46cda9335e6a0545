use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{
    BudgetEntry, MonthlyStatsResponse, MonthlyTrendPoint, PeriodStatsResponse, StatsPayload,
};
use crate::period::PeriodWindow;

pub type ProviderFuture<'a, T> = Pin<Box<dyn Future<Output = AppResult<T>> + Send + 'a>>;

/// Source of raw per-category totals. The ledger API in production, an
/// in-memory fixture in tests.
pub trait StatsProvider: Send + Sync {
    fn monthly_stats(&self, month: u32, year: i32) -> ProviderFuture<'_, MonthlyStatsResponse>;

    fn period_stats<'a>(&'a self, window: &'a PeriodWindow)
        -> ProviderFuture<'a, PeriodStatsResponse>;

    fn monthly_trend(&self, year: i32) -> ProviderFuture<'_, Vec<MonthlyTrendPoint>>;

    fn budget_entries(&self, month: u32, year: i32) -> ProviderFuture<'_, Vec<BudgetEntry>>;
}

/// Fetch the payload shape that matches the window type.
pub async fn fetch_payload(
    provider: &dyn StatsProvider,
    window: &PeriodWindow,
) -> AppResult<StatsPayload> {
    if window.is_monthly() {
        let stats = provider.monthly_stats(window.month(), window.year()).await?;
        Ok(StatsPayload::Monthly(stats))
    } else {
        let stats = provider.period_stats(window).await?;
        Ok(StatsPayload::Period(stats))
    }
}

/// [`StatsProvider`] backed by the remote ledger API.
pub struct HttpStatsProvider {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpStatsProvider {
    pub fn new(base_url: &str, token: Option<String>, timeout_secs: u64) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            &config.stats_api_url,
            config.api_token.clone(),
            config.request_timeout_secs,
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> AppResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, ?query, "Fetching from ledger API");

        let mut request = self.client.get(&url).query(query);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(AppError::UpstreamStatus {
                status: response.status().as_u16(),
                path: path.to_string(),
            });
        }

        let body = response.json::<T>().await?;
        info!(path = %path, "Fetched from ledger API");
        Ok(body)
    }
}

impl StatsProvider for HttpStatsProvider {
    fn monthly_stats(&self, month: u32, year: i32) -> ProviderFuture<'_, MonthlyStatsResponse> {
        Box::pin(async move {
            self.get_json(
                "/dashboard/stats",
                &[("month", month.to_string()), ("year", year.to_string())],
            )
            .await
        })
    }

    fn period_stats<'a>(
        &'a self,
        window: &'a PeriodWindow,
    ) -> ProviderFuture<'a, PeriodStatsResponse> {
        Box::pin(async move {
            self.get_json(
                "/dashboard/period-stats",
                &[
                    ("start_date", window.start_str()),
                    ("end_date", window.end_str()),
                ],
            )
            .await
        })
    }

    fn monthly_trend(&self, year: i32) -> ProviderFuture<'_, Vec<MonthlyTrendPoint>> {
        Box::pin(async move {
            self.get_json("/dashboard/monthly-trend", &[("year", year.to_string())])
                .await
        })
    }

    fn budget_entries(&self, month: u32, year: i32) -> ProviderFuture<'_, Vec<BudgetEntry>> {
        Box::pin(async move {
            self.get_json(
                "/budget/status",
                &[("month", month.to_string()), ("year", year.to_string())],
            )
            .await
        })
    }
}
