use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::config::Config;
use crate::services::dashboard::DashboardSnapshot;
use crate::services::latest::ViewRegistry;
use crate::services::stats_client::StatsProvider;

/// Source of "today", so period fallbacks are reproducible in tests.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always returns the same date.
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub provider: Arc<dyn StatsProvider>,
    pub views: Arc<ViewRegistry<DashboardSnapshot>>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(config: Config, provider: Arc<dyn StatsProvider>, clock: Arc<dyn Clock>) -> Self {
        Self {
            config: Arc::new(config),
            provider,
            views: Arc::new(ViewRegistry::new()),
            clock,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }
}
