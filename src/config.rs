use std::env;
use std::str::FromStr;

/// Default chart colors, cycled when there are more categories than colors.
pub const DEFAULT_PALETTE: &[&str] = &[
    "#3B82F6", "#10B981", "#F59E0B", "#EF4444", "#8B5CF6", "#EC4899", "#14B8A6", "#F97316",
];

/// Budget consumption thresholds, in percent of the limit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetThresholds {
    /// At or above this share a category is flagged `warning`.
    pub warning_pct: f64,
    /// At or above this share a category shows up in the alert ticker.
    pub alert_pct: f64,
}

impl Default for BudgetThresholds {
    fn default() -> Self {
        Self {
            warning_pct: 80.0,
            alert_pct: 90.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Base URL of the ledger API, e.g. `https://example.org/api`.
    pub stats_api_url: String,
    pub api_token: Option<String>,
    pub request_timeout_secs: u64,
    pub thresholds: BudgetThresholds,
    pub palette: Vec<String>,
    pub currency: String,
    pub locale: String,
    pub cors_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 7171,
            stats_api_url: "http://127.0.0.1:8001/api".into(),
            api_token: None,
            request_timeout_secs: 30,
            thresholds: BudgetThresholds::default(),
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            currency: "USD".into(),
            locale: "en-US".into(),
            cors_origins: vec!["*".into()],
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let palette = env::var("RADAR_PALETTE")
            .map(|v| split_list(&v))
            .ok()
            .filter(|colors| !colors.is_empty())
            .unwrap_or(defaults.palette);

        Self {
            host: env::var("RADAR_HOST").unwrap_or(defaults.host),
            port: parse_var("RADAR_PORT", defaults.port),
            stats_api_url: env::var("RADAR_STATS_API_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.stats_api_url),
            api_token: env::var("RADAR_API_TOKEN").ok().filter(|t| !t.is_empty()),
            request_timeout_secs: parse_var(
                "RADAR_REQUEST_TIMEOUT_SECS",
                defaults.request_timeout_secs,
            ),
            thresholds: BudgetThresholds {
                warning_pct: parse_var("RADAR_WARNING_THRESHOLD", defaults.thresholds.warning_pct),
                alert_pct: parse_var("RADAR_ALERT_THRESHOLD", defaults.thresholds.alert_pct),
            },
            palette,
            currency: env::var("RADAR_CURRENCY").unwrap_or(defaults.currency),
            locale: env::var("RADAR_LOCALE").unwrap_or(defaults.locale),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|v| split_list(&v))
                .unwrap_or(defaults.cors_origins),
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: FromStr + Copy + std::fmt::Display>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring unparsable {}={:?}, using {}", name, raw, default);
            default
        }),
        Err(_) => default,
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
