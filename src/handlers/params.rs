use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::period::{PeriodSelection, PeriodWindow};

/// Period selector state as sent by the dashboard.
#[derive(Debug, Default, Deserialize)]
pub struct PeriodParams {
    pub period: Option<String>,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub quarter: Option<u32>,
    pub half: Option<u32>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// Identifies one dashboard view for stale-response suppression.
    pub view: Option<String>,
}

impl PeriodParams {
    /// Build the typed selection. Missing month/year default to `today`;
    /// a quarter or half must be given explicitly.
    pub fn selection(&self, today: NaiveDate) -> AppResult<PeriodSelection> {
        let year = self.year.unwrap_or(today.year());
        match self.period.as_deref().unwrap_or("monthly") {
            "monthly" => Ok(PeriodSelection::Monthly {
                month: self.month.unwrap_or(today.month()),
                year,
            }),
            "quarterly" => self
                .quarter
                .map(|quarter| PeriodSelection::Quarterly { quarter, year })
                .ok_or_else(|| AppError::InvalidWindow("quarterly period needs a quarter".into())),
            "half_yearly" | "half-yearly" => self
                .half
                .map(|half| PeriodSelection::HalfYearly { half, year })
                .ok_or_else(|| AppError::InvalidWindow("half-yearly period needs a half".into())),
            "annual" | "yearly" => Ok(PeriodSelection::Annual { year }),
            "custom" => Ok(PeriodSelection::Custom {
                start: parse_date(self.start_date.as_deref()),
                end: parse_date(self.end_date.as_deref()),
            }),
            other => Err(AppError::InvalidWindow(format!(
                "unknown period type '{}'",
                other
            ))),
        }
    }

    /// Resolve to a window, or the month containing `today` if the
    /// selection is incomplete or invalid. The flag is `true` on fallback.
    pub fn resolve_window(&self, today: NaiveDate) -> (PeriodWindow, bool) {
        let resolved = self.selection(today).and_then(|s| {
            tracing::debug!(kind = s.kind().as_str(), "Resolving period selection");
            s.resolve()
        });
        match resolved {
            Ok(window) => (window, false),
            Err(e) => {
                tracing::warn!("{}; falling back to current month", e);
                (PeriodWindow::month_of(today), true)
            }
        }
    }
}

fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
    raw.filter(|s| !s.is_empty())
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
}

#[derive(Debug, Default, Deserialize)]
pub struct MonthParams {
    pub month: Option<u32>,
    pub year: Option<i32>,
}

impl MonthParams {
    pub fn resolve(&self, today: NaiveDate) -> AppResult<(u32, i32)> {
        let month = self.month.unwrap_or(today.month());
        if !(1..=12).contains(&month) {
            return Err(AppError::Validation(format!(
                "month must be between 1 and 12, got {}",
                month
            )));
        }
        Ok((month, self.year.unwrap_or(today.year())))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct YearParams {
    pub year: Option<i32>,
}
