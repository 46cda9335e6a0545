use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodKind {
    Monthly,
    Quarterly,
    HalfYearly,
    Annual,
    Custom,
}

impl PeriodKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::HalfYearly => "half_yearly",
            Self::Annual => "annual",
            Self::Custom => "custom",
        }
    }
}

/// A period selection as made in the UI, before resolution.
///
/// Each variant carries exactly the parameters its window needs, so a
/// quarterly selection without a quarter cannot be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodSelection {
    Monthly { month: u32, year: i32 },
    Quarterly { quarter: u32, year: i32 },
    HalfYearly { half: u32, year: i32 },
    Annual { year: i32 },
    Custom {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
}

/// A resolved, inclusive date window with a display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodWindow {
    pub kind: PeriodKind,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub label: String,
}

impl PeriodSelection {
    pub fn kind(&self) -> PeriodKind {
        match self {
            Self::Monthly { .. } => PeriodKind::Monthly,
            Self::Quarterly { .. } => PeriodKind::Quarterly,
            Self::HalfYearly { .. } => PeriodKind::HalfYearly,
            Self::Annual { .. } => PeriodKind::Annual,
            Self::Custom { .. } => PeriodKind::Custom,
        }
    }

    /// Resolve to a concrete window.
    ///
    /// Out-of-range month/quarter/half values and custom ranges with a
    /// missing or inverted endpoint yield [`AppError::InvalidWindow`].
    pub fn resolve(&self) -> AppResult<PeriodWindow> {
        match *self {
            Self::Monthly { month, year } => {
                check_range("month", month, 12)?;
                let start = first_of_month(year, month)?;
                Ok(PeriodWindow {
                    kind: PeriodKind::Monthly,
                    start,
                    end: month_end(start),
                    label: start.format("%b %Y").to_string(),
                })
            }
            Self::Quarterly { quarter, year } => {
                check_range("quarter", quarter, 4)?;
                let first = (quarter - 1) * 3 + 1;
                span_months(
                    PeriodKind::Quarterly,
                    year,
                    first,
                    first + 2,
                    format!("Q{} {}", quarter, year),
                )
            }
            Self::HalfYearly { half, year } => {
                check_range("half", half, 2)?;
                let first = (half - 1) * 6 + 1;
                span_months(
                    PeriodKind::HalfYearly,
                    year,
                    first,
                    first + 5,
                    format!("H{} {}", half, year),
                )
            }
            Self::Annual { year } => {
                span_months(PeriodKind::Annual, year, 1, 12, year.to_string())
            }
            Self::Custom { start, end } => match (start, end) {
                (Some(start), Some(end)) if start <= end => Ok(PeriodWindow::custom(start, end)),
                (Some(start), Some(end)) => Err(AppError::InvalidWindow(format!(
                    "start {} is after end {}",
                    start, end
                ))),
                _ => Err(AppError::InvalidWindow(
                    "custom period needs both a start and an end date".into(),
                )),
            },
        }
    }
}

impl PeriodWindow {
    pub fn month_of(date: NaiveDate) -> Self {
        let start = month_start(date);
        Self {
            kind: PeriodKind::Monthly,
            start,
            end: month_end(start),
            label: start.format("%b %Y").to_string(),
        }
    }

    fn custom(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            kind: PeriodKind::Custom,
            start,
            end,
            label: format!(
                "{} to {}",
                start.format("%Y-%m-%d"),
                end.format("%Y-%m-%d")
            ),
        }
    }

    pub fn is_monthly(&self) -> bool {
        self.kind == PeriodKind::Monthly
    }

    pub fn month(&self) -> u32 {
        self.start.month()
    }

    pub fn year(&self) -> i32 {
        self.start.year()
    }

    pub fn start_str(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    pub fn end_str(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }

    /// The window of the same type immediately before this one.
    /// Custom windows shift back by their own length.
    pub fn previous(&self) -> AppResult<Self> {
        let out_of_range =
            || AppError::InvalidWindow(format!("no period before {}", self.label));
        let months_back = |months: i32| {
            let prev = shift_months(self.start, -months);
            if prev < self.start {
                Ok(prev)
            } else {
                Err(out_of_range())
            }
        };

        let selection = match self.kind {
            PeriodKind::Monthly => {
                let prev = months_back(1)?;
                PeriodSelection::Monthly {
                    month: prev.month(),
                    year: prev.year(),
                }
            }
            PeriodKind::Quarterly => {
                let prev = months_back(3)?;
                PeriodSelection::Quarterly {
                    quarter: (prev.month() - 1) / 3 + 1,
                    year: prev.year(),
                }
            }
            PeriodKind::HalfYearly => {
                let prev = months_back(6)?;
                PeriodSelection::HalfYearly {
                    half: (prev.month() - 1) / 6 + 1,
                    year: prev.year(),
                }
            }
            PeriodKind::Annual => PeriodSelection::Annual {
                year: self.year().checked_sub(1).ok_or_else(out_of_range)?,
            },
            PeriodKind::Custom => {
                let length = self.end - self.start + Duration::days(1);
                let start = self.start.checked_sub_signed(length);
                let end = self.end.checked_sub_signed(length);
                if start.is_none() || end.is_none() {
                    return Err(out_of_range());
                }
                PeriodSelection::Custom { start, end }
            }
        };
        selection.resolve()
    }
}

fn check_range(name: &str, value: u32, max: u32) -> AppResult<()> {
    if (1..=max).contains(&value) {
        Ok(())
    } else {
        Err(AppError::InvalidWindow(format!(
            "{} must be between 1 and {}, got {}",
            name, max, value
        )))
    }
}

fn first_of_month(year: i32, month: u32) -> AppResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::InvalidWindow(format!("no such month {}-{:02}", year, month)))
}

fn span_months(
    kind: PeriodKind,
    year: i32,
    first_month: u32,
    last_month: u32,
    label: String,
) -> AppResult<PeriodWindow> {
    let start = first_of_month(year, first_month)?;
    let end = month_end(first_of_month(year, last_month)?);
    Ok(PeriodWindow {
        kind,
        start,
        end,
        label,
    })
}

fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn month_end(date: NaiveDate) -> NaiveDate {
    shift_months(month_start(date), 1) - Duration::days(1)
}

fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let total_months = date.year() * 12 + date.month() as i32 - 1 + months;
    let new_year = total_months.div_euclid(12);
    let new_month = (total_months.rem_euclid(12) + 1) as u32;
    NaiveDate::from_ymd_opt(new_year, new_month, 1).unwrap_or(date)
}
