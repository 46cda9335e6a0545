use crate::config::BudgetThresholds;
use crate::error::{AppError, AppResult};
use crate::filters::round_to;
use crate::models::{BudgetBand, BudgetEntry, BudgetStatus};

/// Percentage consumed and the status band for one category.
///
/// `limit` must be positive and `spent` non-negative; anything else is a
/// caller bug and is rejected.
pub fn classify(
    spent: f64,
    limit: f64,
    thresholds: &BudgetThresholds,
) -> AppResult<(f64, BudgetBand)> {
    if !limit.is_finite() || limit <= 0.0 {
        return Err(AppError::InvalidInput(format!(
            "budget limit must be positive, got {}",
            limit
        )));
    }
    if !spent.is_finite() || spent < 0.0 {
        return Err(AppError::InvalidInput(format!(
            "spent must be non-negative, got {}",
            spent
        )));
    }

    let percentage = spent / limit * 100.0;
    let band = if spent > limit {
        BudgetBand::Exceeded
    } else if percentage >= thresholds.warning_pct {
        BudgetBand::Warning
    } else {
        BudgetBand::Ok
    };
    Ok((percentage, band))
}

pub fn classify_entry(
    entry: &BudgetEntry,
    thresholds: &BudgetThresholds,
) -> AppResult<BudgetStatus> {
    let limit = entry.budget_limit.unwrap_or(0.0);
    let (percentage, status) = classify(entry.spent, limit, thresholds)?;
    tracing::debug!(
        category = %entry.category_name,
        percentage,
        status = status.as_str(),
        "Classified budget"
    );
    Ok(BudgetStatus {
        category_id: entry.category_id.clone(),
        category_name: entry.category_name.clone(),
        spent: entry.spent,
        limit,
        percentage: round_to(percentage, 2),
        status,
        remaining: limit - entry.spent,
    })
}

/// Classify every entry that has a positive limit, in input order.
/// Entries without one have no budget and are skipped.
pub fn classify_all(
    entries: &[BudgetEntry],
    thresholds: &BudgetThresholds,
) -> AppResult<Vec<BudgetStatus>> {
    entries
        .iter()
        .filter(|e| match e.budget_limit {
            Some(limit) if limit > 0.0 => true,
            _ => {
                tracing::debug!(category = %e.category_name, "Skipping category without budget");
                false
            }
        })
        .map(|e| classify_entry(e, thresholds))
        .collect()
}

/// Statuses at or above the alert threshold, most consumed first.
pub fn alerts(statuses: &[BudgetStatus], thresholds: &BudgetThresholds) -> Vec<BudgetStatus> {
    let mut hot: Vec<BudgetStatus> = statuses
        .iter()
        .filter(|s| s.percentage >= thresholds.alert_pct)
        .cloned()
        .collect();
    hot.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
    hot
}
