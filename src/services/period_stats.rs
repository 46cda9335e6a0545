use crate::models::{PeriodStats, StatsPayload};
use crate::period::PeriodWindow;

/// Fold either provider response into [`PeriodStats`].
///
/// Monthly payloads pass their carryover fields through. Period payloads
/// have no carryover, so opening balance and loan are zero and the closing
/// balance is the non-negative part of profit.
pub fn normalize(window: PeriodWindow, payload: StatsPayload) -> PeriodStats {
    if window.is_monthly() != matches!(payload, StatsPayload::Monthly(_)) {
        tracing::warn!(
            kind = window.kind.as_str(),
            "Stats payload shape does not match window type"
        );
    }

    match payload {
        StatsPayload::Monthly(m) => PeriodStats {
            window,
            total_income: m.total_income,
            total_expense: m.total_expense,
            has_deficit: m.profit < 0.0,
            profit: m.profit,
            income_by_category: m.income_by_category,
            expense_by_category: m.expense_by_category,
            opening_balance: m.opening_balance,
            closing_balance: m.closing_balance,
            loan_amount: m.loan_amount,
            transaction_count: m.transaction_count,
        },
        StatsPayload::Period(p) => PeriodStats {
            window,
            total_income: p.total_income,
            total_expense: p.total_expense,
            has_deficit: p.profit < 0.0,
            profit: p.profit,
            income_by_category: p.income_by_category,
            expense_by_category: p.expense_by_category,
            opening_balance: 0.0,
            closing_balance: p.profit.max(0.0),
            loan_amount: 0.0,
            transaction_count: p.transaction_count,
        },
    }
}
