pub mod budget;
pub mod category_amounts;
pub mod profile_icon;
pub mod stats;

pub use budget::{BudgetBand, BudgetEntry, BudgetStatus};
pub use category_amounts::CategoryAmounts;
pub use profile_icon::{ProfileIcon, ProfileIconInfo};
pub use stats::{
    MonthlyStatsResponse, MonthlyTrendPoint, PeriodStats, PeriodStatsResponse, StatsPayload,
};
