pub mod budget_status;
pub mod carryover;
pub mod dashboard;
pub mod latest;
pub mod line_chart;
pub mod period_stats;
pub mod pie_chart;
pub mod stats_client;
