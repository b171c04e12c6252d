//! Portfolio reporting: income, monthly collections, arrears and occupancy.
//!
//! Everything in here is a pure function over already-loaded rows, so the
//! same inputs always produce the same report.

pub mod aggregator;
pub mod export;

pub use aggregator::{
    arrears_report, dashboard, monthly_report, occupancy, occupancy_rate, property_stats, summarize, top_debtors, total_arrears,
    total_income, ArrearsEntry, DashboardStats, MonthKey, MonthlyTotal, Occupancy, PropertyStats, ReportSummary,
};
pub use export::{arrears_report_csv, monthly_report_csv};
