//! Application-wide constants

pub const DEFAULT_CURRENCY: &str = "KES";
pub const RECEIPT_BRAND: &str = "KEJA ZETU";
pub const DEFAULT_COMMISSION_RATE: i32 = 10;
pub const TOP_DEBTORS_LIMIT: usize = 10;
pub const MONTHLY_REPORT_FILENAME: &str = "keja_zetu_monthly_report.csv";
pub const ARREARS_REPORT_FILENAME: &str = "keja_zetu_arrears_report.csv";
