use std::cmp::Ordering;

use bigdecimal::BigDecimal;

pub const TOP_SUPPLIER_LIMIT: usize = 5;
pub const TREND_MONTHS: u32 = 12;

#[derive(Debug, Clone, PartialEq)]
pub struct StatusTotal {
    pub status: String,
    pub import_count: i64,
    pub total_value: BigDecimal,
}

/// Orders created in one calendar month, `month` formatted as `YYYY-MM`.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyTotal {
    pub month: String,
    pub import_count: i64,
    pub total_value: BigDecimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SupplierTotal {
    pub supplier_id: i32,
    pub supplier_name: String,
    pub country: Option<String>,
    pub import_count: i64,
    pub total_value: BigDecimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub by_status: Vec<StatusTotal>,
    pub monthly_trend: Vec<MonthlyTotal>,
    pub top_suppliers: Vec<SupplierTotal>,
}

/// Ranks suppliers by total value, highest first, keeping at most `limit`.
/// Ties are broken by ascending supplier id.
pub fn rank_top_suppliers(mut totals: Vec<SupplierTotal>, limit: usize) -> Vec<SupplierTotal> {
    totals.sort_by(|a, b| match b.total_value.cmp(&a.total_value) {
        Ordering::Equal => a.supplier_id.cmp(&b.supplier_id),
        other => other,
    });
    totals.truncate(limit);
    totals
}
