use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer, Nullable, Numeric, Text};

use crate::schema::{import_items, imports};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = imports)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ImportRow {
    pub id: i32,
    pub import_code: String,
    pub owner_user_id: i32,
    pub supplier_id: i32,
    pub status: String,
    pub total_amount: BigDecimal,
    pub import_date: NaiveDate,
    pub estimated_arrival: Option<NaiveDate>,
    pub tracking_number: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = imports)]
pub struct NewImportRow {
    pub import_code: String,
    pub owner_user_id: i32,
    pub supplier_id: i32,
    pub status: String,
    pub total_amount: BigDecimal,
    pub import_date: NaiveDate,
    pub estimated_arrival: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = import_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ImportItemRow {
    pub id: i32,
    pub import_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: BigDecimal,
    pub line_total: BigDecimal,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = import_items)]
pub struct NewImportItemRow {
    pub import_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: BigDecimal,
    pub line_total: BigDecimal,
}

// ── Aggregate rows (raw SQL) ─────────────────────────────────────────────────

#[derive(Debug, QueryableByName)]
pub struct MonthlyTotalRow {
    #[diesel(sql_type = Text)]
    pub month: String,
    #[diesel(sql_type = BigInt)]
    pub import_count: i64,
    #[diesel(sql_type = Numeric)]
    pub total_value: BigDecimal,
}

#[derive(Debug, QueryableByName)]
pub struct SupplierTotalRow {
    #[diesel(sql_type = Integer)]
    pub supplier_id: i32,
    #[diesel(sql_type = Text)]
    pub supplier_name: String,
    #[diesel(sql_type = Nullable<Text>)]
    pub country: Option<String>,
    #[diesel(sql_type = BigInt)]
    pub import_count: i64,
    #[diesel(sql_type = Numeric)]
    pub total_value: BigDecimal,
}
