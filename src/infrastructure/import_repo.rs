use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::dsl::{count_star, sum};
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use diesel::sql_types::Timestamptz;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::import::{
    ImportDetail, ImportFilter, ImportItemView, ImportOrder, ImportSummary, NewImportOrder,
};
use crate::domain::ports::ImportRepository;
use crate::domain::stats::{MonthlyTotal, StatusTotal, SupplierTotal};
use crate::domain::status::ImportStatus;
use crate::schema::{import_items, imports, products, suppliers, users};

use super::models::{
    ImportItemRow, ImportRow, MonthlyTotalRow, NewImportItemRow, NewImportRow, SupplierTotalRow,
};

const IMPORT_CODE_CONSTRAINT: &str = "imports_import_code_key";
const OWNER_FK_CONSTRAINT: &str = "imports_owner_user_id_fkey";
const SUPPLIER_FK_CONSTRAINT: &str = "imports_supplier_id_fkey";
const PRODUCT_FK_CONSTRAINT: &str = "import_items_product_id_fkey";

const MONTHLY_TOTALS_SQL: &str = "\
    SELECT to_char(date_trunc('month', created_at), 'YYYY-MM') AS month, \
           COUNT(*) AS import_count, \
           COALESCE(SUM(total_amount), 0) AS total_value \
    FROM imports \
    WHERE created_at >= $1 \
    GROUP BY date_trunc('month', created_at) \
    ORDER BY date_trunc('month', created_at) DESC";

const SUPPLIER_TOTALS_SQL: &str = "\
    SELECT s.id AS supplier_id, \
           s.name AS supplier_name, \
           s.country AS country, \
           COUNT(i.id) AS import_count, \
           COALESCE(SUM(i.total_amount), 0) AS total_value \
    FROM suppliers s \
    LEFT JOIN imports i ON i.supplier_id = s.id \
    GROUP BY s.id, s.name, s.country";

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

/// Translates the constraint violations an insert can legitimately hit.
///
/// A product violation cannot tell which line failed, so it is reported as
/// `items.product_id` rather than the indexed `items[i].…` used by input checks.
fn map_insert_error(e: diesel::result::Error) -> DomainError {
    if let diesel::result::Error::DatabaseError(kind, info) = &e {
        let constraint = info.constraint_name().unwrap_or_default();
        match (kind, constraint) {
            (DatabaseErrorKind::UniqueViolation, IMPORT_CODE_CONSTRAINT) => {
                return DomainError::Conflict;
            }
            (DatabaseErrorKind::ForeignKeyViolation, OWNER_FK_CONSTRAINT) => {
                return DomainError::validation("user_id", "caller is not a registered user");
            }
            (DatabaseErrorKind::ForeignKeyViolation, SUPPLIER_FK_CONSTRAINT) => {
                return DomainError::validation("supplier_id", "references an unknown supplier");
            }
            (DatabaseErrorKind::ForeignKeyViolation, PRODUCT_FK_CONSTRAINT) => {
                return DomainError::validation(
                    "items.product_id",
                    "references an unknown product",
                );
            }
            _ => {}
        }
    }
    e.into()
}

impl TryFrom<ImportRow> for ImportOrder {
    type Error = DomainError;

    fn try_from(row: ImportRow) -> Result<Self, Self::Error> {
        let status = row.status.parse::<ImportStatus>().map_err(|_| {
            DomainError::Internal(format!(
                "import {} has unknown status '{}'",
                row.id, row.status
            ))
        })?;
        Ok(ImportOrder {
            id: row.id,
            import_code: row.import_code,
            owner_user_id: row.owner_user_id,
            supplier_id: row.supplier_id,
            status,
            total_amount: row.total_amount,
            import_date: row.import_date,
            estimated_arrival: row.estimated_arrival,
            tracking_number: row.tracking_number,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

type SummaryRow = (ImportRow, String, Option<String>, String);

fn to_summary(
    (row, supplier_name, supplier_country, created_by): SummaryRow,
) -> Result<ImportSummary, DomainError> {
    Ok(ImportSummary {
        order: row.try_into()?,
        supplier_name,
        supplier_country,
        created_by,
    })
}

// ── Repository ────────────────────────────────────────────────────────────────

pub struct DieselImportRepository {
    pool: DbPool,
}

impl DieselImportRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl ImportRepository for DieselImportRepository {
    fn insert(&self, order: NewImportOrder) -> Result<ImportOrder, DomainError> {
        let mut conn = self.pool.get()?;

        let row = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                // 1. Insert the header
                let header: ImportRow = diesel::insert_into(imports::table)
                    .values(&NewImportRow {
                        import_code: order.import_code.clone(),
                        owner_user_id: order.owner_user_id,
                        supplier_id: order.supplier_id,
                        status: order.status.as_str().to_string(),
                        total_amount: order.total_amount.clone(),
                        import_date: order.import_date,
                        estimated_arrival: order.estimated_arrival,
                        notes: order.notes.clone(),
                    })
                    .returning(ImportRow::as_returning())
                    .get_result(conn)?;

                // 2. Insert the items against the new header id
                let new_items: Vec<NewImportItemRow> = order
                    .items
                    .iter()
                    .map(|i| NewImportItemRow {
                        import_id: header.id,
                        product_id: i.product_id,
                        quantity: i.quantity,
                        unit_price: i.unit_price.clone(),
                        line_total: i.line_total.clone(),
                    })
                    .collect();
                diesel::insert_into(import_items::table)
                    .values(&new_items)
                    .execute(conn)?;

                Ok(header)
            })
            .map_err(map_insert_error)?;

        row.try_into()
    }

    fn update_status(
        &self,
        id: i32,
        status: ImportStatus,
        tracking_number: Option<String>,
    ) -> Result<Option<ImportOrder>, DomainError> {
        let mut conn = self.pool.get()?;

        let row: Option<ImportRow> = diesel::update(imports::table.find(id))
            .set((
                imports::status.eq(status.as_str()),
                imports::tracking_number.eq(tracking_number),
                imports::updated_at.eq(Utc::now()),
            ))
            .returning(ImportRow::as_returning())
            .get_result(&mut conn)
            .optional()?;

        row.map(ImportOrder::try_from).transpose()
    }

    fn list(&self, filter: &ImportFilter) -> Result<Vec<ImportSummary>, DomainError> {
        let mut conn = self.pool.get()?;

        let mut query = imports::table
            .inner_join(suppliers::table)
            .inner_join(users::table)
            .select((
                ImportRow::as_select(),
                suppliers::name,
                suppliers::country,
                users::full_name,
            ))
            .order((imports::created_at.desc(), imports::id.desc()))
            .into_boxed();

        if let Some(status) = filter.status {
            query = query.filter(imports::status.eq(status.as_str()));
        }
        if let Some(supplier_id) = filter.supplier_id {
            query = query.filter(imports::supplier_id.eq(supplier_id));
        }
        if let Some(owner) = filter.owner_user_id {
            query = query.filter(imports::owner_user_id.eq(owner));
        }

        query
            .load::<SummaryRow>(&mut conn)?
            .into_iter()
            .map(to_summary)
            .collect()
    }

    fn find_detail(
        &self,
        id: i32,
        owner_user_id: Option<i32>,
    ) -> Result<Option<ImportDetail>, DomainError> {
        let mut conn = self.pool.get()?;

        let mut query = imports::table
            .inner_join(suppliers::table)
            .inner_join(users::table)
            .filter(imports::id.eq(id))
            .select((
                ImportRow::as_select(),
                suppliers::name,
                suppliers::country,
                users::full_name,
            ))
            .into_boxed();
        if let Some(owner) = owner_user_id {
            query = query.filter(imports::owner_user_id.eq(owner));
        }

        let Some(header) = query.first::<SummaryRow>(&mut conn).optional()? else {
            return Ok(None);
        };

        let items = import_items::table
            .inner_join(products::table)
            .filter(import_items::import_id.eq(id))
            .order(import_items::id.asc())
            .select((
                ImportItemRow::as_select(),
                products::name,
                products::description,
            ))
            .load::<(ImportItemRow, String, Option<String>)>(&mut conn)?;

        Ok(Some(ImportDetail {
            summary: to_summary(header)?,
            items: items
                .into_iter()
                .map(|(item, product_name, product_description)| ImportItemView {
                    id: item.id,
                    product_id: item.product_id,
                    product_name,
                    product_description,
                    quantity: item.quantity,
                    unit_price: item.unit_price,
                    line_total: item.line_total,
                })
                .collect(),
        }))
    }

    fn status_totals(&self) -> Result<Vec<StatusTotal>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = imports::table
            .group_by(imports::status)
            .select((imports::status, count_star(), sum(imports::total_amount)))
            .order(imports::status.asc())
            .load::<(String, i64, Option<BigDecimal>)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|(status, import_count, total_value)| StatusTotal {
                status,
                import_count,
                total_value: total_value.unwrap_or_default(),
            })
            .collect())
    }

    fn monthly_totals(&self, since: DateTime<Utc>) -> Result<Vec<MonthlyTotal>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = diesel::sql_query(MONTHLY_TOTALS_SQL)
            .bind::<Timestamptz, _>(since)
            .load::<MonthlyTotalRow>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|r| MonthlyTotal {
                month: r.month,
                import_count: r.import_count,
                total_value: r.total_value,
            })
            .collect())
    }

    fn supplier_totals(&self) -> Result<Vec<SupplierTotal>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = diesel::sql_query(SUPPLIER_TOTALS_SQL).load::<SupplierTotalRow>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|r| SupplierTotal {
                supplier_id: r.supplier_id,
                supplier_name: r.supplier_name,
                country: r.country,
                import_count: r.import_count,
                total_value: r.total_value,
            })
            .collect())
    }
}
