use std::str::FromStr;

use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use utoipa::ToSchema;

use crate::application::import_service::SharedImportService;
use crate::domain::identity::Actor;
use crate::domain::import::{
    CreateImportInput, ImportDetail, ImportItemInput, ImportItemView, ImportOrder, ImportSummary,
};
use crate::domain::stats::{DashboardStats, MonthlyTotal, StatusTotal, SupplierTotal};
use crate::errors::AppError;

// ── Request / response DTOs ──────────────────────────────────────────────────

/// A decimal sent either as a string ("19.99") or a JSON number (19.99).
///
/// Kept as raw JSON text so numbers never pass through `f64`.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct DecimalInput(Box<RawValue>);

impl DecimalInput {
    fn parse(&self, field: String) -> Result<BigDecimal, AppError> {
        let raw = self.0.get().trim();
        let text = if raw.starts_with('"') {
            serde_json::from_str::<String>(raw)
                .map_err(|e| AppError::Validation {
                    field: field.clone(),
                    message: e.to_string(),
                })?
                .trim()
                .to_string()
        } else {
            raw.to_string()
        };
        BigDecimal::from_str(&text).map_err(|_| AppError::Validation {
            field,
            message: format!("'{}' is not a decimal number", text),
        })
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateImportItemRequest {
    pub product_id: i32,
    pub quantity: i32,
    #[schema(value_type = String, example = "19.99")]
    pub unit_price: DecimalInput,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateImportRequest {
    pub supplier_id: i32,
    pub import_date: NaiveDate,
    pub estimated_arrival: Option<NaiveDate>,
    pub notes: Option<String>,
    #[serde(default)]
    pub items: Vec<CreateImportItemRequest>,
}

impl CreateImportRequest {
    fn into_input(self) -> Result<CreateImportInput, AppError> {
        let items = self
            .items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                Ok(ImportItemInput {
                    product_id: item.product_id,
                    quantity: item.quantity,
                    unit_price: item.unit_price.parse(format!("items[{}].unit_price", i))?,
                })
            })
            .collect::<Result<Vec<_>, AppError>>()?;
        Ok(CreateImportInput {
            supplier_id: self.supplier_id,
            import_date: self.import_date,
            estimated_arrival: self.estimated_arrival,
            notes: self.notes,
            items,
        })
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    /// One of pending, processing, shipped, in_transit, customs, delivered, cancelled.
    pub status: String,
    /// Omit to clear the stored tracking number.
    pub tracking_number: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListImportsParams {
    pub status: Option<String>,
    pub supplier_id: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ImportResponse {
    pub id: i32,
    pub import_code: String,
    pub user_id: i32,
    pub supplier_id: i32,
    pub status: String,
    /// Decimal string, e.g. "179.91"
    pub total_amount: String,
    pub import_date: NaiveDate,
    pub estimated_arrival: Option<NaiveDate>,
    pub tracking_number: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ImportOrder> for ImportResponse {
    fn from(o: ImportOrder) -> Self {
        Self {
            id: o.id,
            import_code: o.import_code,
            user_id: o.owner_user_id,
            supplier_id: o.supplier_id,
            status: o.status.to_string(),
            total_amount: o.total_amount.to_string(),
            import_date: o.import_date,
            estimated_arrival: o.estimated_arrival,
            tracking_number: o.tracking_number,
            notes: o.notes,
            created_at: o.created_at,
            updated_at: o.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ImportSummaryResponse {
    #[serde(flatten)]
    pub import: ImportResponse,
    pub supplier_name: String,
    pub supplier_country: Option<String>,
    pub created_by: String,
}

impl From<ImportSummary> for ImportSummaryResponse {
    fn from(s: ImportSummary) -> Self {
        Self {
            import: s.order.into(),
            supplier_name: s.supplier_name,
            supplier_country: s.supplier_country,
            created_by: s.created_by,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ImportItemResponse {
    pub id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub product_description: Option<String>,
    pub quantity: i32,
    pub unit_price: String,
    pub line_total: String,
}

impl From<ImportItemView> for ImportItemResponse {
    fn from(i: ImportItemView) -> Self {
        Self {
            id: i.id,
            product_id: i.product_id,
            product_name: i.product_name,
            product_description: i.product_description,
            quantity: i.quantity,
            unit_price: i.unit_price.to_string(),
            line_total: i.line_total.to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ImportDetailResponse {
    #[serde(flatten)]
    pub summary: ImportSummaryResponse,
    pub items: Vec<ImportItemResponse>,
}

impl From<ImportDetail> for ImportDetailResponse {
    fn from(d: ImportDetail) -> Self {
        Self {
            summary: d.summary.into(),
            items: d.items.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusTotalResponse {
    pub status: String,
    pub count: i64,
    pub total_value: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MonthlyTotalResponse {
    /// Calendar month as YYYY-MM
    pub month: String,
    pub count: i64,
    pub total_value: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SupplierTotalResponse {
    pub supplier_id: i32,
    pub supplier_name: String,
    pub country: Option<String>,
    pub import_count: i64,
    pub total_value: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub by_status: Vec<StatusTotalResponse>,
    pub monthly_trend: Vec<MonthlyTotalResponse>,
    pub top_suppliers: Vec<SupplierTotalResponse>,
}

impl From<DashboardStats> for DashboardResponse {
    fn from(stats: DashboardStats) -> Self {
        Self {
            by_status: stats
                .by_status
                .into_iter()
                .map(|s: StatusTotal| StatusTotalResponse {
                    status: s.status,
                    count: s.import_count,
                    total_value: s.total_value.to_string(),
                })
                .collect(),
            monthly_trend: stats
                .monthly_trend
                .into_iter()
                .map(|m: MonthlyTotal| MonthlyTotalResponse {
                    month: m.month,
                    count: m.import_count,
                    total_value: m.total_value.to_string(),
                })
                .collect(),
            top_suppliers: stats
                .top_suppliers
                .into_iter()
                .map(|s: SupplierTotal| SupplierTotalResponse {
                    supplier_id: s.supplier_id,
                    supplier_name: s.supplier_name,
                    country: s.country,
                    import_count: s.import_count,
                    total_value: s.total_value.to_string(),
                })
                .collect(),
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /imports
///
/// Creates an import order with its items in a single transaction. The
/// total is computed from the submitted unit prices and fixed from then on.
#[utoipa::path(
    post,
    path = "/imports",
    request_body = CreateImportRequest,
    responses(
        (status = 201, description = "Import created", body = ImportResponse),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Missing or invalid token"),
        (status = 409, description = "No unique import code could be allocated"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "imports"
)]
pub async fn create_import(
    service: web::Data<SharedImportService>,
    actor: Actor,
    body: web::Json<CreateImportRequest>,
) -> Result<HttpResponse, AppError> {
    let input = body.into_inner().into_input()?;

    let created = web::block(move || service.create_import(&actor, input))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(ImportResponse::from(created)))
}

/// GET /imports
///
/// Newest first. Non-admin callers only ever see their own imports.
#[utoipa::path(
    get,
    path = "/imports",
    params(
        ("status" = Option<String>, Query, description = "Only imports in this status"),
        ("supplier_id" = Option<i32>, Query, description = "Only imports from this supplier"),
    ),
    responses(
        (status = 200, description = "Matching imports", body = [ImportSummaryResponse]),
        (status = 400, description = "Unknown status or bad supplier id"),
        (status = 401, description = "Missing or invalid token"),
    ),
    tag = "imports"
)]
pub async fn list_imports(
    service: web::Data<SharedImportService>,
    actor: Actor,
    query: web::Query<ListImportsParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();

    let rows = web::block(move || {
        service.list_imports(&actor, params.status.as_deref(), params.supplier_id)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    let body: Vec<ImportSummaryResponse> = rows.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /imports/{id}
#[utoipa::path(
    get,
    path = "/imports/{id}",
    params(("id" = i32, Path, description = "Import id")),
    responses(
        (status = 200, description = "Import with its items", body = ImportDetailResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Import not found"),
    ),
    tag = "imports"
)]
pub async fn get_import(
    service: web::Data<SharedImportService>,
    actor: Actor,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let detail = web::block(move || service.get_import(&actor, id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(ImportDetailResponse::from(detail)))
}

/// PUT /imports/{id}/status
///
/// Admin only. Any known status may be set from any other.
#[utoipa::path(
    put,
    path = "/imports/{id}/status",
    params(("id" = i32, Path, description = "Import id")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Updated import", body = ImportResponse),
        (status = 400, description = "Unknown status"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Import not found"),
    ),
    tag = "imports"
)]
pub async fn update_status(
    service: web::Data<SharedImportService>,
    actor: Actor,
    path: web::Path<i32>,
    body: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let body = body.into_inner();

    let updated = web::block(move || {
        service.update_status(&actor, id, &body.status, body.tracking_number)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(ImportResponse::from(updated)))
}

/// GET /imports/stats/dashboard
#[utoipa::path(
    get,
    path = "/imports/stats/dashboard",
    responses(
        (status = 200, description = "Status breakdown, monthly trend and top suppliers", body = DashboardResponse),
        (status = 401, description = "Missing or invalid token"),
    ),
    tag = "imports"
)]
pub async fn dashboard(
    service: web::Data<SharedImportService>,
    _actor: Actor,
) -> Result<HttpResponse, AppError> {
    let stats = web::block(move || service.dashboard(Utc::now()))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(DashboardResponse::from(stats)))
}
