use utoipa::OpenApi;

use crate::handlers::{health, imports};

#[derive(OpenApi)]
#[openapi(
    info(title = "Import Service", description = "Import orders, shipping status and dashboard aggregates"),
    paths(
        health::health,
        imports::create_import,
        imports::list_imports,
        imports::get_import,
        imports::update_status,
        imports::dashboard,
    ),
    components(schemas(
        imports::CreateImportRequest,
        imports::CreateImportItemRequest,
        imports::UpdateStatusRequest,
        imports::ImportResponse,
        imports::ImportSummaryResponse,
        imports::ImportDetailResponse,
        imports::ImportItemResponse,
        imports::DashboardResponse,
        imports::StatusTotalResponse,
        imports::MonthlyTotalResponse,
        imports::SupplierTotalResponse,
    )),
    tags(
        (name = "imports", description = "Import order lifecycle"),
        (name = "health", description = "Liveness probe"),
    )
)]
pub struct ApiDoc;
