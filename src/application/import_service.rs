use chrono::{DateTime, Months, Utc};

use crate::domain::errors::DomainError;
use crate::domain::identity::Actor;
use crate::domain::import::{
    order_total, CreateImportInput, ImportDetail, ImportFilter, ImportOrder, ImportSummary,
    NewImportItem, NewImportOrder, CURRENCY_SCALE, MAX_TRACKING_NUMBER_LEN,
};
use crate::domain::import_code::generate_import_code;
use crate::domain::ports::ImportRepository;
use crate::domain::stats::{rank_top_suppliers, DashboardStats, TOP_SUPPLIER_LIMIT, TREND_MONTHS};
use crate::domain::status::ImportStatus;

/// How many fresh import codes to try before giving up on a collision.
pub const MAX_CODE_ATTEMPTS: usize = 5;

pub struct ImportService<R> {
    repo: R,
}

/// The service as registered with the HTTP layer.
pub type SharedImportService = ImportService<Box<dyn ImportRepository>>;

impl<R: ImportRepository> ImportService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_import(
        &self,
        actor: &Actor,
        input: CreateImportInput,
    ) -> Result<ImportOrder, DomainError> {
        input.validate()?;

        let total_amount = order_total(&input.items);
        let items: Vec<NewImportItem> = input
            .items
            .iter()
            .map(|i| NewImportItem {
                product_id: i.product_id,
                quantity: i.quantity,
                unit_price: i.unit_price.with_scale(CURRENCY_SCALE),
                line_total: i.line_total(),
            })
            .collect();

        let mut rng = rand::thread_rng();
        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let order = NewImportOrder {
                import_code: generate_import_code(Utc::now(), &mut rng),
                owner_user_id: actor.id,
                supplier_id: input.supplier_id,
                status: ImportStatus::Pending,
                total_amount: total_amount.clone(),
                import_date: input.import_date,
                estimated_arrival: input.estimated_arrival,
                notes: input.notes.clone(),
                items: items.clone(),
            };
            match self.repo.insert(order) {
                Ok(created) => {
                    log::info!(
                        "Created import {} (id={}) for user {} with {} item(s), total {}",
                        created.import_code,
                        created.id,
                        actor.id,
                        items.len(),
                        created.total_amount
                    );
                    return Ok(created);
                }
                Err(DomainError::Conflict) => {
                    log::warn!(
                        "Import code collision on attempt {}/{}",
                        attempt,
                        MAX_CODE_ATTEMPTS
                    );
                }
                Err(e) => return Err(e),
            }
        }
        Err(DomainError::Conflict)
    }

    /// Sets any of the known statuses regardless of the current one.
    ///
    /// An absent or blank tracking number clears the stored value.
    pub fn update_status(
        &self,
        actor: &Actor,
        id: i32,
        status: &str,
        tracking_number: Option<String>,
    ) -> Result<ImportOrder, DomainError> {
        if !actor.role.can_update_status() {
            return Err(DomainError::Forbidden);
        }
        let status: ImportStatus = status.parse()?;
        let tracking_number = tracking_number
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        if let Some(t) = &tracking_number {
            if t.chars().count() > MAX_TRACKING_NUMBER_LEN {
                return Err(DomainError::validation(
                    "tracking_number",
                    format!("must be at most {} characters", MAX_TRACKING_NUMBER_LEN),
                ));
            }
        }

        let updated = self
            .repo
            .update_status(id, status, tracking_number)?
            .ok_or(DomainError::NotFound)?;
        log::info!(
            "Import {} moved to {} by user {}",
            updated.import_code,
            updated.status,
            actor.id
        );
        Ok(updated)
    }

    pub fn list_imports(
        &self,
        actor: &Actor,
        status: Option<&str>,
        supplier_id: Option<i32>,
    ) -> Result<Vec<ImportSummary>, DomainError> {
        let status = status.map(str::parse::<ImportStatus>).transpose()?;
        if matches!(supplier_id, Some(id) if id <= 0) {
            return Err(DomainError::validation(
                "supplier_id",
                "must be a positive integer",
            ));
        }
        self.repo.list(&ImportFilter {
            status,
            supplier_id,
            owner_user_id: actor.owner_scope(),
        })
    }

    /// Orders owned by someone else are reported exactly like missing ones.
    pub fn get_import(&self, actor: &Actor, id: i32) -> Result<ImportDetail, DomainError> {
        self.repo
            .find_detail(id, actor.owner_scope())?
            .ok_or(DomainError::NotFound)
    }

    pub fn dashboard(&self, now: DateTime<Utc>) -> Result<DashboardStats, DomainError> {
        let since = now
            .checked_sub_months(Months::new(TREND_MONTHS))
            .ok_or_else(|| DomainError::Internal("trend window out of range".to_string()))?;
        Ok(DashboardStats {
            by_status: self.repo.status_totals()?,
            monthly_trend: self.repo.monthly_totals(since)?,
            top_suppliers: rank_top_suppliers(self.repo.supplier_totals()?, TOP_SUPPLIER_LIMIT),
        })
    }
}
