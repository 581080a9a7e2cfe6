use chrono::{DateTime, Utc};

use super::errors::DomainError;
use super::import::{ImportDetail, ImportFilter, ImportOrder, ImportSummary, NewImportOrder};
use super::stats::{MonthlyTotal, StatusTotal, SupplierTotal};
use super::status::ImportStatus;

pub trait ImportRepository: Send + Sync + 'static {
    /// Persists header and items atomically.
    /// Returns `DomainError::Conflict` when the import code is already taken.
    fn insert(&self, order: NewImportOrder) -> Result<ImportOrder, DomainError>;

    fn update_status(
        &self,
        id: i32,
        status: ImportStatus,
        tracking_number: Option<String>,
    ) -> Result<Option<ImportOrder>, DomainError>;

    fn list(&self, filter: &ImportFilter) -> Result<Vec<ImportSummary>, DomainError>;

    /// `owner_user_id` restricts the lookup to one creator's orders.
    fn find_detail(
        &self,
        id: i32,
        owner_user_id: Option<i32>,
    ) -> Result<Option<ImportDetail>, DomainError>;

    /// Count and value per status present, across every order.
    fn status_totals(&self) -> Result<Vec<StatusTotal>, DomainError>;

    /// Per calendar month for orders created at or after `since`, newest month first.
    fn monthly_totals(&self, since: DateTime<Utc>) -> Result<Vec<MonthlyTotal>, DomainError>;

    /// One entry per supplier, including suppliers without any order.
    fn supplier_totals(&self) -> Result<Vec<SupplierTotal>, DomainError>;
}

impl<R: ImportRepository + ?Sized> ImportRepository for Box<R> {
    fn insert(&self, order: NewImportOrder) -> Result<ImportOrder, DomainError> {
        (**self).insert(order)
    }

    fn update_status(
        &self,
        id: i32,
        status: ImportStatus,
        tracking_number: Option<String>,
    ) -> Result<Option<ImportOrder>, DomainError> {
        (**self).update_status(id, status, tracking_number)
    }

    fn list(&self, filter: &ImportFilter) -> Result<Vec<ImportSummary>, DomainError> {
        (**self).list(filter)
    }

    fn find_detail(
        &self,
        id: i32,
        owner_user_id: Option<i32>,
    ) -> Result<Option<ImportDetail>, DomainError> {
        (**self).find_detail(id, owner_user_id)
    }

    fn status_totals(&self) -> Result<Vec<StatusTotal>, DomainError> {
        (**self).status_totals()
    }

    fn monthly_totals(&self, since: DateTime<Utc>) -> Result<Vec<MonthlyTotal>, DomainError> {
        (**self).monthly_totals(since)
    }

    fn supplier_totals(&self) -> Result<Vec<SupplierTotal>, DomainError> {
        (**self).supplier_totals()
    }
}
