//! In-memory `ImportRepository` used by service and handler tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};

use crate::domain::errors::DomainError;
use crate::domain::import::{
    ImportDetail, ImportFilter, ImportItemView, ImportOrder, ImportSummary, NewImportItem,
    NewImportOrder,
};
use crate::domain::ports::ImportRepository;
use crate::domain::stats::{MonthlyTotal, StatusTotal, SupplierTotal};
use crate::domain::status::ImportStatus;

#[derive(Default)]
struct State {
    orders: Vec<(ImportOrder, Vec<NewImportItem>)>,
    attempted_codes: Vec<String>,
    conflicts_remaining: usize,
}

/// Clones share the same underlying orders.
#[derive(Clone)]
pub struct InMemoryImportRepository {
    suppliers: HashMap<i32, (String, Option<String>)>,
    users: HashMap<i32, String>,
    products: HashMap<i32, String>,
    state: Arc<Mutex<State>>,
}

impl InMemoryImportRepository {
    /// Seeds suppliers 1-3, users 1-3 and products 1-3.
    pub fn seeded() -> Self {
        Self {
            suppliers: (1..=3)
                .map(|id| (id, (format!("Supplier {}", id), Some("CN".to_string()))))
                .collect(),
            users: (1..=3).map(|id| (id, format!("User {}", id))).collect(),
            products: (1..=3).map(|id| (id, format!("Product {}", id))).collect(),
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    /// The next `n` inserts fail as if their import code were already taken.
    pub fn fail_next_inserts_with_conflict(&self, n: usize) {
        self.state.lock().unwrap().conflicts_remaining = n;
    }

    pub fn attempted_codes(&self) -> Vec<String> {
        self.state.lock().unwrap().attempted_codes.clone()
    }

    pub fn order_count(&self) -> usize {
        self.state.lock().unwrap().orders.len()
    }

    /// Moves an existing order's creation time, for trend windows.
    pub fn backdate(&self, id: i32, created_at: DateTime<Utc>) {
        let mut state = self.state.lock().unwrap();
        if let Some((order, _)) = state.orders.iter_mut().find(|(o, _)| o.id == id) {
            order.created_at = created_at;
        }
    }

    fn summarize(&self, order: &ImportOrder) -> ImportSummary {
        let (supplier_name, supplier_country) = self
            .suppliers
            .get(&order.supplier_id)
            .cloned()
            .unwrap_or_default();
        ImportSummary {
            order: order.clone(),
            supplier_name,
            supplier_country,
            created_by: self
                .users
                .get(&order.owner_user_id)
                .cloned()
                .unwrap_or_default(),
        }
    }
}

impl ImportRepository for InMemoryImportRepository {
    fn insert(&self, order: NewImportOrder) -> Result<ImportOrder, DomainError> {
        let mut state = self.state.lock().unwrap();
        state.attempted_codes.push(order.import_code.clone());
        if state.conflicts_remaining > 0 {
            state.conflicts_remaining -= 1;
            return Err(DomainError::Conflict);
        }
        if state
            .orders
            .iter()
            .any(|(o, _)| o.import_code == order.import_code)
        {
            return Err(DomainError::Conflict);
        }
        if !self.suppliers.contains_key(&order.supplier_id) {
            return Err(DomainError::validation("supplier_id", "unknown supplier"));
        }
        if order
            .items
            .iter()
            .any(|i| !self.products.contains_key(&i.product_id))
        {
            return Err(DomainError::validation("items.product_id", "unknown product"));
        }

        let now = Utc::now();
        let created = ImportOrder {
            id: state.orders.len() as i32 + 1,
            import_code: order.import_code,
            owner_user_id: order.owner_user_id,
            supplier_id: order.supplier_id,
            status: order.status,
            total_amount: order.total_amount,
            import_date: order.import_date,
            estimated_arrival: order.estimated_arrival,
            tracking_number: None,
            notes: order.notes,
            created_at: now,
            updated_at: now,
        };
        state.orders.push((created.clone(), order.items));
        Ok(created)
    }

    fn update_status(
        &self,
        id: i32,
        status: ImportStatus,
        tracking_number: Option<String>,
    ) -> Result<Option<ImportOrder>, DomainError> {
        let mut state = self.state.lock().unwrap();
        Ok(state
            .orders
            .iter_mut()
            .find(|(o, _)| o.id == id)
            .map(|(order, _)| {
                order.status = status;
                order.tracking_number = tracking_number;
                order.updated_at = Utc::now();
                order.clone()
            }))
    }

    fn list(&self, filter: &ImportFilter) -> Result<Vec<ImportSummary>, DomainError> {
        let state = self.state.lock().unwrap();
        let mut rows: Vec<ImportSummary> = state
            .orders
            .iter()
            .map(|(o, _)| o)
            .filter(|o| filter.status.map_or(true, |s| o.status == s))
            .filter(|o| filter.supplier_id.map_or(true, |s| o.supplier_id == s))
            .filter(|o| filter.owner_user_id.map_or(true, |u| o.owner_user_id == u))
            .map(|o| self.summarize(o))
            .collect();
        rows.sort_by(|a, b| {
            b.order
                .created_at
                .cmp(&a.order.created_at)
                .then(b.order.id.cmp(&a.order.id))
        });
        Ok(rows)
    }

    fn find_detail(
        &self,
        id: i32,
        owner_user_id: Option<i32>,
    ) -> Result<Option<ImportDetail>, DomainError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .orders
            .iter()
            .find(|(o, _)| o.id == id && owner_user_id.map_or(true, |u| o.owner_user_id == u))
            .map(|(order, items)| ImportDetail {
                summary: self.summarize(order),
                items: items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| ImportItemView {
                        id: i as i32 + 1,
                        product_id: item.product_id,
                        product_name: self
                            .products
                            .get(&item.product_id)
                            .cloned()
                            .unwrap_or_default(),
                        product_description: None,
                        quantity: item.quantity,
                        unit_price: item.unit_price.clone(),
                        line_total: item.line_total.clone(),
                    })
                    .collect(),
            }))
    }

    fn status_totals(&self) -> Result<Vec<StatusTotal>, DomainError> {
        let state = self.state.lock().unwrap();
        let mut totals: BTreeMap<&'static str, (i64, BigDecimal)> = BTreeMap::new();
        for (order, _) in &state.orders {
            let entry = totals
                .entry(order.status.as_str())
                .or_insert_with(|| (0, BigDecimal::from(0)));
            entry.0 += 1;
            entry.1 += &order.total_amount;
        }
        Ok(totals
            .into_iter()
            .map(|(status, (import_count, total_value))| StatusTotal {
                status: status.to_string(),
                import_count,
                total_value,
            })
            .collect())
    }

    fn monthly_totals(&self, since: DateTime<Utc>) -> Result<Vec<MonthlyTotal>, DomainError> {
        let state = self.state.lock().unwrap();
        let mut totals: BTreeMap<String, (i64, BigDecimal)> = BTreeMap::new();
        for (order, _) in state.orders.iter().filter(|(o, _)| o.created_at >= since) {
            let entry = totals
                .entry(order.created_at.format("%Y-%m").to_string())
                .or_insert_with(|| (0, BigDecimal::from(0)));
            entry.0 += 1;
            entry.1 += &order.total_amount;
        }
        Ok(totals
            .into_iter()
            .rev()
            .map(|(month, (import_count, total_value))| MonthlyTotal {
                month,
                import_count,
                total_value,
            })
            .collect())
    }

    fn supplier_totals(&self) -> Result<Vec<SupplierTotal>, DomainError> {
        let state = self.state.lock().unwrap();
        Ok(self
            .suppliers
            .iter()
            .map(|(id, (name, country))| {
                let orders: Vec<&ImportOrder> = state
                    .orders
                    .iter()
                    .map(|(o, _)| o)
                    .filter(|o| o.supplier_id == *id)
                    .collect();
                SupplierTotal {
                    supplier_id: *id,
                    supplier_name: name.clone(),
                    country: country.clone(),
                    import_count: orders.len() as i64,
                    total_value: orders
                        .iter()
                        .fold(BigDecimal::from(0), |acc, o| acc + &o.total_amount),
                }
            })
            .collect())
    }
}
