use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};

use super::errors::DomainError;
use super::status::ImportStatus;

/// Money is stored with two fractional digits.
pub const CURRENCY_SCALE: i64 = 2;
pub const MAX_NOTES_LEN: usize = 500;
pub const MAX_TRACKING_NUMBER_LEN: usize = 100;

#[derive(Debug, Clone)]
pub struct ImportItemInput {
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct CreateImportInput {
    pub supplier_id: i32,
    pub import_date: NaiveDate,
    pub estimated_arrival: Option<NaiveDate>,
    pub notes: Option<String>,
    pub items: Vec<ImportItemInput>,
}

impl CreateImportInput {
    /// Field-level checks. Nothing here touches storage.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.supplier_id <= 0 {
            return Err(DomainError::validation(
                "supplier_id",
                "must be a positive integer",
            ));
        }
        if let Some(notes) = &self.notes {
            if notes.chars().count() > MAX_NOTES_LEN {
                return Err(DomainError::validation(
                    "notes",
                    format!("must be at most {} characters", MAX_NOTES_LEN),
                ));
            }
        }
        if self.items.is_empty() {
            return Err(DomainError::validation(
                "items",
                "must contain at least one item",
            ));
        }
        let zero = BigDecimal::from(0);
        for (i, item) in self.items.iter().enumerate() {
            if item.product_id <= 0 {
                return Err(DomainError::validation(
                    format!("items[{}].product_id", i),
                    "must be a positive integer",
                ));
            }
            if item.quantity <= 0 {
                return Err(DomainError::validation(
                    format!("items[{}].quantity", i),
                    "must be greater than zero",
                ));
            }
            if item.unit_price <= zero {
                return Err(DomainError::validation(
                    format!("items[{}].unit_price", i),
                    "must be greater than zero",
                ));
            }
            if item.unit_price.fractional_digit_count() > CURRENCY_SCALE {
                return Err(DomainError::validation(
                    format!("items[{}].unit_price", i),
                    format!("must have at most {} decimal places", CURRENCY_SCALE),
                ));
            }
        }
        Ok(())
    }
}

impl ImportItemInput {
    pub fn line_total(&self) -> BigDecimal {
        (&self.unit_price * BigDecimal::from(self.quantity)).with_scale(CURRENCY_SCALE)
    }
}

/// Sum of every line total, exact to the currency's minor unit.
pub fn order_total(items: &[ImportItemInput]) -> BigDecimal {
    items
        .iter()
        .fold(BigDecimal::from(0), |acc, item| acc + item.line_total())
        .with_scale(CURRENCY_SCALE)
}

/// Header plus lines, ready to be written in one transaction.
#[derive(Debug, Clone)]
pub struct NewImportOrder {
    pub import_code: String,
    pub owner_user_id: i32,
    pub supplier_id: i32,
    pub status: ImportStatus,
    pub total_amount: BigDecimal,
    pub import_date: NaiveDate,
    pub estimated_arrival: Option<NaiveDate>,
    pub notes: Option<String>,
    pub items: Vec<NewImportItem>,
}

#[derive(Debug, Clone)]
pub struct NewImportItem {
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: BigDecimal,
    pub line_total: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct ImportOrder {
    pub id: i32,
    pub import_code: String,
    pub owner_user_id: i32,
    pub supplier_id: i32,
    pub status: ImportStatus,
    pub total_amount: BigDecimal,
    pub import_date: NaiveDate,
    pub estimated_arrival: Option<NaiveDate>,
    pub tracking_number: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An order header joined with the display names of its supplier and creator.
#[derive(Debug, Clone)]
pub struct ImportSummary {
    pub order: ImportOrder,
    pub supplier_name: String,
    pub supplier_country: Option<String>,
    pub created_by: String,
}

#[derive(Debug, Clone)]
pub struct ImportItemView {
    pub id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub product_description: Option<String>,
    pub quantity: i32,
    pub unit_price: BigDecimal,
    pub line_total: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct ImportDetail {
    pub summary: ImportSummary,
    pub items: Vec<ImportItemView>,
}

#[derive(Debug, Clone, Default)]
pub struct ImportFilter {
    pub status: Option<ImportStatus>,
    pub supplier_id: Option<i32>,
    pub owner_user_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn item(product_id: i32, quantity: i32, price: &str) -> ImportItemInput {
        ImportItemInput {
            product_id,
            quantity,
            unit_price: BigDecimal::from_str(price).unwrap(),
        }
    }

    fn input(items: Vec<ImportItemInput>) -> CreateImportInput {
        CreateImportInput {
            supplier_id: 3,
            import_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            estimated_arrival: None,
            notes: None,
            items,
        }
    }

    fn invalid_field(input: &CreateImportInput) -> String {
        match input.validate() {
            Err(DomainError::Validation { field, .. }) => field,
            other => panic!("expected a validation error, got {:?}", other),
        }
    }

    #[test]
    fn total_is_exact_for_repeated_cents() {
        let items = vec![item(1, 3, "19.99"), item(2, 3, "19.99"), item(3, 3, "19.99")];
        assert_eq!(order_total(&items), BigDecimal::from_str("179.91").unwrap());
    }

    #[test]
    fn total_sums_mixed_lines() {
        let items = vec![item(1, 2, "10.00"), item(2, 1, "5.00")];
        let total = order_total(&items);
        assert_eq!(total, BigDecimal::from_str("25.00").unwrap());
        assert_eq!(total.to_string(), "25.00");
    }

    #[test]
    fn line_total_keeps_two_decimal_places() {
        assert_eq!(item(1, 4, "0.1").line_total().to_string(), "0.40");
    }

    #[test]
    fn valid_input_passes() {
        assert!(input(vec![item(1, 1, "1.50")]).validate().is_ok());
    }

    #[test]
    fn empty_items_are_rejected() {
        assert_eq!(invalid_field(&input(vec![])), "items");
    }

    #[test]
    fn non_positive_supplier_is_rejected() {
        let mut bad = input(vec![item(1, 1, "1.00")]);
        bad.supplier_id = 0;
        assert_eq!(invalid_field(&bad), "supplier_id");
    }

    #[test]
    fn zero_quantity_names_the_offending_item() {
        let bad = input(vec![item(1, 1, "1.00"), item(2, 0, "1.00")]);
        assert_eq!(invalid_field(&bad), "items[1].quantity");
    }

    #[test]
    fn negative_price_is_rejected() {
        let bad = input(vec![item(1, 1, "-2.00")]);
        assert_eq!(invalid_field(&bad), "items[0].unit_price");
    }

    #[test]
    fn sub_cent_price_is_rejected() {
        let bad = input(vec![item(1, 1, "0.001")]);
        assert_eq!(invalid_field(&bad), "items[0].unit_price");
    }

    #[test]
    fn notes_longer_than_limit_are_rejected() {
        let mut bad = input(vec![item(1, 1, "1.00")]);
        bad.notes = Some("x".repeat(MAX_NOTES_LEN + 1));
        assert_eq!(invalid_field(&bad), "notes");

        bad.notes = Some("x".repeat(MAX_NOTES_LEN));
        assert!(bad.validate().is_ok());
    }
}
