use std::fmt;
use std::str::FromStr;

use super::errors::DomainError;

/// Shipping stage of an import order.
///
/// Any label may be set from any other; only membership in this set is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportStatus {
    Pending,
    Processing,
    Shipped,
    InTransit,
    Customs,
    Delivered,
    Cancelled,
}

impl ImportStatus {
    pub const ALL: [ImportStatus; 7] = [
        ImportStatus::Pending,
        ImportStatus::Processing,
        ImportStatus::Shipped,
        ImportStatus::InTransit,
        ImportStatus::Customs,
        ImportStatus::Delivered,
        ImportStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ImportStatus::Pending => "pending",
            ImportStatus::Processing => "processing",
            ImportStatus::Shipped => "shipped",
            ImportStatus::InTransit => "in_transit",
            ImportStatus::Customs => "customs",
            ImportStatus::Delivered => "delivered",
            ImportStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ImportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImportStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ImportStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                DomainError::validation("status", format!("'{}' is not a known import status", s))
            })
    }
}
