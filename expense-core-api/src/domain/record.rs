use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "transaction_type", rename_all = "PascalCase"))]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// Lowercase form used in the canonical record encoding.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" | "Income" => Ok(TransactionType::Income),
            "expense" | "Expense" => Ok(TransactionType::Expense),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "transaction_status", rename_all = "PascalCase"))]
pub enum TransactionStatus {
    Pending,
    Approved,
    Rejected,
}

impl TransactionStatus {
    /// Approved and rejected records accept no further status changes.
    pub fn is_decided(&self) -> bool {
        !matches!(self, TransactionStatus::Pending)
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStatus::Pending => write!(f, "Pending"),
            TransactionStatus::Approved => write!(f, "Approved"),
            TransactionStatus::Rejected => write!(f, "Rejected"),
        }
    }
}

impl FromStr for TransactionStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" | "Pending" => Ok(TransactionStatus::Pending),
            "approved" | "Approved" => Ok(TransactionStatus::Approved),
            "rejected" | "Rejected" => Ok(TransactionStatus::Rejected),
            _ => Err(()),
        }
    }
}

/// Content of a financial record as submitted by its owner.
///
/// Everything here except `owner_id` is user input and gets validated before
/// the record is hashed and appended to the chain.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewFinancialRecord {
    #[validate(length(min = 1, max = 500))]
    pub description: String,

    #[validate(custom(function = "validate_positive_amount"))]
    pub amount: Decimal,

    #[validate(length(min = 1, max = 100))]
    pub category: String,

    pub transaction_type: TransactionType,

    /// Reference to an uploaded bill, fixed at creation
    #[validate(length(max = 500))]
    pub attachment_url: Option<String>,

    pub owner_id: Uuid,
}

fn validate_positive_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_positive() && !amount.is_zero() {
        Ok(())
    } else {
        Err(ValidationError::new("amount_not_positive"))
    }
}

/// A persisted financial record together with its chain linkage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialRecord {
    pub id: Uuid,
    pub sequence: i64,
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    pub transaction_type: TransactionType,
    pub attachment_url: Option<String>,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub prev_hash: String,
    pub hash: String,
    pub status: TransactionStatus,
    pub action_by: Option<Uuid>,
}

/// Approval decision taken by a manager or admin.
///
/// The caller is expected to have checked that `action_by` may decide on the
/// record before submitting this request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusChangeRequest {
    pub record_id: Uuid,
    pub status: TransactionStatus,
    pub action_by: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use validator::Validate;

    fn new_record(description: &str, amount: Decimal) -> NewFinancialRecord {
        NewFinancialRecord {
            description: description.to_string(),
            amount,
            category: "Food".to_string(),
            transaction_type: TransactionType::Expense,
            attachment_url: None,
            owner_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn test_valid_record_passes() {
        assert!(new_record("lunch", Decimal::new(100, 0)).validate().is_ok());
    }

    #[test]
    fn test_empty_description_rejected() {
        let errors = new_record("", Decimal::new(100, 0)).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("description"));
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        let zero = new_record("lunch", Decimal::ZERO).validate().unwrap_err();
        assert!(zero.field_errors().contains_key("amount"));

        let negative = new_record("lunch", Decimal::new(-5, 0)).validate().unwrap_err();
        assert!(negative.field_errors().contains_key("amount"));
    }

    #[test]
    fn test_status_parsing_accepts_both_cases() {
        assert_eq!("approved".parse::<TransactionStatus>(), Ok(TransactionStatus::Approved));
        assert_eq!("Rejected".parse::<TransactionStatus>(), Ok(TransactionStatus::Rejected));
        assert!("archived".parse::<TransactionStatus>().is_err());
        assert!(TransactionStatus::Approved.is_decided());
        assert!(!TransactionStatus::Pending.is_decided());
    }
}
