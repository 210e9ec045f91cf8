use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A persisted expense entry.
///
/// `id` is assigned by the local store on first insert and is unique within
/// it. Ids travel inside the remote document but are discarded and reassigned
/// whenever records are imported back from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    /// Calendar date of the expense (day-level ordering only).
    pub date: NaiveDate,
    pub category: String,
    pub payment: String,
    /// Positive values are expenses; only positive amounts pass validation
    /// at entry time.
    pub amount: f64,
    #[serde(default)]
    pub note: String,
}

/// An expense entry that has not been persisted yet — no identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRecord {
    pub date: NaiveDate,
    pub category: String,
    pub payment: String,
    pub amount: f64,
    #[serde(default)]
    pub note: String,
}

/// A user-supplied record failed entry-time checks.
///
/// Surfaced at the presentation boundary; a record that fails validation
/// never reaches storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("required field is empty: {0}")]
    MissingField(&'static str),

    #[error("amount must be a finite number")]
    AmountNotFinite,

    #[error("amount must be greater than zero")]
    AmountNotPositive,
}

impl NewRecord {
    /// Checks required fields and the positive-amount rule.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.category.trim().is_empty() {
            return Err(ValidationError::MissingField("category"));
        }
        if self.payment.trim().is_empty() {
            return Err(ValidationError::MissingField("payment"));
        }
        if !self.amount.is_finite() {
            return Err(ValidationError::AmountNotFinite);
        }
        if self.amount <= 0.0 {
            return Err(ValidationError::AmountNotPositive);
        }
        Ok(())
    }
}

impl Record {
    /// Drops the identity, yielding the unpersisted form. Used when importing
    /// remote records whose ids belong to a foreign store.
    pub fn into_new(self) -> NewRecord {
        NewRecord {
            date: self.date,
            category: self.category,
            payment: self.payment,
            amount: self.amount,
            note: self.note,
        }
    }
}
