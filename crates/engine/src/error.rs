//! The module contains the errors the engine can throw.
//!
//! - [`Validation`] for missing or malformed input (blank names, non-positive
//!   sums, unknown transaction types).
//! - [`KeyNotFound`] when an update or delete targets a missing id.
//! - [`Database`] for anything the storage layer reports.
//!
//!  [`Validation`]: EngineError::Validation
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`Database`]: EngineError::Database
use sea_orm::DbErr;
use thiserror::Error;

/// Client-facing message for a sum that is zero or negative.
pub const SUM_NOT_POSITIVE: &str = "Sum should be positive";
/// Client-facing message for a blank category name.
pub const CATEGORY_NAME_EMPTY: &str = "Category name cannot be empty";
/// Client-facing message for a category without a type.
pub const CATEGORY_TYPE_MISSING: &str = "Category type cannot be null";

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    KeyNotFound(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl EngineError {
    pub(crate) fn expense_not_found(id: i64) -> Self {
        Self::KeyNotFound(format!("Expense not found with id: {id}"))
    }

    pub(crate) fn category_not_found(id: i64) -> Self {
        Self::KeyNotFound(format!("Category not found with id: {id}"))
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
