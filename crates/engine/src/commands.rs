//! Command structs for engine write operations.
//!
//! They keep the service signatures short and make the difference between the
//! two update styles visible in the types: [`ExpenseUpdate`] carries every
//! field (full replace), [`CategoryPatch`] carries only what should change.

use chrono::{DateTime, Utc};

use crate::{MoneyCents, TransactionType};

/// Create an expense.
#[derive(Clone, Debug)]
pub struct ExpenseNew {
    pub description: String,
    pub sum: MoneyCents,
    pub currency: String,
    /// Defaults to the current instant when `None`.
    pub moment: Option<DateTime<Utc>>,
}

impl ExpenseNew {
    #[must_use]
    pub fn new(
        description: impl Into<String>,
        sum: MoneyCents,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            sum,
            currency: currency.into(),
            moment: None,
        }
    }

    #[must_use]
    pub fn moment(mut self, moment: DateTime<Utc>) -> Self {
        self.moment = Some(moment);
        self
    }
}

/// Replace every mutable field of an expense.
#[derive(Clone, Debug)]
pub struct ExpenseUpdate {
    pub description: String,
    pub sum: MoneyCents,
    pub currency: String,
    pub moment: DateTime<Utc>,
}

/// Create a category.
#[derive(Clone, Debug)]
pub struct CategoryNew {
    pub name: String,
    pub kind: Option<TransactionType>,
    pub parent_id: Option<i64>,
}

impl CategoryNew {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: TransactionType) -> Self {
        Self {
            name: name.into(),
            kind: Some(kind),
            parent_id: None,
        }
    }

    #[must_use]
    pub fn parent(mut self, parent_id: i64) -> Self {
        self.parent_id = Some(parent_id);
        self
    }
}

/// Partial category update.
///
/// `name` is applied only when it is not blank, `kind` and `parent_id` only
/// when present. There is no way to turn a child back into a root.
#[derive(Clone, Debug, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub kind: Option<TransactionType>,
    pub parent_id: Option<i64>,
}

impl CategoryPatch {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: TransactionType) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn parent(mut self, parent_id: i64) -> Self {
        self.parent_id = Some(parent_id);
        self
    }
}
