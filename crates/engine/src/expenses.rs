//! The module contains `Expense` struct and its database model.

use chrono::{DateTime, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};

use crate::{EngineError, ExpenseUpdate, MoneyCents, ResultEngine, error::SUM_NOT_POSITIVE};

/// A single spending record.
///
/// The sum is kept private so every assignment goes through
/// [`Expense::set_sum`], which rejects zero and negative amounts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expense {
    /// Identifier assigned by storage on insert.
    pub id: i64,
    pub description: String,
    sum: MoneyCents,
    /// Free-text currency code, stored as given.
    pub currency: String,
    pub moment: DateTime<Utc>,
}

impl Expense {
    pub fn new(
        id: i64,
        description: String,
        sum: MoneyCents,
        currency: String,
        moment: DateTime<Utc>,
    ) -> ResultEngine<Self> {
        ensure_positive_sum(sum)?;
        Ok(Self {
            id,
            description,
            sum,
            currency,
            moment,
        })
    }

    pub fn sum(&self) -> MoneyCents {
        self.sum
    }

    pub fn set_sum(&mut self, sum: MoneyCents) -> ResultEngine<()> {
        ensure_positive_sum(sum)?;
        self.sum = sum;
        Ok(())
    }

    /// Overwrites every mutable field with the update, whatever its content.
    ///
    /// On error the expense is left untouched.
    pub fn replace_with(&mut self, update: ExpenseUpdate) -> ResultEngine<()> {
        self.set_sum(update.sum)?;
        self.description = update.description;
        self.currency = update.currency;
        self.moment = update.moment;
        Ok(())
    }
}

pub(crate) fn ensure_positive_sum(sum: MoneyCents) -> ResultEngine<()> {
    if !sum.is_positive() {
        return Err(EngineError::Validation(SUM_NOT_POSITIVE.to_string()));
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub description: String,
    pub sum_minor: i64,
    pub currency: String,
    pub moment: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Expense {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Expense::new(
            model.id,
            model.description,
            MoneyCents::new(model.sum_minor),
            model.currency,
            model.moment,
        )
    }
}

impl From<&Expense> for ActiveModel {
    fn from(value: &Expense) -> Self {
        Self {
            id: ActiveValue::Unchanged(value.id),
            description: ActiveValue::Set(value.description.clone()),
            sum_minor: ActiveValue::Set(value.sum.cents()),
            currency: ActiveValue::Set(value.currency.clone()),
            moment: ActiveValue::Set(value.moment),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn expense() -> Expense {
        Expense::new(
            1,
            "Groceries".to_string(),
            MoneyCents::new(2_50),
            "EUR".to_string(),
            Utc.timestamp_opt(0, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn rejects_non_positive_sum_on_creation() {
        for cents in [0, -500] {
            let err = Expense::new(
                1,
                "Coffee".to_string(),
                MoneyCents::new(cents),
                "EUR".to_string(),
                Utc::now(),
            )
            .unwrap_err();
            assert_eq!(err, EngineError::Validation(SUM_NOT_POSITIVE.to_string()));
        }
    }

    #[test]
    fn set_sum_keeps_previous_value_on_error() {
        let mut expense = expense();
        assert!(expense.set_sum(MoneyCents::ZERO).is_err());
        assert_eq!(expense.sum(), MoneyCents::new(2_50));

        expense.set_sum(MoneyCents::new(1)).unwrap();
        assert_eq!(expense.sum(), MoneyCents::new(1));
    }

    #[test]
    fn replace_with_overwrites_everything() {
        let mut expense = expense();
        let moment = Utc.timestamp_opt(86_400, 0).unwrap();
        expense
            .replace_with(ExpenseUpdate {
                description: String::new(),
                sum: MoneyCents::new(99),
                currency: "usd".to_string(),
                moment,
            })
            .unwrap();

        assert_eq!(expense.id, 1);
        assert_eq!(expense.description, "");
        assert_eq!(expense.sum(), MoneyCents::new(99));
        assert_eq!(expense.currency, "usd");
        assert_eq!(expense.moment, moment);
    }

    #[test]
    fn replace_with_invalid_sum_changes_nothing() {
        let mut expense = expense();
        let before = expense.clone();
        let err = expense
            .replace_with(ExpenseUpdate {
                description: "Other".to_string(),
                sum: MoneyCents::new(-1),
                currency: "USD".to_string(),
                moment: Utc::now(),
            })
            .unwrap_err();

        assert_eq!(err, EngineError::Validation(SUM_NOT_POSITIVE.to_string()));
        assert_eq!(expense, before);
    }
}
