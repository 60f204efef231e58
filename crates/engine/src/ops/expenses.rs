use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    EngineError, Expense, ExpenseNew, ExpenseUpdate, ResultEngine, expenses,
    expenses::ensure_positive_sum,
    util::{contains_folded, fold},
};

use super::{Engine, with_tx};

fn into_expenses(models: Vec<expenses::Model>) -> ResultEngine<Vec<Expense>> {
    models.into_iter().map(Expense::try_from).collect()
}

impl Engine {
    /// Store a new expense.
    ///
    /// A missing `moment` is set to the current instant.
    pub async fn create_expense(&self, cmd: ExpenseNew) -> ResultEngine<Expense> {
        ensure_positive_sum(cmd.sum)?;
        let active = expenses::ActiveModel {
            id: ActiveValue::NotSet,
            description: ActiveValue::Set(cmd.description),
            sum_minor: ActiveValue::Set(cmd.sum.cents()),
            currency: ActiveValue::Set(cmd.currency),
            moment: ActiveValue::Set(cmd.moment.unwrap_or_else(Utc::now)),
        };
        let model = active.insert(&self.database).await?;
        Expense::try_from(model)
    }

    /// Return an expense, `None` if the id is unknown.
    pub async fn expense(&self, id: i64) -> ResultEngine<Option<Expense>> {
        expenses::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .map(Expense::try_from)
            .transpose()
    }

    pub async fn expense_exists(&self, id: i64) -> ResultEngine<bool> {
        Ok(self.expense(id).await?.is_some())
    }

    /// All expenses, newest first.
    pub async fn list_expenses(&self) -> ResultEngine<Vec<Expense>> {
        let models = expenses::Entity::find()
            .order_by_desc(expenses::Column::Moment)
            .order_by_desc(expenses::Column::Id)
            .all(&self.database)
            .await?;
        into_expenses(models)
    }

    /// Expenses whose currency equals `currency` exactly (case-sensitive).
    pub async fn expenses_by_currency(&self, currency: &str) -> ResultEngine<Vec<Expense>> {
        let models = expenses::Entity::find()
            .filter(expenses::Column::Currency.eq(currency))
            .order_by_asc(expenses::Column::Id)
            .all(&self.database)
            .await?;
        into_expenses(models)
    }

    /// Expenses whose description contains `text`, ignoring case.
    pub async fn search_expenses(&self, text: &str) -> ResultEngine<Vec<Expense>> {
        let needle = fold(text);
        let models = expenses::Entity::find()
            .order_by_asc(expenses::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .filter(|model| contains_folded(&model.description, &needle))
            .collect();
        into_expenses(models)
    }

    /// Expenses with `start <= moment <= end`.
    ///
    /// A `start` after `end` matches nothing.
    pub async fn expenses_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ResultEngine<Vec<Expense>> {
        let models = expenses::Entity::find()
            .filter(expenses::Column::Moment.between(start, end))
            .order_by_asc(expenses::Column::Id)
            .all(&self.database)
            .await?;
        into_expenses(models)
    }

    /// Expenses in `currency` with `start <= moment <= end`, newest first.
    pub async fn expenses_by_currency_between(
        &self,
        currency: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ResultEngine<Vec<Expense>> {
        let models = expenses::Entity::find()
            .filter(expenses::Column::Currency.eq(currency))
            .filter(expenses::Column::Moment.between(start, end))
            .order_by_desc(expenses::Column::Moment)
            .order_by_desc(expenses::Column::Id)
            .all(&self.database)
            .await?;
        into_expenses(models)
    }

    /// Replace description, sum, currency and moment of an existing expense.
    pub async fn update_expense(&self, id: i64, update: ExpenseUpdate) -> ResultEngine<Expense> {
        with_tx!(self, |db_tx| {
            let model = expenses::Entity::find_by_id(id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::expense_not_found(id))?;

            let mut expense = Expense::try_from(model)?;
            expense.replace_with(update)?;
            expenses::ActiveModel::from(&expense).update(&db_tx).await?;
            Ok(expense)
        })
    }

    pub async fn delete_expense(&self, id: i64) -> ResultEngine<()> {
        let result = expenses::Entity::delete_by_id(id)
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::expense_not_found(id));
        }
        Ok(())
    }

    pub async fn count_expenses(&self) -> ResultEngine<u64> {
        Ok(expenses::Entity::find().count(&self.database).await?)
    }
}
