//! Expenses API endpoints.

use api_types::{
    Amount,
    expense::{DateRange, DescriptionSearch, ExpenseNew, ExpenseUpdate, ExpenseView},
};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use chrono::Utc;
use serde_json::Number;
use engine::{MoneyCents, SUM_NOT_POSITIVE};

use crate::{ServerError, date_range::utc_bounds, server::ServerState};

/// The sum as an exact JSON number.
fn sum_number(sum: MoneyCents) -> Result<Number, ServerError> {
    sum.to_compact_string()
        .parse::<Number>()
        .map_err(|err| ServerError::Internal(format!("sum {sum} is not a JSON number: {err}")))
}

fn map_expense(expense: engine::Expense) -> Result<ExpenseView, ServerError> {
    Ok(ExpenseView {
        id: expense.id,
        sum: sum_number(expense.sum())?,
        description: expense.description,
        currency: expense.currency,
        moment: expense.moment,
    })
}

fn map_expenses(expenses: Vec<engine::Expense>) -> Result<Json<Vec<ExpenseView>>, ServerError> {
    Ok(Json(
        expenses
            .into_iter()
            .map(map_expense)
            .collect::<Result<_, _>>()?,
    ))
}

/// Decode a client amount and reject anything that is not strictly positive.
///
/// Exponent forms such as `1e3` are not decimal amounts and are rejected.
fn parse_sum(amount: &Amount) -> Result<MoneyCents, ServerError> {
    let sum = amount.as_text().parse::<MoneyCents>()?;
    if !sum.is_positive() {
        return Err(ServerError::Generic(SUM_NOT_POSITIVE.to_string()));
    }
    Ok(sum)
}

pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<ExpenseNew>, JsonRejection>,
) -> Result<(StatusCode, Json<ExpenseView>), ServerError> {
    let Json(payload) = payload?;
    let sum = parse_sum(&payload.sum)?;

    let mut cmd = engine::ExpenseNew::new(payload.description, sum, payload.currency);
    if let Some(moment) = payload.moment {
        cmd = cmd.moment(moment.with_timezone(&Utc));
    }
    let expense = state.engine.create_expense(cmd).await?;
    tracing::info!("expense {} created", expense.id);

    Ok((StatusCode::CREATED, Json(map_expense(expense)?)))
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<ExpenseView>>, ServerError> {
    map_expenses(state.engine.list_expenses().await?)
}

pub async fn count(State(state): State<ServerState>) -> Result<Json<u64>, ServerError> {
    Ok(Json(state.engine.count_expenses().await?))
}

pub async fn get(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ExpenseView>, ServerError> {
    let Path(id) = id?;
    let expense = state
        .engine
        .expense(id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Expense not found with id: {id}")))?;
    Ok(Json(map_expense(expense)?))
}

pub async fn update(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ExpenseUpdate>, JsonRejection>,
) -> Result<Json<ExpenseView>, ServerError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let sum = parse_sum(&payload.sum)?;

    let expense = state
        .engine
        .update_expense(
            id,
            engine::ExpenseUpdate {
                description: payload.description,
                sum,
                currency: payload.currency,
                moment: payload.moment.with_timezone(&Utc),
            },
        )
        .await?;
    tracing::info!("expense {id} updated");

    Ok(Json(map_expense(expense)?))
}

pub async fn delete(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ServerError> {
    let Path(id) = id?;
    state.engine.delete_expense(id).await?;
    tracing::info!("expense {id} deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn by_currency(
    State(state): State<ServerState>,
    Path(currency): Path<String>,
) -> Result<Json<Vec<ExpenseView>>, ServerError> {
    map_expenses(state.engine.expenses_by_currency(&currency).await?)
}

pub async fn search(
    State(state): State<ServerState>,
    query: Result<Query<DescriptionSearch>, QueryRejection>,
) -> Result<Json<Vec<ExpenseView>>, ServerError> {
    let Query(query) = query?;
    map_expenses(state.engine.search_expenses(&query.description).await?)
}

pub async fn date_range(
    State(state): State<ServerState>,
    query: Result<Query<DateRange>, QueryRejection>,
) -> Result<Json<Vec<ExpenseView>>, ServerError> {
    let Query(query) = query?;
    let (start, end) = utc_bounds(
        &query.start_date,
        &query.end_date,
        query.timezone.as_deref(),
    )?;
    tracing::debug!("expense range {start} .. {end}");

    let expenses = match query.currency.as_deref() {
        Some(currency) => {
            state
                .engine
                .expenses_by_currency_between(currency, start, end)
                .await?
        }
        None => state.engine.expenses_between(start, end).await?,
    };
    map_expenses(expenses)
}
