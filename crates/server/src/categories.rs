//! Categories API endpoints.

use api_types::{
    TransactionType,
    category::{CategoryNew, CategoryUpdate, CategoryView, NameSearch},
};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};

use crate::{ServerError, server::ServerState};

fn to_engine_type(kind: TransactionType) -> engine::TransactionType {
    match kind {
        TransactionType::Expense => engine::TransactionType::Expense,
        TransactionType::Income => engine::TransactionType::Income,
    }
}

fn from_engine_type(kind: engine::TransactionType) -> TransactionType {
    match kind {
        engine::TransactionType::Expense => TransactionType::Expense,
        engine::TransactionType::Income => TransactionType::Income,
    }
}

fn map_category(category: engine::Category) -> CategoryView {
    CategoryView {
        id: category.id,
        name: category.name,
        kind: from_engine_type(category.kind),
        parent_id: category.parent_id,
        children: category.children,
    }
}

fn map_categories(categories: Vec<engine::Category>) -> Json<Vec<CategoryView>> {
    Json(categories.into_iter().map(map_category).collect())
}

/// Path and query parameters name the type case-insensitively.
fn parse_type(value: &str) -> Result<engine::TransactionType, ServerError> {
    Ok(value.parse::<engine::TransactionType>()?)
}

pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<CategoryNew>, JsonRejection>,
) -> Result<(StatusCode, Json<CategoryView>), ServerError> {
    let Json(payload) = payload?;
    let category = state
        .engine
        .create_category(engine::CategoryNew {
            name: payload.name,
            kind: payload.kind.map(to_engine_type),
            parent_id: payload.parent_id,
        })
        .await?;
    tracing::info!("category {} created", category.id);

    Ok((StatusCode::CREATED, Json(map_category(category))))
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<CategoryView>>, ServerError> {
    Ok(map_categories(state.engine.list_categories().await?))
}

pub async fn count(State(state): State<ServerState>) -> Result<Json<u64>, ServerError> {
    Ok(Json(state.engine.count_categories().await?))
}

pub async fn get(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<CategoryView>, ServerError> {
    let Path(id) = id?;
    state
        .engine
        .category(id)
        .await?
        .map(|category| Json(map_category(category)))
        .ok_or_else(|| ServerError::NotFound(format!("Category not found with id: {id}")))
}

pub async fn update(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<CategoryUpdate>, JsonRejection>,
) -> Result<Json<CategoryView>, ServerError> {
    let Path(id) = id?;
    let Json(payload) = payload?;

    let category = state
        .engine
        .update_category(
            id,
            engine::CategoryPatch {
                name: payload.name,
                kind: payload.kind.map(to_engine_type),
                parent_id: payload.parent_id,
            },
        )
        .await?;
    tracing::info!("category {id} updated");

    Ok(Json(map_category(category)))
}

pub async fn delete(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ServerError> {
    let Path(id) = id?;
    let removed = state.engine.delete_category(id).await?;
    tracing::info!("category {id} deleted with {} descendants", removed.saturating_sub(1));
    Ok(StatusCode::NO_CONTENT)
}

pub async fn children(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Vec<CategoryView>>, ServerError> {
    let Path(id) = id?;
    Ok(map_categories(state.engine.child_categories(id).await?))
}

pub async fn by_type(
    State(state): State<ServerState>,
    Path(kind): Path<String>,
) -> Result<Json<Vec<CategoryView>>, ServerError> {
    let kind = parse_type(&kind)?;
    Ok(map_categories(state.engine.categories_by_type(kind).await?))
}

pub async fn roots(
    State(state): State<ServerState>,
    Path(kind): Path<String>,
) -> Result<Json<Vec<CategoryView>>, ServerError> {
    let kind = parse_type(&kind)?;
    Ok(map_categories(state.engine.root_categories(kind).await?))
}

pub async fn hierarchy(
    State(state): State<ServerState>,
    Path(kind): Path<String>,
) -> Result<Json<Vec<CategoryView>>, ServerError> {
    let kind = parse_type(&kind)?;
    Ok(map_categories(
        state.engine.categories_hierarchy(kind).await?,
    ))
}

pub async fn search(
    State(state): State<ServerState>,
    query: Result<Query<NameSearch>, QueryRejection>,
) -> Result<Json<Vec<CategoryView>>, ServerError> {
    let Query(query) = query?;
    let kind = parse_type(&query.kind)?;
    Ok(map_categories(
        state.engine.search_categories(&query.name, kind).await?,
    ))
}
