use api_types::ErrorBody;
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};
use engine::EngineError;

pub use server::{router, run_with_listener};

mod categories;
mod date_range;
mod expenses;
mod server;

#[derive(Debug)]
pub enum ServerError {
    Engine(EngineError),
    /// A read by id found nothing.
    NotFound(String),
    /// Malformed request: body, path or query parameters.
    Generic(String),
    /// Failure while building a response; details are only logged.
    Internal(String),
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::Validation(_) => StatusCode::BAD_REQUEST,
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "Internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::NotFound(err) => (StatusCode::NOT_FOUND, err),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
            ServerError::Internal(err) => {
                tracing::error!("internal error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        if status.is_client_error() {
            tracing::warn!("request rejected ({status}): {error}");
        }

        (status, Json(ErrorBody { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<JsonRejection> for ServerError {
    fn from(value: JsonRejection) -> Self {
        Self::Generic(value.body_text())
    }
}

impl From<PathRejection> for ServerError {
    fn from(value: PathRejection) -> Self {
        Self::Generic(value.body_text())
    }
}

impl From<QueryRejection> for ServerError {
    fn from(value: QueryRejection) -> Self {
        Self::Generic(value.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::DbErr;

    #[test]
    fn engine_validation_maps_to_400() {
        let res = ServerError::from(EngineError::Validation("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn database_error_maps_to_500_without_details() {
        let err = EngineError::Database(DbErr::Custom("disk on fire".to_string()));
        assert_eq!(message_for_engine_error(err), "Internal server error");

        let res = ServerError::from(EngineError::Database(DbErr::Custom("x".to_string())))
            .into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn read_miss_maps_to_404() {
        let res = ServerError::NotFound("Expense not found with id: 1".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn internal_maps_to_500() {
        let res = ServerError::Internal("bad number".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
