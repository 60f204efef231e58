use axum::{
    Router,
    http::{HeaderValue, Method, header::InvalidHeaderValue},
    routing::get,
};
use tower_http::cors::{Any, CorsLayer};

use std::sync::Arc;

use crate::{categories, expenses};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

fn api(state: ServerState) -> Router {
    Router::new()
        .route("/expenses", get(expenses::list).post(expenses::create))
        .route("/expenses/count", get(expenses::count))
        .route("/expenses/search", get(expenses::search))
        .route("/expenses/date-range", get(expenses::date_range))
        .route("/expenses/currency/{currency}", get(expenses::by_currency))
        .route(
            "/expenses/{id}",
            get(expenses::get)
                .put(expenses::update)
                .delete(expenses::delete),
        )
        .route(
            "/categories",
            get(categories::list).post(categories::create),
        )
        .route("/categories/count", get(categories::count))
        .route("/categories/search", get(categories::search))
        .route("/categories/type/{type}", get(categories::by_type))
        .route("/categories/type/{type}/roots", get(categories::roots))
        .route(
            "/categories/type/{type}/hierarchy",
            get(categories::hierarchy),
        )
        .route(
            "/categories/{id}",
            get(categories::get)
                .put(categories::update)
                .delete(categories::delete),
        )
        .route("/categories/{id}/children", get(categories::children))
        .with_state(state)
}

/// Build the application router, mounted under `/api`.
///
/// Cross-origin requests are allowed only from `cors_origin`.
pub fn router(engine: Engine, cors_origin: &str) -> Result<Router, InvalidHeaderValue> {
    let cors = CorsLayer::new()
        .allow_origin(cors_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    Ok(Router::new().nest("/api", api(state)).layer(cors))
}

pub async fn run_with_listener(
    engine: Engine,
    cors_origin: &str,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let app = router(engine, cors_origin)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidInput, err))?;

    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await
}
