use migration::{Migrator, MigratorTrait};
use settings::Database;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "spese={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let server = settings.server;
    let db = match parse_database(&server.database).await {
        Ok(db) => db,
        Err(err) => {
            tracing::error!("failed to initialize database: {err}");
            return Err(err);
        }
    };

    let engine = engine::Engine::builder().database(db).build().await?;

    let addr = format!("{}:{}", server.bind, server.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener on {addr}: {err}");
            return Err(err.into());
        }
    };

    if let Err(err) = server::run_with_listener(engine, &server.cors_origin, listener).await {
        tracing::error!("server failed: {err}");
        return Err(err.into());
    }

    Ok(())
}

async fn parse_database(
    config: &Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let url = match config {
        Database::Memory => String::from("sqlite::memory:"),
        Database::Sqlite(path) => format!("sqlite:{}?mode=rwc", path),
    };

    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    tracing::info!("database ready");
    Ok(database)
}
