use migration::Migrator;
use sea_orm::Database;
use sea_orm_migration::prelude::*;

const DEFAULT_DATABASE_URL: &str = "sqlite:./spese.db?mode=rwc";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let command = std::env::args().nth(1).unwrap_or_else(|| "up".to_string());
    let url = std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

    let db = Database::connect(&url).await?;

    match command.as_str() {
        "up" => Migrator::up(&db, None).await?,
        "down" => Migrator::down(&db, Some(1)).await?,
        "fresh" => Migrator::fresh(&db).await?,
        "status" => Migrator::status(&db).await?,
        other => {
            eprintln!("unknown command '{other}'");
            eprintln!("usage: migration [up|down|fresh|status] (DATABASE_URL overrides {DEFAULT_DATABASE_URL})");
            std::process::exit(2);
        }
    }

    Ok(())
}
