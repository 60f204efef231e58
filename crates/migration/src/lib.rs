pub use sea_orm_migration::prelude::*;

mod m20260201_000001_expenses;
mod m20260201_000002_categories;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260201_000001_expenses::Migration),
            Box::new(m20260201_000002_categories::Migration),
        ]
    }
}
