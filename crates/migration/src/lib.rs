//! Migrator for both single-table stores.
//! Each binary runs the full set at startup; the tables are independent, so an
//! unused one in a given database file is harmless.
pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_cafe;
mod m20250101_000002_create_todo;
mod m20250101_000003_import_legacy_cafes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_cafe::Migration),
            Box::new(m20250101_000002_create_todo::Migration),
            // Must run after `cafe` exists
            Box::new(m20250101_000003_import_legacy_cafes::Migration),
        ]
    }
}
