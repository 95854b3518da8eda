//! One-time import from the older `cafes` table, which predates `has_sockets`.
//!
//! Rows are copied into `cafe` (skipping names already present) and the old table is
//! dropped. A database without `cafes` is left untouched.
use sea_orm_migration::prelude::*;

use crate::m20250101_000001_create_cafe::Cafe;

const LEGACY_TABLE: &str = "cafes";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if !manager.has_table(LEGACY_TABLE).await? {
            return Ok(());
        }
        let has_sockets = manager.has_column(LEGACY_TABLE, "has_sockets").await?;
        let sockets_expr = if has_sockets { "has_sockets" } else { "0" };
        let sql = format!(
            "INSERT OR IGNORE INTO {cafe} \
             (name, map_url, img_url, location, seats, has_toilet, has_wifi, has_sockets, can_take_calls, coffee_price) \
             SELECT name, map_url, img_url, location, seats, has_toilet, has_wifi, {sockets_expr}, can_take_calls, coffee_price \
             FROM {LEGACY_TABLE} ORDER BY id",
            cafe = Cafe::Table.to_string(),
        );
        let db = manager.get_connection();
        db.execute_unprepared(&sql).await?;
        db.execute_unprepared(&format!("DROP TABLE {LEGACY_TABLE}")).await?;
        Ok(())
    }

    async fn down(&self, _manager: &SchemaManager) -> Result<(), DbErr> {
        // The legacy table is gone for good.
        Ok(())
    }
}
