use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};

use crate::entity::property;

/// Connect to `database_url` and make sure the `properties` table exists.
///
/// # Errors
///
/// Returns the `DbErr` from connecting or from creating the table.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;
    ensure_schema(&db).await?;
    tracing::info!(backend = ?db.get_database_backend(), "Connected to database");
    Ok(db)
}

/// Create the `properties` table from the entity definition if it is absent.
///
/// # Errors
///
/// Returns the `DbErr` raised by the `CREATE TABLE` statement.
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let mut statement = Schema::new(backend).create_table_from_entity(property::Entity);
    statement.if_not_exists();
    db.execute(backend.build(&statement)).await?;
    Ok(())
}
