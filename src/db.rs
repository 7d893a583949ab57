use std::time::Duration;

use anyhow::Result;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, EntityTrait,
    Schema,
};

use crate::entity::{
    AdminBypassTokens, Admins, AuditLogs, Banners, FreeWebsiteRequests, Gallery, Inquiries,
    OrderItems, Orders, Pdfs, Products, Reviews, SiteSettings, Users, Videos, Visits,
};

pub type OrmConn = DatabaseConnection;

/// Create a SeaORM connection.
pub async fn create_orm_conn(database_url: &str) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(database_url);
    options
        .connect_timeout(Duration::from_secs(8))
        .sqlx_logging(false);
    // Every pooled connection to `sqlite::memory:` would open its own empty database.
    if database_url.contains(":memory:") {
        options.max_connections(1).min_connections(1);
    }
    let conn = Database::connect(options).await?;
    Ok(conn)
}

/// Apply the schema. Postgres uses the SQL files in `migrations/`; other
/// backends (SQLite for tests and local demos) get tables built from the entities.
pub async fn run_migrations(conn: &DatabaseConnection) -> Result<()> {
    match conn.get_database_backend() {
        DatabaseBackend::Postgres => {
            sqlx::migrate!("./migrations")
                .run(conn.get_postgres_connection_pool())
                .await?;
        }
        backend => create_schema(conn, backend).await?,
    }
    Ok(())
}

async fn create_schema(conn: &DatabaseConnection, backend: DatabaseBackend) -> Result<()> {
    let schema = Schema::new(backend);
    // Parents before children so foreign keys resolve.
    create_table(conn, &schema, Products).await?;
    create_table(conn, &schema, Users).await?;
    create_table(conn, &schema, Orders).await?;
    create_table(conn, &schema, OrderItems).await?;
    create_table(conn, &schema, Banners).await?;
    create_table(conn, &schema, Reviews).await?;
    create_table(conn, &schema, Gallery).await?;
    create_table(conn, &schema, Videos).await?;
    create_table(conn, &schema, Pdfs).await?;
    create_table(conn, &schema, Inquiries).await?;
    create_table(conn, &schema, FreeWebsiteRequests).await?;
    create_table(conn, &schema, Admins).await?;
    create_table(conn, &schema, AdminBypassTokens).await?;
    create_table(conn, &schema, SiteSettings).await?;
    create_table(conn, &schema, Visits).await?;
    create_table(conn, &schema, AuditLogs).await?;
    Ok(())
}

async fn create_table<E: EntityTrait>(
    conn: &DatabaseConnection,
    schema: &Schema,
    entity: E,
) -> Result<()> {
    let backend = conn.get_database_backend();
    let mut stmt = schema.create_table_from_entity(entity);
    stmt.if_not_exists();
    conn.execute(backend.build(&stmt)).await?;
    Ok(())
}
