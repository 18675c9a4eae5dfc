use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

pub async fn initialize_database(db_path: Option<&str>) -> anyhow::Result<()> {
    let db_file = db_path.unwrap_or("target/db/shop.db");
    if let Some(parent) = std::path::Path::new(db_file).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if std::path::Path::new(db_file).is_absolute() {
        std::path::PathBuf::from(db_file)
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);
    let conn = Database::connect(&db_url).await?;

    bootstrap_schema(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Database connection is already initialized"))?;
    tracing::info!("Database ready: {}", absolute_path.display());
    Ok(())
}

async fn table_exists(conn: &DatabaseConnection, table: &str) -> anyhow::Result<bool> {
    let rows = conn
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT name FROM sqlite_master WHERE type='table' AND name = ?;",
            [table.into()],
        ))
        .await?;
    Ok(!rows.is_empty())
}

/// Create the shop and remainder tables when they are missing
pub async fn bootstrap_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    if !table_exists(conn, "tab_tab").await? {
        tracing::info!("Creating tab_tab table");
        let create_shop_table_sql = r#"
            CREATE TABLE tab_tab (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL DEFAULT ''
            );
        "#;
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            create_shop_table_sql.to_string(),
        ))
        .await?;
    }

    if !table_exists(conn, "tab_shop_rem").await? {
        tracing::info!("Creating tab_shop_rem table");
        let create_remainder_table_sql = r#"
            CREATE TABLE tab_shop_rem (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                table_id INTEGER NOT NULL DEFAULT 0,
                art INTEGER NOT NULL DEFAULT 0,
                category TEXT DEFAULT '',
                remainder REAL DEFAULT 0.0,
                price REAL DEFAULT 0.0,
                priceretail REAL DEFAULT 0.0,
                avg REAL DEFAULT 0.0,
                nosaledays INTEGER DEFAULT 0
            );
        "#;
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            create_remainder_table_sql.to_string(),
        ))
        .await?;
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            "CREATE INDEX IF NOT EXISTS idx_tab_shop_rem_table_id ON tab_shop_rem(table_id);"
                .to_string(),
        ))
        .await?;
    }

    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

/// Single-connection in-memory database with the schema applied
#[cfg(test)]
pub async fn connect_in_memory() -> anyhow::Result<DatabaseConnection> {
    let mut opts = sea_orm::ConnectOptions::new("sqlite::memory:".to_string());
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let conn = Database::connect(opts).await?;
    bootstrap_schema(&conn).await?;
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bootstrap_is_idempotent() {
        let conn = connect_in_memory().await.unwrap();
        bootstrap_schema(&conn).await.unwrap();
        assert!(table_exists(&conn, "tab_tab").await.unwrap());
        assert!(table_exists(&conn, "tab_shop_rem").await.unwrap());
        assert!(!table_exists(&conn, "tab_unknown").await.unwrap());
    }
}
