use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

pub async fn initialize_database(db_path: Option<&str>) -> anyhow::Result<()> {
    let db_file = db_path.unwrap_or("target/db/wecamp.db");
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

    ensure_table(
        &conn,
        "a001_category",
        r#"
            CREATE TABLE a001_category (
                id TEXT PRIMARY KEY NOT NULL,
                slug TEXT NOT NULL,
                name TEXT NOT NULL,
                description TEXT,
                parent_id TEXT,
                icon TEXT,
                sort_order INTEGER NOT NULL DEFAULT 0,
                created_at TEXT,
                updated_at TEXT,
                version INTEGER NOT NULL DEFAULT 0
            );
        "#,
    )
    .await?;

    ensure_table(
        &conn,
        "a002_gear",
        r#"
            CREATE TABLE a002_gear (
                id TEXT PRIMARY KEY NOT NULL,
                name TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                price_per_day REAL NOT NULL DEFAULT 0,
                deposit REAL,
                available INTEGER NOT NULL DEFAULT 1,
                status TEXT,
                images TEXT NOT NULL DEFAULT '[]',
                brand TEXT,
                color TEXT,
                specifications TEXT NOT NULL DEFAULT '{}',
                category_ref TEXT,
                category_slug TEXT,
                rating REAL,
                created_at TEXT,
                updated_at TEXT,
                version INTEGER NOT NULL DEFAULT 0
            );
        "#,
    )
    .await?;

    // rating was added after the first deployments; older files miss it
    ensure_column(&conn, "a002_gear", "rating", "REAL").await?;

    ensure_table(
        &conn,
        "a003_brand",
        r#"
            CREATE TABLE a003_brand (
                id TEXT PRIMARY KEY NOT NULL,
                name TEXT NOT NULL,
                logo TEXT,
                created_at TEXT,
                updated_at TEXT,
                version INTEGER NOT NULL DEFAULT 0
            );
        "#,
    )
    .await?;

    ensure_table(
        &conn,
        "a004_reference",
        r#"
            CREATE TABLE a004_reference (
                id TEXT PRIMARY KEY NOT NULL,
                title TEXT NOT NULL,
                image TEXT NOT NULL,
                location TEXT,
                year TEXT,
                description TEXT,
                order_index INTEGER NOT NULL DEFAULT 0,
                created_at TEXT,
                updated_at TEXT,
                version INTEGER NOT NULL DEFAULT 0
            );
        "#,
    )
    .await?;

    ensure_table(
        &conn,
        "a005_campsite",
        r#"
            CREATE TABLE a005_campsite (
                id TEXT PRIMARY KEY NOT NULL,
                name TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                price_per_night REAL NOT NULL DEFAULT 0,
                location TEXT NOT NULL DEFAULT '{}',
                amenities TEXT NOT NULL DEFAULT '[]',
                rules TEXT NOT NULL DEFAULT '[]',
                images TEXT NOT NULL DEFAULT '[]',
                available INTEGER NOT NULL DEFAULT 1,
                created_at TEXT,
                updated_at TEXT,
                version INTEGER NOT NULL DEFAULT 0
            );
        "#,
    )
    .await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

async fn ensure_table(
    conn: &DatabaseConnection,
    table: &str,
    create_sql: &str,
) -> anyhow::Result<()> {
    let check = format!(
        "SELECT name FROM sqlite_master WHERE type='table' AND name='{}';",
        table
    );
    let exists = conn
        .query_all(Statement::from_string(DatabaseBackend::Sqlite, check))
        .await?;

    if exists.is_empty() {
        tracing::info!("Creating {} table", table);
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            create_sql.to_string(),
        ))
        .await?;
    }
    Ok(())
}

async fn ensure_column(
    conn: &DatabaseConnection,
    table: &str,
    column: &str,
    column_type: &str,
) -> anyhow::Result<()> {
    let pragma = format!("PRAGMA table_info('{}');", table);
    let cols = conn
        .query_all(Statement::from_string(DatabaseBackend::Sqlite, pragma))
        .await?;
    let present = cols.iter().any(|row| {
        let name: String = row.try_get("", "name").unwrap_or_default();
        name == column
    });
    if !present {
        tracing::info!("Adding {} column to {}", column, table);
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            format!("ALTER TABLE {} ADD COLUMN {} {};", table, column, column_type),
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
