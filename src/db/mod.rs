use sqlx::mysql::MySqlPool;
use tracing::{debug, warn};

pub mod session;

const CREATE_TABLES_SQL: &str = include_str!("../../migrations/create_tables.sql");

/// Connect the MySQL pool and create tables
pub async fn init_db(database_url: &str) -> Result<MySqlPool, sqlx::Error> {
    let pool = MySqlPool::connect(database_url).await?;

    run_migration(&pool, CREATE_TABLES_SQL).await;

    Ok(pool)
}

/// Statements of a `//`-delimited SQL script, without the DELIMITER lines
fn split_statements(sql: &str) -> Vec<&str> {
    sql.split("//")
        .skip(1)
        .map(str::trim)
        .filter(|statement| !statement.is_empty() && !statement.starts_with("DELIMITER"))
        .collect()
}

async fn run_migration(pool: &MySqlPool, sql: &str) {
    for statement in split_statements(sql) {
        match sqlx::raw_sql(statement).execute(pool).await {
            Ok(_) => debug!("Migration statement applied"),
            // Tables created by an earlier run are expected here
            Err(e) => warn!("Migration statement skipped: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migration_contains_session_table() {
        let statements = split_statements(CREATE_TABLES_SQL);
        assert_eq!(statements.len(), 1);
        assert!(statements[0].starts_with("CREATE TABLE IF NOT EXISTS session"));
    }
}
