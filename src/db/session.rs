use sqlx::mysql::MySqlPool;
use sqlx::Row;

/// Get the stored student ID and sealed token for a Discord user
pub async fn get_session(
    pool: &MySqlPool,
    discord_id: i64,
) -> Result<Option<(String, String)>, sqlx::Error> {
    let row = sqlx::query("SELECT student_id, encrypted_token FROM session WHERE discord_id = ?")
        .bind(discord_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| {
        (
            r.get::<String, _>("student_id"),
            r.get::<String, _>("encrypted_token"),
        )
    }))
}

/// Store or replace a user's session
pub async fn store_session(
    pool: &MySqlPool,
    discord_id: i64,
    student_id: &str,
    encrypted_token: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO session (discord_id, student_id, encrypted_token) VALUES (?, ?, ?) \
         ON DUPLICATE KEY UPDATE student_id = VALUES(student_id), encrypted_token = VALUES(encrypted_token)",
    )
    .bind(discord_id)
    .bind(student_id)
    .bind(encrypted_token)
    .execute(pool)
    .await?;

    Ok(())
}

/// Remove a user's session; returns whether one existed
pub async fn delete_session(pool: &MySqlPool, discord_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM session WHERE discord_id = ?")
        .bind(discord_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
