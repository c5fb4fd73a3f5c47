use crate::models::ChatTurn;
use sqlx::PgPool;
use tracing::Instrument;

pub async fn insert_turn(
    pool: &PgPool,
    session_id: &str,
    business_code: Option<&str>,
    role: &str,
    message: &str,
) -> Result<ChatTurn, sqlx::Error> {
    let query_span = tracing::info_span!("Saving chat turn.");
    sqlx::query_as::<_, ChatTurn>(
        r#"
        INSERT INTO chat_history (session_id, business_code, role, message, created_at)
        VALUES ($1, $2, $3, $4, NOW() at time zone 'utc')
        RETURNING id, session_id, business_code, role, message, created_at
        "#,
    )
    .bind(session_id)
    .bind(business_code)
    .bind(role)
    .bind(message)
    .fetch_one(pool)
    .instrument(query_span)
    .await
}

/// All turns of a session, oldest first.
pub async fn fetch_session(pool: &PgPool, session_id: &str) -> Result<Vec<ChatTurn>, sqlx::Error> {
    sqlx::query_as::<_, ChatTurn>(
        r#"
        SELECT id, session_id, business_code, role, message, created_at
        FROM chat_history
        WHERE session_id = $1
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .bind(session_id)
    .fetch_all(pool)
    .await
}

/// The most recent `limit` turns of a session, returned oldest first so they
/// can be spliced into a prompt as-is.
pub async fn recent_turns(
    pool: &PgPool,
    session_id: &str,
    limit: i64,
) -> Result<Vec<ChatTurn>, sqlx::Error> {
    let query_span = tracing::info_span!("Fetching recent chat turns.");
    let mut turns = sqlx::query_as::<_, ChatTurn>(
        r#"
        SELECT id, session_id, business_code, role, message, created_at
        FROM chat_history
        WHERE session_id = $1
        ORDER BY created_at DESC, id DESC
        LIMIT $2
        "#,
    )
    .bind(session_id)
    .bind(limit)
    .fetch_all(pool)
    .instrument(query_span)
    .await?;

    turns.reverse();
    Ok(turns)
}

pub async fn delete_session(pool: &PgPool, session_id: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(r#"DELETE FROM chat_history WHERE session_id = $1"#)
        .bind(session_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

pub async fn count_user_messages(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(r#"SELECT count(*) FROM chat_history WHERE role = 'user'"#)
        .fetch_one(pool)
        .await
}
