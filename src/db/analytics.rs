use sqlx::PgPool;

/// Record a usage event. Best-effort: failures are logged and swallowed so
/// analytics can never fail the request that triggered them.
pub async fn record(
    pool: &PgPool,
    event_type: &str,
    business_code: Option<&str>,
    metadata: Option<serde_json::Value>,
) {
    let result = sqlx::query(
        r#"
        INSERT INTO analytics_events (event_type, business_code, metadata, created_at)
        VALUES ($1, $2, $3, NOW() at time zone 'utc')
        "#,
    )
    .bind(event_type)
    .bind(business_code)
    .bind(metadata)
    .execute(pool)
    .await;

    if let Err(err) = result {
        tracing::warn!("Failed to record analytics event {}: {:?}", event_type, err);
    }
}
