use crate::models::ApiClient;
use sqlx::PgPool;
use tracing::Instrument;

pub async fn fetch_by_key(pool: &PgPool, api_key: &str) -> Result<Option<ApiClient>, sqlx::Error> {
    let query_span = tracing::info_span!("Looking up partner API key.");
    sqlx::query_as::<_, ApiClient>(
        r#"
        SELECT id, api_key, company, email, use_case, status,
               requests_remaining, created_at, updated_at
        FROM api_clients
        WHERE api_key = $1
        "#,
    )
    .bind(api_key)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
}

pub async fn insert(
    pool: &PgPool,
    api_key: &str,
    company: &str,
    email: &str,
    use_case: &str,
) -> Result<ApiClient, sqlx::Error> {
    let query_span = tracing::info_span!("Saving partner access request.");
    sqlx::query_as::<_, ApiClient>(
        r#"
        INSERT INTO api_clients
            (api_key, company, email, use_case, status, requests_remaining, created_at, updated_at)
        VALUES ($1, $2, $3, $4, 'pending', 0, NOW() at time zone 'utc', NOW() at time zone 'utc')
        RETURNING id, api_key, company, email, use_case, status,
                  requests_remaining, created_at, updated_at
        "#,
    )
    .bind(api_key)
    .bind(company)
    .bind(email)
    .bind(use_case)
    .fetch_one(pool)
    .instrument(query_span)
    .await
}

/// Consume `units` of quota. Returns the remaining quota, or `None` when the
/// key had less quota left than requested (nothing is consumed in that case).
pub async fn consume_quota(
    pool: &PgPool,
    id: i32,
    units: i64,
) -> Result<Option<i64>, sqlx::Error> {
    let query_span = tracing::info_span!("Consuming partner quota.");
    sqlx::query_scalar(
        r#"
        UPDATE api_clients
        SET requests_remaining = requests_remaining - $2,
            updated_at = NOW() at time zone 'utc'
        WHERE id = $1 AND requests_remaining >= $2
        RETURNING requests_remaining
        "#,
    )
    .bind(id)
    .bind(units)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
}
