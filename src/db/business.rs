use crate::models::Business;
use sqlx::PgPool;
use tracing::Instrument;

pub async fn is_code_unique(pool: &PgPool, code: &str) -> Result<bool, sqlx::Error> {
    let query_span = tracing::info_span!("Checking business code uniqueness.");
    let found: i64 = sqlx::query_scalar(
        r#"SELECT count(*) FROM businesses WHERE code = $1"#,
    )
    .bind(code)
    .fetch_one(pool)
    .instrument(query_span)
    .await?;

    Ok(found == 0)
}

pub async fn insert(pool: &PgPool, business: Business) -> Result<Business, sqlx::Error> {
    let query_span = tracing::info_span!("Saving new business into the database.");
    sqlx::query_as::<_, Business>(
        r#"
        INSERT INTO businesses (code, name, business_type, state, area, contact, created_at, last_active)
        VALUES ($1, $2, $3, $4, $5, $6, NOW() at time zone 'utc', NOW() at time zone 'utc')
        RETURNING code, name, business_type, state, area, contact, created_at, last_active
        "#,
    )
    .bind(business.code)
    .bind(business.name)
    .bind(business.business_type)
    .bind(business.state)
    .bind(business.area)
    .bind(business.contact)
    .fetch_one(pool)
    .instrument(query_span)
    .await
}

pub async fn fetch(pool: &PgPool, code: &str) -> Result<Option<Business>, sqlx::Error> {
    sqlx::query_as::<_, Business>(
        r#"
        SELECT code, name, business_type, state, area, contact, created_at, last_active
        FROM businesses
        WHERE code = $1
        "#,
    )
    .bind(code)
    .fetch_optional(pool)
    .await
}

/// Fetch a business and bump `last_active`; the opaque code doubles as the
/// login credential, so every successful fetch is a login.
pub async fn fetch_and_touch(pool: &PgPool, code: &str) -> Result<Option<Business>, sqlx::Error> {
    let query_span = tracing::info_span!("Fetching business and updating last_active.");
    sqlx::query_as::<_, Business>(
        r#"
        UPDATE businesses
        SET last_active = NOW() at time zone 'utc'
        WHERE code = $1
        RETURNING code, name, business_type, state, area, contact, created_at, last_active
        "#,
    )
    .bind(code)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
}

pub async fn update(
    pool: &PgPool,
    code: &str,
    business_type: Option<String>,
    area: Option<String>,
    contact: Option<String>,
) -> Result<Option<Business>, sqlx::Error> {
    let query_span = tracing::info_span!("Updating business details.");
    sqlx::query_as::<_, Business>(
        r#"
        UPDATE businesses
        SET business_type = COALESCE($2, business_type),
            area = COALESCE($3, area),
            contact = COALESCE($4, contact),
            last_active = NOW() at time zone 'utc'
        WHERE code = $1
        RETURNING code, name, business_type, state, area, contact, created_at, last_active
        "#,
    )
    .bind(code)
    .bind(business_type)
    .bind(area)
    .bind(contact)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
}

pub async fn delete(pool: &PgPool, code: &str) -> Result<u64, sqlx::Error> {
    let query_span = tracing::info_span!("Deleting business.");
    let result = sqlx::query(r#"DELETE FROM businesses WHERE code = $1"#)
        .bind(code)
        .execute(pool)
        .instrument(query_span)
        .await?;

    Ok(result.rows_affected())
}

pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(r#"SELECT count(*) FROM businesses"#)
        .fetch_one(pool)
        .await
}
