use crate::models::Insight;
use sqlx::PgPool;
use tracing::Instrument;

#[derive(Debug, serde::Serialize, sqlx::FromRow)]
pub struct StateCount {
    pub state: String,
    pub count: i64,
}

pub async fn insert(pool: &PgPool, insight: Insight) -> Result<Insight, sqlx::Error> {
    let query_span = tracing::info_span!("Saving generated insight into the database.");
    sqlx::query_as::<_, Insight>(
        r#"
        INSERT INTO insights (
            business_code, business_type, state, area,
            peak_hours, competition, price_sensitivity, quick_wins,
            customer_profile, competitive_landscape, growth_opportunity,
            data_note, grounded, generated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, NOW() at time zone 'utc')
        RETURNING id, business_code, business_type, state, area,
                  peak_hours, competition, price_sensitivity, quick_wins,
                  customer_profile, competitive_landscape, growth_opportunity,
                  data_note, grounded, generated_at
        "#,
    )
    .bind(insight.business_code)
    .bind(insight.business_type)
    .bind(insight.state)
    .bind(insight.area)
    .bind(insight.peak_hours)
    .bind(insight.competition)
    .bind(insight.price_sensitivity)
    .bind(insight.quick_wins)
    .bind(insight.customer_profile)
    .bind(insight.competitive_landscape)
    .bind(insight.growth_opportunity)
    .bind(insight.data_note)
    .bind(insight.grounded)
    .fetch_one(pool)
    .instrument(query_span)
    .await
}

pub async fn fetch(pool: &PgPool, id: i32) -> Result<Option<Insight>, sqlx::Error> {
    sqlx::query_as::<_, Insight>(
        r#"
        SELECT id, business_code, business_type, state, area,
               peak_hours, competition, price_sensitivity, quick_wins,
               customer_profile, competitive_landscape, growth_opportunity,
               data_note, grounded, generated_at
        FROM insights
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Insight history for a business, newest first.
pub async fn list_for_business(
    pool: &PgPool,
    business_code: &str,
    limit: i64,
) -> Result<Vec<Insight>, sqlx::Error> {
    let query_span = tracing::info_span!("Fetching insight history.");
    sqlx::query_as::<_, Insight>(
        r#"
        SELECT id, business_code, business_type, state, area,
               peak_hours, competition, price_sensitivity, quick_wins,
               customer_profile, competitive_landscape, growth_opportunity,
               data_note, grounded, generated_at
        FROM insights
        WHERE business_code = $1
        ORDER BY generated_at DESC
        LIMIT $2
        "#,
    )
    .bind(business_code)
    .bind(limit)
    .fetch_all(pool)
    .instrument(query_span)
    .await
}

/// The complete insight history of a business, newest first. Used by the
/// export endpoint, which must not truncate.
pub async fn list_all_for_business(
    pool: &PgPool,
    business_code: &str,
) -> Result<Vec<Insight>, sqlx::Error> {
    let query_span = tracing::info_span!("Fetching full insight history.");
    sqlx::query_as::<_, Insight>(
        r#"
        SELECT id, business_code, business_type, state, area,
               peak_hours, competition, price_sensitivity, quick_wins,
               customer_profile, competitive_landscape, growth_opportunity,
               data_note, grounded, generated_at
        FROM insights
        WHERE business_code = $1
        ORDER BY generated_at DESC
        "#,
    )
    .bind(business_code)
    .fetch_all(pool)
    .instrument(query_span)
    .await
}

pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(r#"SELECT count(*) FROM insights"#)
        .fetch_one(pool)
        .await
}

pub async fn top_states(pool: &PgPool, limit: i64) -> Result<Vec<StateCount>, sqlx::Error> {
    sqlx::query_as::<_, StateCount>(
        r#"
        SELECT state, count(*) AS count
        FROM insights
        GROUP BY state
        ORDER BY count DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}
